pub mod config;
pub mod join_request;
pub mod members;
pub mod new;
pub mod react;
pub mod reschedule;
pub mod role;
pub mod show;
pub mod tasks;
pub mod whoami;
