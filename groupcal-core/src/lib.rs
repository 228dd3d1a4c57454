//! Core types for groupcal.
//!
//! This crate holds everything the CLI needs that is not terminal output:
//! - wire types for users, memberships and tasks
//! - `ApiClient`, a thin REST client for the group-scheduling backend
//! - the session, reaction and membership resolvers built on top of it

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod failure;
pub mod interaction;
pub mod members;
pub mod membership;
pub mod reaction;
pub mod session;
pub mod task;
pub mod task_time;
pub mod user;
pub mod view;

pub use error::{GroupCalError, GroupCalResult};
pub use membership::Membership;
pub use reaction::{Reaction, ReactionKind, ReactionSummary};
pub use session::Session;
pub use task::Task;
pub use user::User;

/// Identifier of a group, taken from the route or the config.
pub type GroupId = i64;
/// Identifier of a user.
pub type UserId = i64;
/// Identifier of a task/event.
pub type TaskId = i64;
