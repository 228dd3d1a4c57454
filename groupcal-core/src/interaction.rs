//! The user-facing side effects core needs: asking for confirmation and
//! reporting outcomes. The CLI supplies a terminal implementation; tests
//! supply scripted ones.

use crate::error::GroupCalResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }
}

pub trait Interaction {
    /// Ask the user to confirm a destructive or administrative action.
    fn confirm(&self, prompt: &str) -> GroupCalResult<bool>;

    /// Report the outcome of an action.
    fn notify(&self, notice: Notice);
}
