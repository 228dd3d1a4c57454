//! Group membership records.
//!
//! The backend returns memberships in two shapes: flat, with the user's
//! fields at the top level, or nested under a `user` object. Both are read
//! into `WireMembership` and normalized once into `Membership`, so nothing
//! else has to care which shape arrived.

use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::user::User;

/// A membership exactly as the backend sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMembership {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::user::lenient")]
    pub user: Option<User>,
    #[serde(default)]
    pub accepted: Option<bool>,
    #[serde(default)]
    pub is_representative: Option<bool>,
}

/// Canonical membership of a user in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Option<UserId>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub accepted: bool,
    /// Administrator flag.
    pub is_representative: bool,
}

impl From<WireMembership> for Membership {
    fn from(wire: WireMembership) -> Self {
        let (nested_id, nested_name, nested_email) = match wire.user {
            Some(user) => (Some(user.user_id), user.user_name, user.email),
            None => (None, None, None),
        };

        Membership {
            user_id: wire.user_id.or(nested_id),
            user_name: wire.user_name.or(nested_name),
            email: wire.email.or(nested_email),
            accepted: wire.accepted.unwrap_or(false),
            is_representative: wire.is_representative.unwrap_or(false),
        }
    }
}

impl Membership {
    /// Whether this membership belongs to `user_id`.
    pub fn is_user(&self, user_id: UserId) -> bool {
        self.user_id == Some(user_id)
    }

    /// Opaque identifier the backend accepts as `target_identifier`:
    /// the email when known, otherwise the user id.
    pub fn identifier(&self) -> String {
        match (&self.email, self.user_id) {
            (Some(email), _) => email.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        }
    }

    pub fn display_name(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.identifier())
    }

    pub fn initial(&self) -> char {
        self.user_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .unwrap_or('U')
    }
}

/// Normalize a list of wire records, preserving order.
pub fn normalize(wire: Vec<WireMembership>) -> Vec<Membership> {
    wire.into_iter().map(Membership::from).collect()
}

/// Find the membership belonging to `user_id`.
pub fn find_member(memberships: &[Membership], user_id: UserId) -> Option<&Membership> {
    memberships.iter().find(|m| m.is_user(user_id))
}

/// Join requests still waiting for an administrator.
pub fn pending_requests(memberships: Vec<Membership>) -> Vec<Membership> {
    memberships.into_iter().filter(|m| !m.accepted).collect()
}
