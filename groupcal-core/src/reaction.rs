//! Member reactions to tasks and the per-user summary derived from them.

use serde::{Deserialize, Serialize};

use crate::UserId;
use crate::user::User;

/// A member's stated intent toward an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Join,
    Absent,
    #[default]
    Undecided,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Join => "join",
            ReactionKind::Absent => "absent",
            ReactionKind::Undecided => "undecided",
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(ReactionKind::Join),
            "absent" => Ok(ReactionKind::Absent),
            "undecided" => Ok(ReactionKind::Undecided),
            other => Err(format!(
                "Unknown reaction '{}'. Use join, absent or undecided",
                other
            )),
        }
    }
}

/// One user's reaction record on a task (`task_user_relations` entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub reaction: ReactionKind,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "crate::user::lenient")]
    pub user: Option<User>,
}

impl Reaction {
    /// The reacting user's id, from the record or its embedded user.
    pub fn reactor_id(&self) -> Option<UserId> {
        self.user_id.or(self.user.as_ref().map(|u| u.user_id))
    }
}

/// Body of `PUT /groups/{g}/tasks/{t}/reaction`.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionUpdate {
    pub reaction: ReactionKind,
    pub comment: String,
}

/// What the acting user sees for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSummary<'a> {
    pub my_status: ReactionKind,
    /// Users who confirmed attendance, in source order.
    pub joined_members: Vec<&'a User>,
}

impl<'a> ReactionSummary<'a> {
    pub fn for_user(relations: &'a [Reaction], acting_user: Option<&User>) -> Self {
        let my_status = acting_user
            .and_then(|me| {
                relations
                    .iter()
                    .find(|r| r.reactor_id() == Some(me.user_id))
            })
            .map(|r| r.reaction)
            .unwrap_or_default();

        let joined_members = relations
            .iter()
            .filter(|r| r.reaction == ReactionKind::Join)
            .filter_map(|r| r.user.as_ref())
            .collect();

        ReactionSummary {
            my_status,
            joined_members,
        }
    }
}
