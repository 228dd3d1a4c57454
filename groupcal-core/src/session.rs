//! Who is acting, and whether they administer the current group.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::{GroupCalError, GroupCalResult};
use crate::membership::{Membership, find_member};
use crate::user::User;
use crate::{GroupId, UserId};

/// True iff `user` has a membership in `memberships` with the
/// administrator flag set.
pub fn is_administrator(user: &User, memberships: &[Membership]) -> bool {
    find_member(memberships, user.user_id).is_some_and(|m| m.is_representative)
}

/// The acting user in the context of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub group_id: GroupId,
    pub is_admin: bool,
}

impl Session {
    pub fn new(user: User, group_id: GroupId, memberships: &[Membership]) -> Self {
        let is_admin = is_administrator(&user, memberships);
        debug!(user_id = user.user_id, group_id, is_admin, "session resolved");

        Session {
            user,
            group_id,
            is_admin,
        }
    }

    /// Fetch the current user and the group's memberships together and
    /// derive admin status.
    ///
    /// Either request failing fails the whole resolution; callers without
    /// a session have no administrator rights.
    pub async fn resolve(api: &ApiClient, group_id: GroupId) -> GroupCalResult<Session> {
        let (user, memberships) = tokio::try_join!(api.me(), api.members(group_id, None))
            .inspect_err(|e| warn!(group_id, error = %e, "could not resolve session"))?;

        Ok(Session::new(user, group_id, &memberships))
    }

    pub fn user_id(&self) -> UserId {
        self.user.user_id
    }

    /// Error unless the acting user administers the group.
    pub fn require_admin(&self, action: &'static str) -> GroupCalResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(GroupCalError::NotAdministrator(action))
        }
    }
}

/// Admin check that treats a missing session as "not an administrator".
pub fn is_admin(session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.is_admin)
}
