//! Member and join-request lists, and the administrator actions on them.
//!
//! Every successful action re-fetches the lists instead of patching local
//! copies, so what the caller holds always matches the server.

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::GroupId;
use crate::api::ApiClient;
use crate::error::{GroupCalError, GroupCalResult};
use crate::interaction::{Interaction, Notice};
use crate::membership::{Membership, pending_requests};
use crate::session::Session;

/// Accepted members and pending join requests of a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberList {
    pub members: Vec<Membership>,
    /// Always empty unless the acting user is an administrator.
    pub requests: Vec<Membership>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinAction {
    Approve,
    Reject,
}

impl JoinAction {
    fn verb(&self) -> &'static str {
        match self {
            JoinAction::Approve => "approve",
            JoinAction::Reject => "reject",
        }
    }
}

/// What an administrator action left behind.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberChange {
    /// The confirmation was declined and nothing was sent.
    Declined,
    /// The server applied the change; the lists were fetched again.
    Applied(MemberList),
    /// The server applied the change but fetching the lists again failed.
    AppliedUnrefreshed,
}

/// Body of `PUT /groups/{g}/join_requests`.
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequestAnswer {
    pub target_identifier: String,
    pub action: JoinAction,
}

/// Body of `PUT /groups/{g}/members/{user_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct MemberUpdate {
    pub accepted: bool,
    pub is_representative: bool,
    pub target_identifier: String,
}

/// Fetch the accepted members and, for administrators, the pending
/// requests.
///
/// The unfiltered list is only readable by administrators; if fetching it
/// fails anyway, no requests are shown rather than failing the whole load.
pub async fn reconcile(api: &ApiClient, session: &Session) -> GroupCalResult<MemberList> {
    let members = api.members(session.group_id, Some(true)).await?;
    let requests = visible_requests(api, session).await;

    Ok(MemberList { members, requests })
}

/// Resolve the session from `/me` and the accepted member list (fetched
/// together), then load pending requests if the user is an administrator.
pub async fn load(api: &ApiClient, group_id: GroupId) -> GroupCalResult<(Session, MemberList)> {
    let (user, members) = tokio::try_join!(api.me(), api.members(group_id, Some(true)))
        .inspect_err(|e| error!(group_id, error = %e, "fetching members failed"))?;

    let session = Session::new(user, group_id, &members);
    let requests = visible_requests(api, &session).await;

    Ok((session, MemberList { members, requests }))
}

async fn visible_requests(api: &ApiClient, session: &Session) -> Vec<Membership> {
    if !session.is_admin {
        return Vec::new();
    }

    match api.members(session.group_id, Some(false)).await {
        Ok(all) => pending_requests(all),
        Err(e) => {
            debug!(group_id = session.group_id, error = %e, "join requests not visible");
            Vec::new()
        }
    }
}

/// Approve or reject a pending join request.
///
/// An error is returned only when the server refused the answer.
pub async fn answer_join_request(
    api: &ApiClient,
    session: &Session,
    target_identifier: &str,
    action: JoinAction,
    ui: &impl Interaction,
) -> GroupCalResult<MemberChange> {
    session.require_admin("answer join requests")?;

    let prompt = format!(
        "{} the request from {}?",
        capitalize(action.verb()),
        target_identifier
    );
    if !ui.confirm(&prompt)? {
        return Ok(MemberChange::Declined);
    }

    let answer = JoinRequestAnswer {
        target_identifier: target_identifier.to_string(),
        action,
    };

    if let Err(e) = api.answer_join_request(session.group_id, &answer).await {
        error!(
            group_id = session.group_id,
            target_identifier,
            error = %e,
            "join request action failed"
        );
        ui.notify(Notice::Failure(format!(
            "Could not {} the request: {}",
            action.verb(),
            failure_message(&e)
        )));
        return Err(e);
    }

    ui.notify(Notice::Success(format!(
        "{} {}",
        match action {
            JoinAction::Approve => "Approved",
            JoinAction::Reject => "Rejected",
        },
        target_identifier
    )));

    Ok(refetch(api, session, ui).await)
}

/// Grant (`grant = true`) or revoke administrator rights.
///
/// The acting user's own membership cannot be changed here.
pub async fn set_representative(
    api: &ApiClient,
    session: &Session,
    target: &Membership,
    grant: bool,
    ui: &impl Interaction,
) -> GroupCalResult<MemberChange> {
    session.require_admin("change administrator roles")?;

    let user_id = target
        .user_id
        .ok_or_else(|| GroupCalError::MissingUserId(target.identifier()))?;

    if user_id == session.user_id() {
        return Err(GroupCalError::SelfRoleChange);
    }

    let update = MemberUpdate {
        accepted: true,
        is_representative: grant,
        target_identifier: target.identifier(),
    };

    if let Err(e) = api.update_member(session.group_id, user_id, &update).await {
        error!(group_id = session.group_id, user_id, error = %e, "role change failed");
        ui.notify(Notice::Failure(format!(
            "Could not update the role of {}:\n{}",
            target.display_name(),
            failure_message(&e)
        )));
        return Err(e);
    }

    ui.notify(Notice::Success(if grant {
        format!("{} is now an administrator", target.display_name())
    } else {
        format!("{} is no longer an administrator", target.display_name())
    }));

    Ok(refetch(api, session, ui).await)
}

/// Fetch the lists after a change the server has already applied. A
/// failure here does not undo the change, so it is reported, not returned.
async fn refetch(api: &ApiClient, session: &Session, ui: &impl Interaction) -> MemberChange {
    match reconcile(api, session).await {
        Ok(list) => MemberChange::Applied(list),
        Err(e) => {
            warn!(group_id = session.group_id, error = %e, "member list refresh failed");
            ui.notify(Notice::Failure(format!(
                "The change was saved, but the member list could not be refreshed: {}",
                failure_message(&e)
            )));
            MemberChange::AppliedUnrefreshed
        }
    }
}

/// The decoded server message for API errors, the error itself otherwise.
pub(crate) fn failure_message(e: &GroupCalError) -> String {
    match e {
        GroupCalError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
