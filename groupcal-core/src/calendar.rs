//! Task operations on a group calendar: listing, creating, rescheduling
//! and reacting.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use tracing::error;

use crate::api::ApiClient;
use crate::error::GroupCalResult;
use crate::interaction::{Interaction, Notice};
use crate::members::failure_message;
use crate::reaction::{ReactionKind, ReactionUpdate};
use crate::session::Session;
use crate::task::{CreateTaskRequest, NEW_TASK_STATUS, RescheduleRequest, Task};
use crate::{GroupId, TaskId};

/// Input for a new task, as entered by an administrator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl NewTask {
    /// Times are sent as naive `{date}T{HH:MM}:00` strings.
    pub fn to_request(&self) -> CreateTaskRequest {
        let date = self.date.format("%Y-%m-%d").to_string();
        let span = |time: Option<NaiveTime>| {
            time.map(|t| format!("{}T{}:00", date, t.format("%H:%M")))
        };

        CreateTaskRequest {
            title: self.title.clone(),
            date: date.clone(),
            time_span_begin: span(self.start_time),
            time_span_end: span(self.end_time),
            location: self.location.clone(),
            description: self.description.clone(),
            is_task: true,
            status: NEW_TASK_STATUS.to_string(),
        }
    }
}

/// Why a reschedule was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    NotAdministrator,
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RescheduleOutcome {
    /// The server accepted the new time; holds the re-fetched task list.
    Applied(Vec<Task>),
    /// The task keeps its old time.
    Reverted(RevertReason),
}

/// Body for moving a task to `start`..`end`, both sent as UTC ISO-8601
/// with millisecond precision. `date` is the UTC day of `start`.
pub fn reschedule_request(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> RescheduleRequest {
    let iso = |dt: DateTime<Utc>| dt.to_rfc3339_opts(SecondsFormat::Millis, true);

    RescheduleRequest {
        date: start.format("%Y-%m-%d").to_string(),
        time_span_begin: Some(iso(start)),
        time_span_end: end.map(iso),
    }
}

pub async fn list_tasks(api: &ApiClient, group_id: GroupId) -> GroupCalResult<Vec<Task>> {
    api.tasks(group_id).await
}

/// Create a task (administrators only) and return the refreshed list.
pub async fn create_task(
    api: &ApiClient,
    session: &Session,
    task: &NewTask,
    ui: &impl Interaction,
) -> GroupCalResult<Vec<Task>> {
    session.require_admin("create tasks")?;

    if let Err(e) = api.create_task(session.group_id, &task.to_request()).await {
        error!(group_id = session.group_id, error = %e, "creating task failed");
        ui.notify(Notice::Failure(format!(
            "Could not create the task: {}",
            failure_message(&e)
        )));
        return Err(e);
    }

    ui.notify(Notice::Success(format!("Created: {}", task.title)));
    api.tasks(session.group_id).await
}

/// Move or resize a task.
///
/// Non-administrators are reverted without a request. Everyone else is
/// asked to confirm first; declining or a failed request reverts.
pub async fn reschedule_task(
    api: &ApiClient,
    session: &Session,
    task: &Task,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    ui: &impl Interaction,
) -> GroupCalResult<RescheduleOutcome> {
    if !session.is_admin {
        return Ok(RescheduleOutcome::Reverted(RevertReason::NotAdministrator));
    }

    if !ui.confirm(&format!("Reschedule \"{}\"?", task.title))? {
        return Ok(RescheduleOutcome::Reverted(RevertReason::Cancelled));
    }

    let request = reschedule_request(start, end);
    if let Err(e) = api
        .reschedule_task(session.group_id, task.task_id, &request)
        .await
    {
        error!(task_id = task.task_id, error = %e, "rescheduling failed");
        let message = failure_message(&e);
        ui.notify(Notice::Failure(format!("Could not reschedule: {}", message)));
        return Ok(RescheduleOutcome::Reverted(RevertReason::Failed(message)));
    }

    Ok(RescheduleOutcome::Applied(api.tasks(session.group_id).await?))
}

/// Record the acting user's reaction to a task and return the refreshed
/// list. Submitting the same reaction again leaves the same state.
pub async fn submit_reaction(
    api: &ApiClient,
    group_id: GroupId,
    task_id: TaskId,
    reaction: ReactionKind,
    comment: Option<String>,
    ui: &impl Interaction,
) -> GroupCalResult<Vec<Task>> {
    let update = ReactionUpdate {
        reaction,
        comment: comment.unwrap_or_default(),
    };

    if let Err(e) = api.set_reaction(group_id, task_id, &update).await {
        error!(task_id, error = %e, "reaction update failed");
        ui.notify(Notice::Failure(format!(
            "Could not update your reaction: {}",
            failure_message(&e)
        )));
        return Err(e);
    }

    api.tasks(group_id).await
}
