//! Tasks (calendar events) of a group.

use serde::{Deserialize, Serialize};

use crate::TaskId;
use crate::reaction::{Reaction, ReactionSummary};
use crate::task_time::TaskTime;
use crate::user::User;

/// Status sent for newly created tasks ("not started").
pub const NEW_TASK_STATUS: &str = "未着手";

/// A task as returned by `GET /groups/{g}/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_span_begin: Option<String>,
    #[serde(default)]
    pub time_span_end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub task_user_relations: Vec<Reaction>,
}

impl Task {
    /// Start of the task: `time_span_begin`, else `date`.
    pub fn start(&self) -> Option<TaskTime> {
        self.time_span_begin
            .as_deref()
            .or(self.date.as_deref())
            .and_then(|s| TaskTime::parse(s).ok())
    }

    pub fn end(&self) -> Option<TaskTime> {
        self.time_span_end
            .as_deref()
            .and_then(|s| TaskTime::parse(s).ok())
    }

    pub fn reactions_for(&self, acting_user: Option<&User>) -> ReactionSummary<'_> {
        ReactionSummary::for_user(&self.task_user_relations, acting_user)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Reaction>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Reaction>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /groups/{g}/tasks/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub date: String,
    pub time_span_begin: Option<String>,
    pub time_span_end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_task: bool,
    pub status: String,
}

/// Body of `PUT /groups/{g}/tasks/{t}` when a task is moved or resized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescheduleRequest {
    pub date: String,
    pub time_span_begin: Option<String>,
    pub time_span_end: Option<String>,
}
