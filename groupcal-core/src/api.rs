//! HTTP client for the group-scheduling backend.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::GroupCalConfig;
use crate::error::{GroupCalError, GroupCalResult};
use crate::failure::describe_failure;
use crate::members::{JoinRequestAnswer, MemberUpdate};
use crate::membership::{Membership, WireMembership, normalize};
use crate::reaction::ReactionUpdate;
use crate::task::{CreateTaskRequest, RescheduleRequest, Task};
use crate::user::User;
use crate::{GroupId, TaskId, UserId};

/// REST client. One instance per process; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> GroupCalResult<Self> {
        Url::parse(base_url)
            .map_err(|e| GroupCalError::Config(format!("Invalid api_url '{}': {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("groupcal/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &GroupCalConfig) -> GroupCalResult<Self> {
        Self::new(&config.api_url, config.token.clone(), config.timeout())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "request");

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and decode a JSON response.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GroupCalResult<T> {
        let resp = check_status(builder.send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Send a mutation; the response body is not needed.
    async fn submit<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> GroupCalResult<()> {
        check_status(builder.json(body).send().await?).await?;
        Ok(())
    }

    /// GET /me
    pub async fn me(&self) -> GroupCalResult<User> {
        self.fetch(self.request(Method::GET, "/me")).await
    }

    /// GET /groups/:id/members
    ///
    /// `accepted_only` is sent as a query parameter when given.
    pub async fn members(
        &self,
        group_id: GroupId,
        accepted_only: Option<bool>,
    ) -> GroupCalResult<Vec<Membership>> {
        let mut builder = self.request(Method::GET, &format!("/groups/{}/members", group_id));
        if let Some(accepted_only) = accepted_only {
            builder = builder.query(&[("accepted_only", accepted_only)]);
        }

        let wire: Vec<WireMembership> = self.fetch(builder).await?;
        Ok(normalize(wire))
    }

    /// PUT /groups/:id/join_requests
    pub async fn answer_join_request(
        &self,
        group_id: GroupId,
        answer: &JoinRequestAnswer,
    ) -> GroupCalResult<()> {
        let builder = self.request(Method::PUT, &format!("/groups/{}/join_requests", group_id));
        self.submit(builder, answer).await
    }

    /// PUT /groups/:id/members/:user_id
    ///
    /// The backend reads `target_identifier` from the query string as well
    /// as the body, so it is sent in both places.
    pub async fn update_member(
        &self,
        group_id: GroupId,
        user_id: UserId,
        update: &MemberUpdate,
    ) -> GroupCalResult<()> {
        let builder = self
            .request(Method::PUT, &format!("/groups/{}/members/{}", group_id, user_id))
            .query(&[("target_identifier", update.target_identifier.as_str())]);
        self.submit(builder, update).await
    }

    /// GET /groups/:id/tasks
    pub async fn tasks(&self, group_id: GroupId) -> GroupCalResult<Vec<Task>> {
        self.fetch(self.request(Method::GET, &format!("/groups/{}/tasks", group_id)))
            .await
    }

    /// POST /groups/:id/tasks/
    pub async fn create_task(
        &self,
        group_id: GroupId,
        task: &CreateTaskRequest,
    ) -> GroupCalResult<()> {
        let builder = self.request(Method::POST, &format!("/groups/{}/tasks/", group_id));
        self.submit(builder, task).await
    }

    /// PUT /groups/:id/tasks/:task_id
    pub async fn reschedule_task(
        &self,
        group_id: GroupId,
        task_id: TaskId,
        schedule: &RescheduleRequest,
    ) -> GroupCalResult<()> {
        let builder =
            self.request(Method::PUT, &format!("/groups/{}/tasks/{}", group_id, task_id));
        self.submit(builder, schedule).await
    }

    /// PUT /groups/:id/tasks/:task_id/reaction
    pub async fn set_reaction(
        &self,
        group_id: GroupId,
        task_id: TaskId,
        update: &ReactionUpdate,
    ) -> GroupCalResult<()> {
        let builder = self.request(
            Method::PUT,
            &format!("/groups/{}/tasks/{}/reaction", group_id, task_id),
        );
        self.submit(builder, update).await
    }
}

/// Turn a non-success response into `GroupCalError::Api` with a readable
/// message.
async fn check_status(resp: reqwest::Response) -> GroupCalResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "request failed");

    Err(GroupCalError::Api {
        status: status.as_u16(),
        message: describe_failure(&body),
    })
}
