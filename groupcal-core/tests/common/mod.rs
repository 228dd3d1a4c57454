//! Shared fixtures for the HTTP-level tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Duration;

use groupcal_core::api::ApiClient;
use groupcal_core::error::GroupCalResult;
use groupcal_core::interaction::{Interaction, Notice};
use groupcal_core::{Membership, Session, User};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GROUP: i64 = 10;

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Some("t0ken".into()), Duration::from_secs(5)).unwrap()
}

/// Interaction that answers every confirmation the same way and records
/// notices.
pub struct Scripted {
    answer: bool,
    pub prompts: RefCell<Vec<String>>,
    pub notices: RefCell<Vec<Notice>>,
}

impl Scripted {
    pub fn yes() -> Self {
        Self::answering(true)
    }

    pub fn no() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Scripted {
            answer,
            prompts: RefCell::new(Vec::new()),
            notices: RefCell::new(Vec::new()),
        }
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Interaction for Scripted {
    fn confirm(&self, prompt: &str) -> GroupCalResult<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.answer)
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

pub fn admin_session(user_id: i64) -> Session {
    let me = Membership {
        user_id: Some(user_id),
        user_name: None,
        email: None,
        accepted: true,
        is_representative: true,
    };
    Session::new(User::new(user_id), GROUP, &[me])
}

pub fn member_session(user_id: i64) -> Session {
    Session::new(User::new(user_id), GROUP, &[])
}

pub async fn mount_me(server: &MockServer, me: Value) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me))
        .mount(server)
        .await;
}

/// Mount `GET /groups/{GROUP}/members?accepted_only=..`.
pub async fn mount_members(server: &MockServer, accepted_only: bool, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}/members", GROUP)))
        .and(query_param("accepted_only", accepted_only.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

pub fn accepted_members() -> Value {
    json!([
        {"user_id": 1, "user_name": "Aki", "email": "aki@example.com", "accepted": true, "is_representative": true},
        {"user": {"user_id": 2, "user_name": "Ben", "email": "ben@example.com"}, "accepted": true, "is_representative": false},
        {"user_id": 9, "user_name": "Nao", "email": "nine@example.com", "accepted": true, "is_representative": false}
    ])
}

pub fn all_members() -> Value {
    json!([
        {"user_id": 1, "user_name": "Aki", "email": "aki@example.com", "accepted": true, "is_representative": true},
        {"user_id": 7, "user_name": "Kai", "email": "kai@example.com", "accepted": false},
        {"user": {"user_id": 8, "email": "mio@example.com"}}
    ])
}
