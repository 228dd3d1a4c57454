//! Member list reconciliation and administrator actions.

mod common;

use common::*;
use groupcal_core::GroupCalError;
use groupcal_core::interaction::Notice;
use groupcal_core::members::{self, JoinAction, MemberChange};
use groupcal_core::view::GroupView;
use groupcal_core::membership::find_member;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn member_never_sees_requests() {
    let server = MockServer::start().await;
    mount_me(&server, json!({"user_id": 2})).await;
    mount_members(&server, true, accepted_members(), 1).await;
    mount_members(&server, false, all_members(), 0).await;

    let (session, list) = members::load(&client(&server), GROUP).await.unwrap();
    assert!(!session.is_admin);
    assert_eq!(list.members.len(), 3);
    assert!(list.requests.is_empty());
}

#[tokio::test]
async fn admin_sees_only_unaccepted_requests() {
    let server = MockServer::start().await;
    mount_me(&server, json!({"user_id": 1})).await;
    mount_members(&server, true, accepted_members(), 1).await;
    mount_members(&server, false, all_members(), 1).await;

    let (session, list) = members::load(&client(&server), GROUP).await.unwrap();
    assert!(session.is_admin);

    let ids: Vec<_> = list.requests.iter().map(|m| m.user_id).collect();
    assert_eq!(ids, vec![Some(7), Some(8)]);
    assert_eq!(list.requests[1].identifier(), "mio@example.com");
}

#[tokio::test]
async fn forbidden_request_list_shows_nothing() {
    let server = MockServer::start().await;
    mount_members(&server, true, accepted_members(), 1).await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}/members", GROUP)))
        .and(query_param("accepted_only", "false"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Forbidden"})))
        .expect(1)
        .mount(&server)
        .await;

    let list = members::reconcile(&client(&server), &admin_session(1))
        .await
        .unwrap();
    assert_eq!(list.members.len(), 3);
    assert!(list.requests.is_empty());
}

#[tokio::test]
async fn granting_admin_sends_flag_and_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/groups/{}/members/9", GROUP)))
        .and(query_param("target_identifier", "nine@example.com"))
        .and(body_json(json!({
            "accepted": true,
            "is_representative": true,
            "target_identifier": "nine@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    mount_members(&server, true, accepted_members(), 1).await;
    mount_members(&server, false, all_members(), 1).await;

    let target = groupcal_core::Membership {
        user_id: Some(9),
        user_name: Some("Nao".into()),
        email: Some("nine@example.com".into()),
        accepted: true,
        is_representative: false,
    };
    let ui = Scripted::yes();
    let change =
        members::set_representative(&client(&server), &admin_session(1), &target, true, &ui)
            .await
            .unwrap();

    let MemberChange::Applied(list) = change else {
        panic!("expected fresh lists, got {:?}", change);
    };
    assert!(find_member(&list.members, 9).is_some());
    assert_eq!(
        ui.last_notice(),
        Some(Notice::Success("Nao is now an administrator".into()))
    );
}

#[tokio::test]
async fn role_change_failure_decodes_validation_errors() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/groups/{}/members/2", GROUP)))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "is_representative"], "msg": "value is not a valid boolean"},
                {"loc": ["query", "target_identifier"], "msg": "field required"}
            ]
        })))
        .mount(&server)
        .await;
    mount_members(&server, true, accepted_members(), 0).await;

    let target = groupcal_core::Membership {
        user_id: Some(2),
        user_name: Some("Ben".into()),
        email: Some("ben@example.com".into()),
        accepted: true,
        is_representative: true,
    };
    let ui = Scripted::yes();
    let err =
        members::set_representative(&client(&server), &admin_session(1), &target, false, &ui)
            .await
            .unwrap_err();

    assert!(matches!(err, GroupCalError::Api { status: 422, .. }));
    let notice = ui.last_notice().unwrap();
    assert!(matches!(notice, Notice::Failure(_)));
    assert_eq!(
        notice.message(),
        "Could not update the role of Ben:\n\
         is_representative: value is not a valid boolean\n\
         query.target_identifier: field required"
    );
}

#[tokio::test]
async fn own_role_and_non_admins_are_refused_locally() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client(&server);
    let me = groupcal_core::Membership {
        user_id: Some(1),
        user_name: None,
        email: None,
        accepted: true,
        is_representative: true,
    };
    let ui = Scripted::yes();

    let err = members::set_representative(&api, &admin_session(1), &me, false, &ui)
        .await
        .unwrap_err();
    assert!(matches!(err, GroupCalError::SelfRoleChange));

    let other = groupcal_core::Membership {
        user_id: Some(9),
        ..me
    };
    let err = members::set_representative(&api, &member_session(2), &other, true, &ui)
        .await
        .unwrap_err();
    assert!(matches!(err, GroupCalError::NotAdministrator(_)));
    assert!(ui.notices.borrow().is_empty());
}

#[tokio::test]
async fn approving_a_request_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/groups/{}/join_requests", GROUP)))
        .and(body_json(json!({"target_identifier": "kai@example.com", "action": "approve"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_members(&server, true, accepted_members(), 1).await;
    mount_members(&server, false, all_members(), 1).await;

    let ui = Scripted::yes();
    let change = members::answer_join_request(
        &client(&server),
        &admin_session(1),
        "kai@example.com",
        JoinAction::Approve,
        &ui,
    )
    .await
    .unwrap();

    let MemberChange::Applied(list) = change else {
        panic!("expected fresh lists, got {:?}", change);
    };
    assert_eq!(list.requests.len(), 2);
    assert_eq!(ui.prompts.borrow().len(), 1);
    assert_eq!(
        ui.last_notice(),
        Some(Notice::Success("Approved kai@example.com".into()))
    );
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ui = Scripted::no();
    let result = members::answer_join_request(
        &client(&server),
        &admin_session(1),
        "kai@example.com",
        JoinAction::Reject,
        &ui,
    )
    .await
    .unwrap();

    assert_eq!(result, MemberChange::Declined);
    assert!(ui.notices.borrow().is_empty());
}

#[tokio::test]
async fn failed_rejection_notifies_and_keeps_state() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/groups/{}/join_requests", GROUP)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_members(&server, true, accepted_members(), 0).await;

    let ui = Scripted::yes();
    let result = members::answer_join_request(
        &client(&server),
        &admin_session(1),
        "kai@example.com",
        JoinAction::Reject,
        &ui,
    )
    .await;

    assert!(matches!(result, Err(GroupCalError::Api { status: 500, .. })));
    assert_eq!(
        ui.last_notice(),
        Some(Notice::Failure(
            "Could not reject the request: The server rejected the request".into()
        ))
    );
}

#[tokio::test]
async fn applied_answer_survives_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/groups/{}/join_requests", GROUP)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}/members", GROUP)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let ui = Scripted::yes();
    let change = members::answer_join_request(
        &client(&server),
        &admin_session(1),
        "kai@example.com",
        JoinAction::Approve,
        &ui,
    )
    .await
    .unwrap();

    assert_eq!(change, MemberChange::AppliedUnrefreshed);
    let notices = ui.notices.borrow();
    assert_eq!(notices[0], Notice::Success("Approved kai@example.com".into()));
    assert_eq!(
        notices[1],
        Notice::Failure(
            "The change was saved, but the member list could not be refreshed: \
             The server rejected the request"
                .into()
        )
    );
}

#[tokio::test]
async fn unauthorized_members_page_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/groups/{}/members", GROUP)))
        .and(query_param("accepted_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted_members()))
        .mount(&server)
        .await;
    mount_members(&server, false, all_members(), 0).await;

    let err = members::load(&client(&server), GROUP).await.unwrap_err();
    assert!(err.is_unauthorized());

    let view = GroupView::new(client(&server), GROUP);
    assert!(view.refresh_members().await.unwrap_err().is_unauthorized());
    assert!(view.session().is_none());
    assert!(view.members().is_none());
    assert!(!view.is_admin());
}
