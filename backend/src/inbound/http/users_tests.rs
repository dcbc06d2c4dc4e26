//! Tests for authentication and account handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::USERNAME_MAX;
use crate::inbound::http::test_utils::Harness;

async fn post_json(
    harness: &Harness,
    uri: &str,
    auth: Option<String>,
    body: Value,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(harness.app()).await;
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(value) = auth {
        request = request.insert_header((AUTHORIZATION, value));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn bootstrap_admin_logs_in_as_creator() {
    let harness = Harness::new();
    harness.add_user("admin", "admin123", Role::Creator).await;

    let (status, body) = post_json(
        &harness,
        "/api/auth/login",
        None,
        json!({ "username": "admin", "password": "admin123" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: LoginResponse = serde_json::from_value(body).expect("login response");
    assert_eq!(response.role, Role::Creator);
    assert_eq!(response.token_type, "bearer");
    let principal = harness
        .state
        .tokens
        .verify(&response.access_token)
        .expect("token verifies");
    assert_eq!(principal.username.as_ref(), "admin");
}

#[rstest]
#[case("admin", "wrong")]
#[case("ghost", "admin123")]
#[actix_web::test]
async fn bad_credentials_are_indistinguishable(#[case] username: &str, #[case] password: &str) {
    let harness = Harness::new();
    harness.add_user("admin", "admin123", Role::Creator).await;

    let (status, body) = post_json(
        &harness,
        "/api/auth/login",
        None,
        json!({ "username": username, "password": password }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_credentials");
    assert_eq!(body["message"], "invalid username or password");
}

#[rstest]
#[case(json!({ "username": "   ", "password": "pw" }))]
#[case(json!({ "username": "admin", "password": "" }))]
#[case(json!({ "username": "a".repeat(USERNAME_MAX + 1), "password": "pw" }))]
#[actix_web::test]
async fn malformed_login_fields_are_bad_credentials(#[case] body: Value) {
    let harness = Harness::new();
    harness.add_user("admin", "admin123", Role::Creator).await;
    let (status, payload) = post_json(&harness, "/api/auth/login", None, body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["code"], "invalid_credentials");
    assert_eq!(payload["message"], "invalid username or password");
}

#[rstest]
#[actix_web::test]
async fn missing_login_fields_are_invalid_requests() {
    let harness = Harness::new();
    let (status, payload) =
        post_json(&harness, "/api/auth/login", None, json!({ "username": "admin" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "invalid_request");
}

#[rstest]
#[case(Role::Creator, "manager", StatusCode::OK)]
#[case(Role::Manager, "moderator", StatusCode::OK)]
#[case(Role::Manager, "manager", StatusCode::FORBIDDEN)]
#[case(Role::Moderator, "moderator", StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn account_creation_follows_the_role_table(
    #[case] caller: Role,
    #[case] requested: &str,
    #[case] expected: StatusCode,
) {
    let harness = Harness::new();
    let (status, _) = post_json(
        &harness,
        "/api/auth/create-user",
        Some(harness.bearer("boss", caller)),
        json!({ "username": "newbie", "password": "pw", "role": requested }),
    )
    .await;
    assert_eq!(status, expected);
}

#[rstest]
#[actix_web::test]
async fn managers_minting_managers_get_role_not_permitted() {
    let harness = Harness::new();
    let (_, body) = post_json(
        &harness,
        "/api/auth/create-user",
        Some(harness.bearer("boss", Role::Manager)),
        json!({ "username": "newbie", "password": "pw", "role": "creator" }),
    )
    .await;
    assert_eq!(body["code"], "role_not_permitted");
}

#[rstest]
#[actix_web::test]
async fn created_accounts_can_log_in_and_names_stay_unique() {
    let harness = Harness::new();
    let creator = harness.bearer("root", Role::Creator);
    let account = json!({ "username": "mod1", "password": "secret", "role": "responsable" });

    let (status, body) = post_json(
        &harness,
        "/api/auth/create-user",
        Some(creator.clone()),
        account.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "user mod1 created");

    let (status, body) =
        post_json(&harness, "/api/auth/create-user", Some(creator), account).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "username_taken");

    let (status, body) = post_json(
        &harness,
        "/api/auth/login",
        None,
        json!({ "username": "mod1", "password": "secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "manager");
}

#[rstest]
#[actix_web::test]
async fn account_creation_requires_a_token() {
    let harness = Harness::new();
    let (status, body) = post_json(
        &harness,
        "/api/auth/create-user",
        None,
        json!({ "username": "x", "password": "pw", "role": "moderator" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn unknown_roles_are_invalid_requests() {
    let harness = Harness::new();
    let (status, body) = post_json(
        &harness,
        "/api/auth/create-user",
        Some(harness.bearer("root", Role::Creator)),
        json!({ "username": "x", "password": "pw", "role": "overlord" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}
