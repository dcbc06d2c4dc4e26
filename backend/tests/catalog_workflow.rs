//! End-to-end scenarios over the HTTP API with the in-memory store.
//!
//! Each test wires the real services exactly as the server does and drives
//! them through `api_scope`, so routing, extraction, authorization and error
//! mapping are exercised together.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::json;

use support::{ADMIN, app, bearer, call, gear_json, login, seeded_state};

#[rstest]
#[actix_web::test]
async fn anonymous_suggestion_is_promoted_by_a_manager() {
    let app = app(seeded_state(false).await).await;
    let admin = login(&app, ADMIN.0, ADMIN.1).await;

    let (status, _) = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&admin))
            .set_json(json!({ "username": "mgr", "password": "pw", "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let manager = login(&app, "mgr", "pw").await;

    let (status, created) = call(
        &app,
        TestRequest::post()
            .uri("/api/suggestions")
            .set_json(gear_json("Comet Blade", "events")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let suggestion_id = created["id"].as_str().expect("suggestion id").to_owned();

    let (status, pending) = call(
        &app,
        TestRequest::get()
            .uri("/api/suggestions")
            .insert_header(bearer(&manager)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending[0]["status"], "pending");

    let (status, approved) = call(
        &app,
        TestRequest::post()
            .uri(&format!("/api/suggestions/{suggestion_id}/approve"))
            .insert_header(bearer(&manager)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let gear_id = approved["gear"]["id"].as_str().expect("gear id").to_owned();
    assert_ne!(gear_id, suggestion_id);

    let (status, gear) = call(&app, TestRequest::get().uri(&format!("/api/gears/{gear_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gear["name"], "Comet Blade");
    assert_eq!(gear["external_gear_id"], "424242");

    let (status, again) = call(
        &app,
        TestRequest::post()
            .uri(&format!("/api/suggestions/{suggestion_id}/approve"))
            .insert_header(bearer(&manager)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(again["code"], "conflict");

    let (_, listed) = call(&app, TestRequest::get().uri("/api/gears?category=events")).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn moderators_read_but_cannot_curate() {
    let app = app(seeded_state(true).await).await;
    let admin = login(&app, ADMIN.0, ADMIN.1).await;
    call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&admin))
            .set_json(json!({ "username": "mod", "password": "pw", "role": "moderator" })),
    )
    .await;
    let moderator = login(&app, "mod", "pw").await;

    let (status, catalogue) = call(&app, TestRequest::get().uri("/api/gears")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalogue.as_array().map(Vec::len), Some(8));

    let (status, body) = call(
        &app,
        TestRequest::post()
            .uri("/api/gears")
            .insert_header(bearer(&moderator))
            .set_json(gear_json("Contraband", "forbidden")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = call(
        &app,
        TestRequest::get()
            .uri("/api/suggestions")
            .insert_header(bearer(&moderator)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&moderator))
            .set_json(json!({ "username": "x", "password": "pw", "role": "moderator" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[actix_web::test]
async fn managers_may_only_mint_moderators() {
    let app = app(seeded_state(false).await).await;
    let admin = login(&app, ADMIN.0, ADMIN.1).await;
    call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&admin))
            .set_json(json!({ "username": "boss", "password": "pw", "role": "manager" })),
    )
    .await;
    let manager = login(&app, "boss", "pw").await;

    let (status, body) = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&manager))
            .set_json(json!({ "username": "boss2", "password": "pw", "role": "creator" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "role_not_permitted");

    let (status, _) = call(
        &app,
        TestRequest::post()
            .uri("/api/auth/create-user")
            .insert_header(bearer(&manager))
            .set_json(json!({ "username": "helper", "password": "pw", "role": "moderator" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn curated_gear_can_be_edited_and_removed() {
    let app = app(seeded_state(false).await).await;
    let admin = login(&app, ADMIN.0, ADMIN.1).await;

    let (status, created) = call(
        &app,
        TestRequest::post()
            .uri("/api/gears")
            .insert_header(bearer(&admin))
            .set_json(gear_json("Hammer", "players")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["gear"]["id"].as_str().expect("gear id").to_owned();

    let (status, _) = call(
        &app,
        TestRequest::put()
            .uri(&format!("/api/gears/{id}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "category": "events" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, gear) = call(&app, TestRequest::get().uri(&format!("/api/gears/{id}"))).await;
    assert_eq!(gear["category"], "events");
    assert_eq!(gear["name"], "Hammer");

    let (status, _) = call(
        &app,
        TestRequest::delete()
            .uri(&format!("/api/gears/{id}"))
            .insert_header(bearer(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, TestRequest::get().uri(&format!("/api/gears/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("/api/gears", "POST")]
#[case("/api/suggestions", "GET")]
#[case("/api/auth/create-user", "POST")]
#[actix_web::test]
async fn protected_routes_require_a_token(#[case] uri: &str, #[case] method: &str) {
    let app = app(seeded_state(false).await).await;
    let req = match method {
        "POST" => TestRequest::post().set_json(json!({})),
        _ => TestRequest::get(),
    }
    .uri(uri);

    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn garbage_tokens_are_rejected() {
    let app = app(seeded_state(false).await).await;
    let (status, body) = call(
        &app,
        TestRequest::get()
            .uri("/api/suggestions")
            .insert_header(bearer("not-a-jwt")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}
