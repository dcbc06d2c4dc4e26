//! Tests for gear catalogue handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Role;
use crate::inbound::http::test_utils::Harness;

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn sword() -> Value {
    json!({
        "name": "Sword of Light",
        "nickname": "Épée Lumière",
        "external_gear_id": "123456789",
        "image_url": "https://tr.rbxcdn.com/sword/420/420/Hat/Png",
        "description": "Une épée brillante ",
        "category": "players"
    })
}

async fn send(
    harness: &Harness,
    request: actix_test::TestRequest,
    auth: Option<String>,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(harness.app()).await;
    let request = match auth {
        Some(value) => request.insert_header((AUTHORIZATION, value)),
        None => request,
    };
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&body).expect("JSON body"))
}

async fn create(harness: &Harness, body: Value) -> GearResponse {
    let (status, payload) = send(
        harness,
        actix_test::TestRequest::post().uri("/api/gears").set_json(body),
        Some(harness.bearer("curator", Role::Manager)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["message"], "gear created");
    serde_json::from_value(payload["gear"].clone()).expect("gear payload")
}

#[rstest]
#[actix_web::test]
async fn created_gear_round_trips_through_get_and_list(harness: Harness) {
    let created = create(&harness, sword()).await;

    let (status, fetched) = send(
        &harness,
        actix_test::TestRequest::get().uri(&format!("/api/gears/{}", created.id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fetched: GearResponse = serde_json::from_value(fetched).expect("gear");
    assert_eq!(fetched, created);
    assert_eq!(fetched.description, "Une épée brillante ");

    let (_, listed) = send(
        &harness,
        actix_test::TestRequest::get().uri("/api/gears?category=players"),
        None,
    )
    .await;
    let listed: Vec<GearResponse> = serde_json::from_value(listed).expect("list");
    assert_eq!(listed, vec![created]);

    let (_, events) = send(
        &harness,
        actix_test::TestRequest::get().uri("/api/gears?category=events"),
        None,
    )
    .await;
    assert_eq!(events, json!([]));
}

#[rstest]
#[case("/api/gears?category=")]
#[case("/api/gears?category=%20")]
#[actix_web::test]
async fn blank_category_filter_lists_everything(harness: Harness, #[case] uri: &str) {
    let created = create(&harness, sword()).await;

    let (status, body) = send(&harness, actix_test::TestRequest::get().uri(uri), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<GearResponse> = serde_json::from_value(body).expect("list");
    assert_eq!(listed, vec![created]);
}

#[rstest]
#[actix_web::test]
async fn unknown_category_filter_is_invalid(harness: Harness) {
    let (status, body) = send(
        &harness,
        actix_test::TestRequest::get().uri("/api/gears?category=weapons"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case("/api/gears/00000000-0000-0000-0000-000000000000")]
#[case("/api/gears/not-a-uuid")]
#[actix_web::test]
async fn unknown_ids_are_not_found(harness: Harness, #[case] uri: &str) {
    let (status, body) = send(&harness, actix_test::TestRequest::get().uri(uri), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn moderators_cannot_create_gear(harness: Harness) {
    let (status, body) = send(
        &harness,
        actix_test::TestRequest::post()
            .uri("/api/gears")
            .set_json(sword()),
        Some(harness.bearer("mod", Role::Moderator)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case(Role::Moderator, StatusCode::FORBIDDEN)]
#[case(Role::Creator, StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn malformed_ids_are_policed_before_lookup(
    harness: Harness,
    #[case] role: Role,
    #[case] expected: StatusCode,
) {
    let token = harness.bearer("someone", role);
    for request in [
        actix_test::TestRequest::put()
            .uri("/api/gears/not-a-uuid")
            .set_json(json!({ "name": "Renamed" })),
        actix_test::TestRequest::delete().uri("/api/gears/not-a-uuid"),
    ] {
        let (status, body) = send(&harness, request, Some(token.clone())).await;
        assert_eq!(status, expected);
        assert_ne!(body["code"], "invalid_request");
    }
}

#[rstest]
#[actix_web::test]
async fn anonymous_mutations_are_unauthorized(harness: Harness) {
    let (status, _) = send(
        &harness,
        actix_test::TestRequest::delete().uri("/api/gears/00000000-0000-0000-0000-000000000000"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn partial_update_touches_only_named_fields(harness: Harness) {
    let created = create(&harness, sword()).await;
    let uri = format!("/api/gears/{}", created.id);

    let (status, body) = send(
        &harness,
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "description": "Plus brillante", "name": null })),
        Some(harness.bearer("boss", Role::Creator)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "gear updated");

    let (_, fetched) = send(&harness, actix_test::TestRequest::get().uri(&uri), None).await;
    let fetched: GearResponse = serde_json::from_value(fetched).expect("gear");
    assert_eq!(
        fetched,
        GearResponse {
            description: "Plus brillante".to_owned(),
            ..created
        }
    );
}

#[rstest]
#[actix_web::test]
async fn deleted_gear_is_gone(harness: Harness) {
    let created = create(&harness, sword()).await;
    let uri = format!("/api/gears/{}", created.id);
    let manager = harness.bearer("curator", Role::Manager);

    let (status, _) = send(
        &harness,
        actix_test::TestRequest::delete().uri(&uri),
        Some(manager.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (again, _) = send(
        &harness,
        actix_test::TestRequest::delete().uri(&uri),
        Some(manager),
    )
    .await;
    assert_eq!(again, StatusCode::NOT_FOUND);
}
