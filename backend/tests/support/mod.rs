//! Shared wiring for end-to-end HTTP tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::TimeDelta;
use gear_catalog::Trace;
use gear_catalog::domain::{
    AccountService, CatalogSeeder, CatalogService, NewAccount, Role, SuggestionService,
};
use gear_catalog::inbound::http::api_scope;
use gear_catalog::inbound::http::state::HttpState;
use gear_catalog::outbound::memory::InMemoryStore;
use gear_catalog::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use mockable::DefaultClock;
use serde_json::Value;

pub const ADMIN: (&str, &str) = ("admin", "admin123");

/// HTTP state over a seeded in-memory store, wired the way the server does.
pub async fn seeded_state(with_sample_gear: bool) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher);
    let tokens = Arc::new(JwtTokenService::new(
        b"integration-secret",
        TimeDelta::hours(1),
        Arc::new(DefaultClock),
    ));
    let admin = NewAccount::try_from_parts(ADMIN.0, ADMIN.1, Role::Creator).expect("admin");
    CatalogSeeder::new(store.clone(), store.clone(), hasher.clone())
        .seed(&admin, with_sample_gear)
        .await
        .expect("seeding succeeds");

    let accounts = Arc::new(AccountService::new(store.clone(), hasher, tokens.clone()));
    HttpState {
        login: accounts.clone(),
        users: accounts,
        catalog: Arc::new(CatalogService::new(store.clone())),
        suggestions: Arc::new(SuggestionService::new(store, Arc::new(DefaultClock))),
        tokens,
    }
}

/// Build the application under test.
pub async fn app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// Send `req` and return status plus decoded JSON body.
pub async fn call<S, B>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Log in and return the bearer token.
pub async fn login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = call(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"]
        .as_str()
        .expect("access token")
        .to_owned()
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// A complete gear payload.
pub fn gear_json(name: &str, category: &str) -> Value {
    serde_json::json!({
        "name": name,
        "nickname": format!("{name} nick"),
        "gear_id": "424242",
        "image_url": "https://example.test/gear.png",
        "description": "integration gear",
        "category": category,
    })
}
