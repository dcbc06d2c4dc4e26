//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod gear;
pub mod gear_dto;
pub mod health;
pub mod state;
pub mod suggestions;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod validation;

use actix_web::{Scope, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use error::ApiResult;

/// Plain confirmation payload for mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The `/api` scope with every catalogue route registered.
///
/// Malformed JSON bodies and query strings are answered with
/// `invalid_request` payloads rather than Actix's plain-text errors.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use gear_catalog::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(|err, _| error::extractor_error(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| error::extractor_error(err)))
        .service(users::login)
        .service(users::create_user)
        .service(gear::list_gear)
        .service(gear::get_gear)
        .service(gear::create_gear)
        .service(gear::update_gear)
        .service(gear::delete_gear)
        .service(suggestions::submit_suggestion)
        .service(suggestions::list_suggestions)
        .service(suggestions::approve_suggestion)
        .service(suggestions::reject_suggestion)
        .service(suggestions::delete_suggestion)
}
