//! Suggestion API handlers.
//!
//! ```text
//! POST   /api/suggestions              (anonymous)
//! GET    /api/suggestions
//! POST   /api/suggestions/{id}/approve
//! POST   /api/suggestions/{id}/reject
//! DELETE /api/suggestions/{id}
//! ```

use actix_web::{delete, get, post, web};

use crate::domain::{Error, GearDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::gear_dto::{
    GearCreatedResponse, GearPayload, SuggestionCreatedResponse, SuggestionResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::guarded_suggestion_id;

use super::MessageResponse;

/// Submit a suggestion. No token is needed and any token sent is ignored.
#[utoipa::path(
    post,
    path = "/api/suggestions",
    request_body = GearPayload,
    responses(
        (status = 200, description = "Suggestion recorded", body = SuggestionCreatedResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "submitSuggestion",
    security([])
)]
#[post("/suggestions")]
pub async fn submit_suggestion(
    state: web::Data<HttpState>,
    payload: web::Json<GearPayload>,
) -> ApiResult<web::Json<SuggestionCreatedResponse>> {
    let suggestion = state
        .suggestions
        .submit(GearDetails::from(payload.into_inner()))
        .await?;
    Ok(web::Json(SuggestionCreatedResponse {
        message: "suggestion submitted".to_owned(),
        id: *suggestion.id.as_uuid(),
    }))
}

/// List every suggestion with its status.
#[utoipa::path(
    get,
    path = "/api/suggestions",
    responses(
        (status = 200, description = "Suggestions", body = [SuggestionResponse]),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "listSuggestions"
)]
#[get("/suggestions")]
pub async fn list_suggestions(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<SuggestionResponse>>> {
    let suggestions = state.suggestions.list(user.principal()).await?;
    Ok(web::Json(
        suggestions
            .into_iter()
            .map(SuggestionResponse::from)
            .collect(),
    ))
}

/// Promote a pending suggestion into the catalogue.
#[utoipa::path(
    post,
    path = "/api/suggestions/{id}/approve",
    params(("id" = String, Path, description = "Suggestion identifier")),
    responses(
        (status = 200, description = "Suggestion approved", body = GearCreatedResponse),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Already decided", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "approveSuggestion"
)]
#[post("/suggestions/{id}/approve")]
pub async fn approve_suggestion(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<GearCreatedResponse>> {
    let id = guarded_suggestion_id(user.principal(), &path)?;
    let gear = state.suggestions.approve(user.principal(), &id).await?;
    Ok(web::Json(GearCreatedResponse {
        message: "suggestion approved".to_owned(),
        gear: gear.into(),
    }))
}

/// Decline a pending suggestion.
#[utoipa::path(
    post,
    path = "/api/suggestions/{id}/reject",
    params(("id" = String, Path, description = "Suggestion identifier")),
    responses(
        (status = 200, description = "Suggestion rejected", body = MessageResponse),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Already decided", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "rejectSuggestion"
)]
#[post("/suggestions/{id}/reject")]
pub async fn reject_suggestion(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = guarded_suggestion_id(user.principal(), &path)?;
    state.suggestions.reject(user.principal(), &id).await?;
    Ok(web::Json(MessageResponse::new("suggestion rejected")))
}

/// Remove a suggestion in any state.
#[utoipa::path(
    delete,
    path = "/api/suggestions/{id}",
    params(("id" = String, Path, description = "Suggestion identifier")),
    responses(
        (status = 200, description = "Suggestion deleted", body = MessageResponse),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["suggestions"],
    operation_id = "deleteSuggestion"
)]
#[delete("/suggestions/{id}")]
pub async fn delete_suggestion(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = guarded_suggestion_id(user.principal(), &path)?;
    state.suggestions.delete(user.principal(), &id).await?;
    Ok(web::Json(MessageResponse::new("suggestion deleted")))
}

#[cfg(test)]
#[path = "suggestions_tests.rs"]
mod tests;
