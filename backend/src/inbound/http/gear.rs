//! Gear catalogue API handlers.
//!
//! ```text
//! GET    /api/gears?category=events
//! GET    /api/gears/{id}
//! POST   /api/gears
//! PUT    /api/gears/{id}
//! DELETE /api/gears/{id}
//! ```
//!
//! Reads are public. Mutations require a manager or creator token.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Deserializer, de};
use utoipa::IntoParams;

use crate::domain::{Category, Error, GearDetails, GearPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::gear_dto::{
    GearCreatedResponse, GearPatchPayload, GearPayload, GearResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{guarded_gear_id, parse_gear_id};

use super::MessageResponse;

/// Optional catalogue filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GearListQuery {
    /// Restrict the listing to one category. An empty value lists everything.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<Category>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// List gear, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/gears",
    params(GearListQuery),
    responses(
        (status = 200, description = "Gear", body = [GearResponse]),
        (status = 400, description = "Unknown category", body = Error)
    ),
    tags = ["gear"],
    operation_id = "listGear",
    security([])
)]
#[get("/gears")]
pub async fn list_gear(
    state: web::Data<HttpState>,
    query: web::Query<GearListQuery>,
) -> ApiResult<web::Json<Vec<GearResponse>>> {
    let gear = state.catalog.list(query.into_inner().category).await?;
    Ok(web::Json(gear.into_iter().map(GearResponse::from).collect()))
}

/// Fetch one gear record.
#[utoipa::path(
    get,
    path = "/api/gears/{id}",
    params(("id" = String, Path, description = "Gear identifier")),
    responses(
        (status = 200, description = "Gear", body = GearResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["gear"],
    operation_id = "getGear",
    security([])
)]
#[get("/gears/{id}")]
pub async fn get_gear(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GearResponse>> {
    let id = parse_gear_id(&path)?;
    let gear = state.catalog.get(&id).await?;
    Ok(web::Json(gear.into()))
}

/// Add a gear record.
#[utoipa::path(
    post,
    path = "/api/gears",
    request_body = GearPayload,
    responses(
        (status = 200, description = "Gear created", body = GearCreatedResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["gear"],
    operation_id = "createGear"
)]
#[post("/gears")]
pub async fn create_gear(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<GearPayload>,
) -> ApiResult<web::Json<GearCreatedResponse>> {
    let details = GearDetails::from(payload.into_inner());
    let gear = state.catalog.create(user.principal(), details).await?;
    Ok(web::Json(GearCreatedResponse {
        message: "gear created".to_owned(),
        gear: gear.into(),
    }))
}

/// Merge the supplied fields into a gear record.
#[utoipa::path(
    put,
    path = "/api/gears/{id}",
    params(("id" = String, Path, description = "Gear identifier")),
    request_body = GearPatchPayload,
    responses(
        (status = 200, description = "Gear updated", body = MessageResponse),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["gear"],
    operation_id = "updateGear"
)]
#[put("/gears/{id}")]
pub async fn update_gear(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<GearPatchPayload>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = guarded_gear_id(user.principal(), &path)?;
    let patch = GearPatch::from(payload.into_inner());
    state.catalog.update(user.principal(), &id, &patch).await?;
    Ok(web::Json(MessageResponse::new("gear updated")))
}

/// Remove a gear record.
#[utoipa::path(
    delete,
    path = "/api/gears/{id}",
    params(("id" = String, Path, description = "Gear identifier")),
    responses(
        (status = 200, description = "Gear deleted", body = MessageResponse),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["gear"],
    operation_id = "deleteGear"
)]
#[delete("/gears/{id}")]
pub async fn delete_gear(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = guarded_gear_id(user.principal(), &path)?;
    state.catalog.delete(user.principal(), &id).await?;
    Ok(web::Json(MessageResponse::new("gear deleted")))
}

#[cfg(test)]
#[path = "gear_tests.rs"]
mod tests;
