//! Authentication and account API handlers.
//!
//! ```text
//! POST /api/auth/login {"username":"admin","password":"admin123"}
//! POST /api/auth/create-user {"username":"mod1","password":"pw","role":"moderator"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, INVALID_CREDENTIALS, LoginCredentials, NewAccount, Role, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_user_validation_error;

use super::MessageResponse;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Account name; surrounding whitespace is ignored.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = UserValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub access_token: String,
    /// Always `bearer`.
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Role carried by the token.
    pub role: Role,
}

/// Account creation request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Requested account name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Role to grant; must be one the caller may create.
    pub role: Role,
}

impl TryFrom<CreateUserRequest> for NewAccount {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password, value.role)
    }
}

/// Exchange credentials for a bearer token.
///
/// Unknown users and wrong passwords fail identically.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Malformed body", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    // Malformed credentials can never match an account.
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|_| Error::invalid_credentials(INVALID_CREDENTIALS))?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        access_token: outcome.token.as_str().to_owned(),
        token_type: "bearer".to_owned(),
        role: outcome.role,
    }))
}

/// Create an account. Managers may only create moderators.
#[utoipa::path(
    post,
    path = "/api/auth/create-user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid request or username taken", body = Error),
        (status = 401, description = "Missing or expired token", body = Error),
        (status = 403, description = "Role not permitted", body = Error)
    ),
    tags = ["auth"],
    operation_id = "createUser"
)]
#[post("/auth/create-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let account = NewAccount::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    state.users.create_user(user.principal(), &account).await?;
    Ok(web::Json(MessageResponse::new(format!(
        "user {} created",
        account.username()
    ))))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
