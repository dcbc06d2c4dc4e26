//! Bearer token extractor.
//!
//! Handlers that require a caller identity take [`AuthenticatedUser`] as an
//! argument. Handlers for anonymous actions simply omit it, so a token sent
//! to them is ignored rather than validated.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::ports::TokenServiceError;
use crate::domain::{Error, Principal};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity established from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Principal);

impl AuthenticatedUser {
    /// Verified principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(Error::unauthorized("malformed authorization header"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state not configured"))?;
    let token = bearer_token(req)?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| match err {
            TokenServiceError::Expired => {
                warn!("expired bearer token rejected");
                Error::token_expired("token expired")
            }
            TokenServiceError::Invalid { message } => {
                warn!(%message, "invalid bearer token rejected");
                Error::unauthorized("invalid token")
            }
            TokenServiceError::Issue { message } => {
                Error::internal(format!("token verification failed: {message}"))
            }
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
