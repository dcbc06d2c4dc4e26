//! HS256 JWT implementation of the token port.
//!
//! Claims carry the username, the role, and `iat`/`exp` as Unix seconds.
//! Expiry is checked against the injected clock rather than the system time
//! so tests can move time forward.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{IssuedToken, Principal, Role, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    role: Role,
    #[serde(default)]
    iat: i64,
    exp: i64,
}

/// Issues and verifies HMAC-SHA256 signed bearer tokens.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`; tokens live for `ttl`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenServiceError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenServiceError::issue("token expiry overflows"))?;
        let claims = Claims {
            username: principal.username.to_string(),
            role: principal.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::issue(err.to_string()))?;
        Ok(IssuedToken::new(token, expires_at))
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &Self::validation()).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenServiceError::expired(),
                _ => TokenServiceError::invalid(err.to_string()),
            },
        )?;
        let claims = data.claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenServiceError::expired());
        }
        let username = Username::new(&claims.username)
            .map_err(|err| TokenServiceError::invalid(err.to_string()))?;
        Ok(Principal {
            username,
            role: claims.role,
        })
    }
}
