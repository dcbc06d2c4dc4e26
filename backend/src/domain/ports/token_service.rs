//! Port for issuing and verifying bearer tokens.

use crate::domain::{IssuedToken, Principal};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenServiceError {
        /// The token was well formed but its expiry has passed.
        Expired => "token expired",
        /// The token is malformed, carries a bad signature or bad claims.
        Invalid { message: String } => "token invalid: {message}",
        /// A token could not be produced.
        Issue { message: String } => "token issue failed: {message}",
    }
}

/// Signed, time-limited identity tokens.
///
/// Verification is stateless: the returned [`Principal`] is trusted as-is.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token embedding the principal and an absolute expiry.
    fn issue(&self, principal: &Principal) -> Result<IssuedToken, TokenServiceError>;

    /// Verify a token and recover its principal.
    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError>;
}
