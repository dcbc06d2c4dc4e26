//! Account domain service: login and account creation.
//!
//! Implements [`LoginService`] and [`UserAdministration`] on top of the
//! credential store, the password hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, TokenService, TokenServiceError,
    UserAdministration, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Action, Error, LoginCredentials, LoginOutcome, NewAccount, PasswordHash, Principal, User,
    authorize,
};

pub(crate) const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Argon2id PHC string with default parameters matching no account.
///
/// Verified against when the username is unknown, so both rejection paths
/// cost one hash check.
const UNKNOWN_ACCOUNT_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$Z2Vhci1jYXRhbG9nLTBwdw$kvBtyUeiH1A7i9YWsoDEAtXu465eN7nDBgDwEL+HAbI";

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { username } => {
            Error::username_taken(format!("username {username} is already registered"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("password hasher error: {error}"))
}

fn map_token_error(error: TokenServiceError) -> Error {
    Error::internal(format!("token issuer error: {error}"))
}

/// Account service implementing the authentication driving ports.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a service over the given collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let username = credentials.username();
        let stored = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        let Some(user) = stored else {
            self.hasher
                .verify(
                    credentials.password(),
                    &PasswordHash::new(UNKNOWN_ACCOUNT_HASH),
                )
                .await
                .map_err(map_hasher_error)?;
            warn!(username = %username, "login rejected");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            warn!(username = %username, "login rejected");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        let principal = Principal {
            username: user.username,
            role: user.role,
        };
        let token = self.tokens.issue(&principal).map_err(map_token_error)?;
        info!(username = %principal.username, role = %principal.role, "login succeeded");
        Ok(LoginOutcome {
            token,
            role: principal.role,
        })
    }
}

#[async_trait]
impl<U, H, T> UserAdministration for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn create_user(&self, actor: &Principal, account: &NewAccount) -> Result<(), Error> {
        authorize(actor.role, Action::CreateUser(account.role()))?;

        let password_hash = self
            .hasher
            .hash(account.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User {
            username: account.username().clone(),
            password_hash,
            role: account.role(),
        };
        self.users.insert(&user).await.map_err(map_repository_error)?;

        info!(
            created = %user.username,
            role = %user.role,
            by = %actor.username,
            "account created"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
