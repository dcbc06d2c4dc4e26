//! Port for the credential store.

use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// An account with the same username already exists.
        Duplicate { username: String } => "username already registered: {username}",
    }
}

/// Persistence contract for accounts, keyed by username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up an account by its unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new account.
    ///
    /// Fails with [`UserRepositoryError::Duplicate`] when the username is
    /// taken; existing accounts are never overwritten.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;
}
