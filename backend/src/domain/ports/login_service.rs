//! Driving ports for authentication and account administration.
//!
//! Inbound adapters call these without knowing which store or hasher sits
//! behind them, so handler tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome, NewAccount, Principal};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a bearer token.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `invalid_credentials`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdministration: Send + Sync {
    /// Register `account` on behalf of `actor`.
    ///
    /// The requested role is checked against the actor's privileges before
    /// anything is hashed or stored.
    async fn create_user(&self, actor: &Principal, account: &NewAccount) -> Result<(), Error>;
}
