//! Authentication primitives: credentials, verified identities and tokens.
//!
//! Inbound adapters build these through validating constructors before
//! talking to a service, so the domain never sees unchecked strings.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::{Role, UserValidationError, Username};

/// Validated login credentials.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use gear_catalog::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").expect("valid");
/// assert_eq!(creds.username().as_ref(), "admin");
/// assert_eq!(creds.password(), "admin123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        let username = Username::new(username)?;
        Ok(Self {
            username,
            password: non_empty_password(password)?,
        })
    }

    /// Normalised username for lookups.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    username: Username,
    password: Zeroizing<String>,
    role: Role,
}

impl NewAccount {
    /// Validate the raw account fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: non_empty_password(password)?,
            role,
        })
    }

    /// Requested username.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password awaiting hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

fn non_empty_password(password: &str) -> Result<Zeroizing<String>, UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Identity asserted by a verified bearer token.
///
/// The role is trusted as issued; it is not re-read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account name embedded in the token.
    pub username: Username,
    /// Role embedded in the token.
    pub role: Role,
}

/// Signed bearer credential handed back on login.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Wrap an encoded token and its absolute expiry.
    #[must_use]
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: Zeroizing::new(token),
            expires_at,
        }
    }

    /// Encoded bearer credential.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.token.as_str()
    }

    /// Instant after which verification fails.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Bearer credential for subsequent requests.
    pub token: IssuedToken,
    /// Role of the authenticated account.
    pub role: Role,
}
