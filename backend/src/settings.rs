//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GEAR_*` environment variables and config
//! files. Optional fields fall back to the defaults below through accessor
//! methods so the loaded struct stays a faithful record of what was set.

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{NewAccount, Role, UserValidationError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_TOKEN_TTL_HOURS: u32 = 24;
const DEFAULT_BOOTSTRAP_USERNAME: &str = "admin";
const DEFAULT_BOOTSTRAP_PASSWORD: &str = "admin123";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEVELOPMENT_TOKEN_SECRET: &str = "gear-catalog-development-secret";

/// Problems with the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser detail.
        message: String,
    },
    /// Release builds refuse to sign tokens with the development secret.
    #[error("GEAR_TOKEN_SECRET must be set")]
    MissingTokenSecret,
    /// The configured secret is blank.
    #[error("GEAR_TOKEN_SECRET must not be empty")]
    EmptyTokenSecret,
    /// The bootstrap account fields fail validation.
    #[error("invalid bootstrap account: {0}")]
    BootstrapAccount(#[from] UserValidationError),
}

/// Runtime configuration for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEAR")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps everything in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// HMAC secret used to sign bearer tokens.
    pub token_secret: Option<String>,
    /// Token lifetime in hours.
    pub token_ttl_hours: Option<u32>,
    /// Username of the account ensured at startup.
    pub bootstrap_username: Option<String>,
    /// Password given to the bootstrap account when it is first created.
    pub bootstrap_password: Option<String>,
    /// Insert the sample catalogue when the gear store is empty.
    #[ortho_config(default = true)]
    pub seed_sample_gear: bool,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Token lifetime.
    pub fn token_ttl(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(
            self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
        ))
    }

    /// Signing secret.
    ///
    /// When unset, `allow_development_secret` decides between a fixed
    /// development secret and [`SettingsError::MissingTokenSecret`].
    pub fn token_secret(
        &self,
        allow_development_secret: bool,
    ) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.token_secret.as_deref() {
            Some(secret) if secret.is_empty() => Err(SettingsError::EmptyTokenSecret),
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if allow_development_secret => {
                Ok(Zeroizing::new(DEVELOPMENT_TOKEN_SECRET.as_bytes().to_vec()))
            }
            None => Err(SettingsError::MissingTokenSecret),
        }
    }

    /// Whether [`Self::token_secret`] would fall back to the development secret.
    pub fn uses_development_secret(&self) -> bool {
        self.token_secret.is_none()
    }

    /// The creator account ensured at startup.
    pub fn bootstrap_account(&self) -> Result<NewAccount, SettingsError> {
        let username = self
            .bootstrap_username
            .as_deref()
            .unwrap_or(DEFAULT_BOOTSTRAP_USERNAME);
        let password = self
            .bootstrap_password
            .as_deref()
            .unwrap_or(DEFAULT_BOOTSTRAP_PASSWORD);
        Ok(NewAccount::try_from_parts(
            username,
            password,
            Role::Creator,
        )?)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "GEAR_BIND_ADDR",
        "GEAR_DATABASE_URL",
        "GEAR_DB_MAX_CONNECTIONS",
        "GEAR_TOKEN_SECRET",
        "GEAR_TOKEN_TTL_HOURS",
        "GEAR_BOOTSTRAP_USERNAME",
        "GEAR_BOOTSTRAP_PASSWORD",
        "GEAR_SEED_SAMPLE_GEAR",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("gear-catalog")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:8001".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.token_ttl(), TimeDelta::hours(24));
        assert!(settings.seed_sample_gear);

        let account = settings.bootstrap_account().expect("account");
        assert_eq!(account.username().as_ref(), "admin");
        assert_eq!(account.password(), "admin123");
        assert_eq!(account.role(), Role::Creator);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("GEAR_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("GEAR_DATABASE_URL", Some("postgres://db/gear".to_owned())),
            ("GEAR_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("GEAR_TOKEN_SECRET", Some("s3cret".to_owned())),
            ("GEAR_TOKEN_TTL_HOURS", Some("2".to_owned())),
            ("GEAR_BOOTSTRAP_USERNAME", Some("root".to_owned())),
            ("GEAR_BOOTSTRAP_PASSWORD", Some("hunter2".to_owned())),
            ("GEAR_SEED_SAMPLE_GEAR", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr().expect("bind").port(), 9000);
        assert_eq!(settings.database_url(), Some("postgres://db/gear"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(settings.token_ttl(), TimeDelta::hours(2));
        assert!(!settings.seed_sample_gear);
        assert_eq!(
            settings.token_secret(false).expect("secret").as_slice(),
            b"s3cret"
        );
        assert_eq!(
            settings.bootstrap_account().expect("account").username().as_ref(),
            "root"
        );
    }

    fn with_secret(secret: Option<&str>) -> AppSettings {
        AppSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
            token_secret: secret.map(str::to_owned),
            token_ttl_hours: None,
            bootstrap_username: None,
            bootstrap_password: None,
            seed_sample_gear: true,
        }
    }

    #[rstest]
    #[case(None, true, Ok(DEVELOPMENT_TOKEN_SECRET))]
    #[case(None, false, Err(SettingsError::MissingTokenSecret))]
    #[case(Some(""), true, Err(SettingsError::EmptyTokenSecret))]
    #[case(Some("abc"), false, Ok("abc"))]
    fn token_secret_resolution(
        #[case] secret: Option<&str>,
        #[case] allow_dev: bool,
        #[case] expected: Result<&str, SettingsError>,
    ) {
        let resolved = with_secret(secret)
            .token_secret(allow_dev)
            .map(|bytes| String::from_utf8(bytes.to_vec()).expect("utf8"));
        assert_eq!(resolved, expected.map(str::to_owned));
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            ..with_secret(None)
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
