//! Argon2id implementation of the password hashing port.
//!
//! Each hash or verification costs tens of milliseconds of CPU, so the work
//! runs on Tokio's blocking pool and the async caller only awaits the result.

use argon2::password_hash::{self, PasswordHash as PhcHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use tokio::task::{JoinError, spawn_blocking};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

const SALT_LEN: usize = 16;

/// Hashes passwords with Argon2id default parameters and a random salt,
/// producing PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

fn worker_error(err: JoinError) -> PasswordHasherError {
    PasswordHasherError::worker(err.to_string())
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let mut salt_bytes = [0_u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
    Ok(PasswordHash::new(phc.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(hash).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(worker_error)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_str().to_owned();
        spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .map_err(worker_error)?
    }
}
