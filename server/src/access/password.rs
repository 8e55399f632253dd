//! Password hashing.
//!
//! Passwords are hashed with bcrypt, which generates a random salt for
//! every hash. Hashing is deliberately slow, so it runs on the blocking
//! thread pool.

use tokio::task;

use super::Error;
use crate::error::ServerResult;

#[cfg(not(test))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;

#[cfg(test)]
const HASH_COST: u32 = 4;

/// Hashes a password with a fresh salt.
pub async fn hash_password(password: &str) -> ServerResult<String> {
    let password = password.to_owned();
    let hash = task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(Error::BlockingTaskError)?
        .map_err(Error::HashError)?;

    Ok(hash)
}

/// Verifies a password against a stored hash.
///
/// A malformed hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> ServerResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let result = task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(Error::BlockingTaskError)?;

    match result {
        Ok(valid) => Ok(valid),
        Err(e) => {
            tracing::warn!("Ignoring malformed password hash: {}", e);
            Ok(false)
        }
    }
}
