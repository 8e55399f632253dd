//! Access control.
//!
//! Sessions are stateless: everything the server remembers about a
//! browser lives in a cookie holding a JSON Web Token signed with the
//! configured HS256 secret. The token carries the ID of the logged-in
//! user (if any) and flash messages waiting to be shown.
//!
//! A token that fails verification (bad signature, expired, garbled)
//! is ignored and the browser is treated as anonymous.
//!
//! Pages are restricted to roles with the guard in [`http`]. The ID in
//! the session is resolved to a user on each request, so a deleted
//! account is logged out on its next request.
//!
//! ## Example claims
//!
//! ```json
//! {
//!   "uid": 3,
//!   "flashes": [
//!     { "level": "success", "message": "Logged in successfully." }
//!   ],
//!   "exp": 4102324986
//! }
//! ```

pub mod http;
pub mod password;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use displaydoc::Display;
pub use jsonwebtoken::{
    Algorithm as JwtAlgorithm, DecodingKey as JwtDecodingKey, EncodingKey as JwtEncodingKey,
    Header as JwtHeader, Validation as JwtValidation,
};
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;

/// Maximum number of queued flash messages.
///
/// Older messages are dropped first.
pub const MAX_FLASHES: usize = 8;

/// The state of a browser session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    claims: SessionClaims,

    /// Whether the session needs to be written back to the client.
    modified: bool,
}

/// Claims of a session token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SessionClaims {
    /// ID of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uid: Option<i64>,

    /// Messages to show on the next page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<Flash>,

    /// Expiration timestamp.
    exp: usize,
}

/// A one-time message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// The severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Error,
}

/// An access error.
#[derive(Debug, Display)]
pub enum Error {
    /// JWT error: {0}
    TokenError(jsonwebtoken::errors::Error),

    /// Password hashing error: {0}
    HashError(bcrypt::BcryptError),

    /// Blocking task failed: {0}
    BlockingTaskError(tokio::task::JoinError),
}

impl Session {
    /// Returns a session with no logged-in user and no messages.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Verifies and decodes a session token.
    pub fn from_jwt(token: &str, key: &JwtDecodingKey) -> ServerResult<Self> {
        let validation = JwtValidation::new(JwtAlgorithm::HS256);
        let data = jsonwebtoken::decode::<SessionClaims>(token, key, &validation)
            .map_err(Error::TokenError)?;

        Ok(Self {
            claims: data.claims,
            modified: false,
        })
    }

    /// Encodes the session into a token expiring at a timestamp.
    pub fn encode(&self, key: &JwtEncodingKey, exp: &DateTime<Utc>) -> ServerResult<String> {
        let claims = SessionClaims {
            exp: exp.timestamp() as usize,
            ..self.claims.clone()
        };

        jsonwebtoken::encode(&JwtHeader::new(JwtAlgorithm::HS256), &claims, key)
            .map_err(|e| Error::TokenError(e).into())
    }

    /// Returns the ID of the logged-in user.
    pub fn user_id(&self) -> Option<i64> {
        self.claims.uid
    }

    pub fn log_in(&mut self, user_id: i64) {
        self.claims.uid = Some(user_id);
        self.modified = true;
    }

    pub fn log_out(&mut self) {
        self.claims.uid = None;
        self.modified = true;
    }

    /// Queues a message for the next rendered page.
    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        let flashes = &mut self.claims.flashes;
        flashes.push(Flash {
            level,
            message: message.into(),
        });

        if flashes.len() > MAX_FLASHES {
            let excess = flashes.len() - MAX_FLASHES;
            flashes.drain(..excess);
        }

        self.modified = true;
    }

    /// Removes and returns all queued messages.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if self.claims.flashes.is_empty() {
            return Vec::new();
        }

        self.modified = true;
        std::mem::take(&mut self.claims.flashes)
    }

    /// Returns whether the session changed since it was decoded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }
}
