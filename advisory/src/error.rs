//! Error handling.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use displaydoc::Display;

pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

/// An error.
#[derive(Debug, Display)]
pub enum AdvisoryError {
    /// Invalid username "{name}": {reason}
    InvalidUsername { name: String, reason: &'static str },

    /// {0}
    WeakPassword(&'static str),

    /// Invalid seed file {path:?}: {error}
    InvalidSeedFile { path: PathBuf, error: csv::Error },

    /// I/O error: {error}.
    IoError { error: io::Error },
}

impl AdvisoryError {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidUsername { .. } => "InvalidUsername",
            Self::WeakPassword(_) => "WeakPassword",
            Self::InvalidSeedFile { .. } => "InvalidSeedFile",
            Self::IoError { .. } => "IoError",
        }
    }
}

impl StdError for AdvisoryError {}

impl From<io::Error> for AdvisoryError {
    fn from(error: io::Error) -> Self {
        Self::IoError { error }
    }
}
