//! Common error types for aixverify.

use thiserror::Error;

/// Common error type for package verification.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid zip file: {0}")]
    InvalidArchive(String),

    #[error("couldn't read {entry}: {reason}")]
    EntryRead { entry: String, reason: String },

    #[error("could not decode image: {0}")]
    ImageDecode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;
