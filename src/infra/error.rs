//! Error types for the sign, normalize, encrypt and wrap pipeline.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type for pipeline operations
pub type EncryptResult<T> = Result<T, EncryptError>;

/// Every failure the pipeline can surface to its caller
#[derive(Error, Debug, miette::Diagnostic)]
pub enum EncryptError {
    #[error("Missing credential: {0}")]
    #[diagnostic(help("check that the key and certificate files exist in the certificate directory"))]
    MissingCredential(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("IO error on '{resource}': {message}")]
    IoError { resource: String, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Fieldless discriminant of [`EncryptError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    SigningFailed,
    EncryptionFailed,
    Io,
    Decode,
    Configuration,
}

impl EncryptError {
    /// Build an IO error naming the resource it happened on
    pub fn io(resource: impl AsRef<Path>, error: impl fmt::Display) -> Self {
        EncryptError::IoError {
            resource: resource.as_ref().display().to_string(),
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncryptError::MissingCredential(_) => ErrorKind::MissingCredential,
            EncryptError::SigningFailed(_) => ErrorKind::SigningFailed,
            EncryptError::EncryptionFailed(_) => ErrorKind::EncryptionFailed,
            EncryptError::IoError { .. } => ErrorKind::Io,
            EncryptError::DecodeError(_) => ErrorKind::Decode,
            EncryptError::ConfigurationError(_) => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingCredential => "missing credential",
            ErrorKind::SigningFailed => "signing failed",
            ErrorKind::EncryptionFailed => "encryption failed",
            ErrorKind::Io => "io",
            ErrorKind::Decode => "decode",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

impl From<base64::DecodeError> for EncryptError {
    fn from(error: base64::DecodeError) -> Self {
        EncryptError::DecodeError(format!("invalid base64 body: {error}"))
    }
}
