//! Custom error types for sealfile
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for sealfile operations
#[derive(Error, Debug)]
pub enum SealError {
    /// Input path does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Decrypt requested on a path without the expected suffix
    #[error("Expected a '.enc' file: {0}")]
    BadExtension(String),

    /// Envelope header shorter than the fixed minimum length
    #[error("Truncated or invalid envelope: {0}")]
    Format(String),

    /// Integrity check failed during decryption
    ///
    /// Deliberately collapses "wrong password" and "corrupted ciphertext"
    /// into one message.
    #[error("Decryption failed: wrong password or corrupted file")]
    Authentication,

    /// Cipher or key-derivation construction failures
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Underlying read/write failures, propagated unmodified
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SealError {
    /// Create a "not found" error for a path
    pub fn not_found(path: &Path) -> Self {
        Self::NotFound(path.display().to_string())
    }

    /// Create a "bad extension" error for a path
    pub fn bad_extension(path: &Path) -> Self {
        Self::BadExtension(path.display().to_string())
    }

    /// Check if this is an authentication failure
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is an envelope format error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// Result type alias for sealfile operations
pub type SealResult<T> = Result<T, SealError>;
