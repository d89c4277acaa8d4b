//! Custom error types for gcmcrypt
//!
//! Every failure the library can raise is a variant of [`CryptError`].
//! Variants carry lengths or descriptions only, never key bytes or
//! passphrase characters, so they are always safe to print.

use thiserror::Error;

/// The main error type for gcmcrypt operations
#[derive(Error, Debug)]
pub enum CryptError {
    /// Unsupported key size, empty passphrase, or a secret that does not
    /// match the envelope's mode
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Key bytes are not a valid AES key length
    #[error("Invalid key: expected 16 or 32 bytes, got {len}")]
    InvalidKey { len: usize },

    /// Nonce is not exactly 12 bytes
    #[error("Invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    /// Serialized envelope could not be parsed
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// AEAD tag verification failed
    #[error("Authentication failed: wrong key or passphrase, or the data was modified")]
    AuthenticationFailure,

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CryptError {
    /// Create an "invalid key size" error for a bit count
    pub fn unsupported_key_size(bits: u32) -> Self {
        Self::InvalidParameter(format!("key size must be 128 or 256 bits, got {}", bits))
    }

    /// Process exit status for this failure kind
    ///
    /// Each kind maps to its own code. 1 is left for failures that never
    /// reached the library and 2 for command-line usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidParameter(_) => 3,
            Self::InvalidKey { .. } => 4,
            Self::InvalidNonceLength { .. } => 5,
            Self::MalformedPayload(_) => 6,
            Self::AuthenticationFailure => 7,
            Self::Io(_) => 8,
            Self::Config(_) => 9,
        }
    }

    /// Check if this is an authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailure)
    }
}

impl From<std::io::Error> for CryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for gcmcrypt operations
pub type CryptResult<T> = Result<T, CryptError>;
