//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the sealing service.

pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod passphrase;

use std::path::Path;

pub use decrypt::{handle_decrypt_command, DecryptArgs};
pub use encrypt::{handle_encrypt_command, EncryptArgs};
pub use keygen::{handle_keygen_command, KeyGenArgs};

use crate::config::Settings;
use crate::error::CryptResult;

/// Pick the key size from `--bits` or the settings, and validate it
pub(crate) fn resolve_bits(bits: Option<u32>, settings: &Settings) -> CryptResult<u32> {
    Ok(settings.key_size(bits)?.bits())
}

/// Absolute form of a path for user-facing messages
pub(crate) fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
