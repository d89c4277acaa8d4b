//! User settings for gcmcrypt
//!
//! Read from `config.json` in the configuration directory. Every field has
//! a default, so a missing or partial file is fine.

use serde::Deserialize;

use super::paths::CryptPaths;
use crate::crypto::KeySize;
use crate::error::{CryptError, CryptResult};
use crate::storage::file_io::read_json;

/// User settings for gcmcrypt
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Key size used when `--bits` is not given
    #[serde(default = "default_key_bits")]
    pub default_key_bits: u32,

    /// Log filter used when `GCMCRYPT_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_key_bits() -> u32 {
    256
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_key_bits: default_key_bits(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &CryptPaths) -> CryptResult<Self> {
        read_json(paths.settings_file()).map_err(|e| match e {
            CryptError::Config(msg) => CryptError::Config(format!("Invalid settings file: {}", msg)),
            other => other,
        })
    }

    /// Key size for a command: `--bits` when given, else the configured default
    pub fn key_size(&self, bits: Option<u32>) -> CryptResult<KeySize> {
        KeySize::from_bits(bits.unwrap_or(self.default_key_bits))
    }
}
