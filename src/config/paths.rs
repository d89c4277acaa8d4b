//! Path management for gcmcrypt
//!
//! ## Path Resolution Order
//!
//! 1. `GCMCRYPT_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/gcmcrypt` on Linux,
//!    `~/Library/Application Support/gcmcrypt` on macOS, `%APPDATA%` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::CryptError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "GCMCRYPT_CONFIG_DIR";

/// Manages the paths used by gcmcrypt
#[derive(Debug, Clone)]
pub struct CryptPaths {
    base_dir: PathBuf,
}

impl CryptPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CryptError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "gcmcrypt")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CryptError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create CryptPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}
