//! Configuration module for gcmcrypt
//!
//! This module provides configuration management including:
//! - configuration directory resolution
//! - user settings persistence

pub mod paths;
pub mod settings;

pub use paths::CryptPaths;
pub use settings::Settings;
