//! gcmcrypt - AES-GCM file encryption
//!
//! This library provides authenticated encryption of byte payloads with
//! AES-128-GCM or AES-256-GCM. Keys are either generated at random and kept
//! in a key file, or derived from a passphrase with PBKDF2-HMAC-SHA256.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: key material, AES-GCM, and the payload text format
//! - `services`: seal/open flows built on the crypto core
//! - `storage`: atomic file writes and key files
//! - `config`: configuration directory and user settings
//! - `cli`: command handlers for the `gcmcrypt` binary
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust
//! use gcmcrypt::services::{SealService, Secret};
//!
//! let mut service = SealService::new();
//! let key = service.generate_key(256)?;
//!
//! let sealed = service.seal_with_key(key.as_bytes(), b"hello world")?;
//! let opened = service.open(&sealed, Secret::key(key.as_bytes().to_vec()))?;
//! assert_eq!(opened, b"hello world");
//! # Ok::<(), gcmcrypt::CryptError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use error::{CryptError, CryptResult};
