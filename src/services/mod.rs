//! Service layer for gcmcrypt
//!
//! The service layer composes the cryptographic core into whole
//! encrypt/decrypt flows, independent of any file or terminal I/O.

pub mod sealing;

pub use sealing::{SealService, Secret};
