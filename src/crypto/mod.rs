//! Cryptographic core for gcmcrypt
//!
//! Key generation and PBKDF2 derivation, AES-GCM encryption, and the
//! colon-delimited base64 payload format.

pub mod encryption;
pub mod key_material;
pub mod payload;
pub mod secure_memory;

pub use encryption::{decrypt, AeadPayload, GcmCipher, NONCE_SIZE, TAG_SIZE};
pub use key_material::{Key, KeyMaterial, KeySize, Salt, PBKDF2_ITERATIONS, SALT_SIZE};
pub use payload::{Envelope, KeyMode};
pub use secure_memory::{SecureBytes, SecureString};
