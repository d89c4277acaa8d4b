//! AES-GCM encryption/decryption
//!
//! Provides authenticated encryption with AES-128-GCM or AES-256-GCM,
//! selected by key length. Every encryption draws a fresh 96-bit nonce from
//! the random source; the 128-bit tag is appended to the ciphertext.

use aes_gcm::{
    aead::{
        rand_core::{CryptoRng, RngCore},
        Aead, KeyInit, OsRng,
    },
    Aes128Gcm, Aes256Gcm, Nonce,
};
use tracing::{debug, warn};

use crate::error::{CryptError, CryptResult};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Nonce plus ciphertext-with-tag produced by one encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AeadPayload {
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext followed by the 16-byte tag
    pub ciphertext: Vec<u8>,
}

enum GcmKey {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl GcmKey {
    fn new(key: &[u8]) -> CryptResult<Self> {
        let invalid = |_| CryptError::InvalidKey { len: key.len() };
        match key.len() {
            16 => Ok(Self::Aes128(Box::new(
                Aes128Gcm::new_from_slice(key).map_err(invalid)?,
            ))),
            32 => Ok(Self::Aes256(Box::new(
                Aes256Gcm::new_from_slice(key).map_err(invalid)?,
            ))),
            len => Err(CryptError::InvalidKey { len }),
        }
    }

    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(&nonce[..]);
        match self {
            Self::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Self::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Self::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        }
    }
}

/// AES-GCM encryptor holding the nonce source
#[derive(Debug, Clone)]
pub struct GcmCipher<R = OsRng> {
    rng: R,
}

impl GcmCipher<OsRng> {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for GcmCipher<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> GcmCipher<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Encrypt plaintext with a 16- or 32-byte key
    ///
    /// Generates a random nonce for each call, so encrypting the same
    /// plaintext twice never yields the same output.
    pub fn encrypt(&mut self, key: &[u8], plaintext: &[u8]) -> CryptResult<AeadPayload> {
        let cipher = GcmKey::new(key)?;

        let mut nonce = [0u8; NONCE_SIZE];
        self.rng.fill_bytes(&mut nonce);

        let ciphertext = cipher.seal(&nonce, plaintext).map_err(|_| {
            CryptError::InvalidParameter("plaintext is too large for AES-GCM".to_string())
        })?;

        debug!(
            key_bits = key.len() * 8,
            plaintext_len = plaintext.len(),
            "encrypted payload"
        );
        Ok(AeadPayload { nonce, ciphertext })
    }
}

/// Decrypt and verify ciphertext-with-tag
///
/// Nothing is returned unless the tag verifies.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> CryptResult<Vec<u8>> {
    let cipher = GcmKey::new(key)?;

    if nonce.len() != NONCE_SIZE {
        return Err(CryptError::InvalidNonceLength {
            expected: NONCE_SIZE,
            actual: nonce.len(),
        });
    }

    cipher.open(nonce, ciphertext).map_err(|_| {
        warn!(ciphertext_len = ciphertext.len(), "tag verification failed");
        CryptError::AuthenticationFailure
    })
}
