//! Sealing service
//!
//! Ties key material, AES-GCM and the payload codec together into the
//! two operations a caller actually performs: seal some bytes into an
//! envelope string, and open an envelope string back into bytes.

use aes_gcm::aead::{
    rand_core::{CryptoRng, RngCore},
    OsRng,
};
use tracing::{debug, info};

use crate::crypto::{
    self, payload, Envelope, GcmCipher, Key, KeyMaterial, KeyMode, Salt, SecureBytes,
    SecureString,
};
use crate::error::{CryptError, CryptResult};

/// The secret needed to open an envelope
pub enum Secret {
    /// Raw AES key bytes
    Key(SecureBytes),
    /// Passphrase plus the key size it was sealed with
    Passphrase { passphrase: SecureString, bits: u32 },
}

impl Secret {
    pub fn key(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Key(SecureBytes::new(bytes))
    }

    pub fn passphrase(passphrase: impl Into<SecureString>, bits: u32) -> Self {
        Self::Passphrase {
            passphrase: passphrase.into(),
            bits,
        }
    }

    pub fn mode(&self) -> KeyMode {
        match self {
            Self::Key(_) => KeyMode::KeyFile,
            Self::Passphrase { .. } => KeyMode::Passphrase,
        }
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(bytes) => f.debug_tuple("Key").field(bytes).finish(),
            Self::Passphrase { passphrase, bits } => f
                .debug_struct("Passphrase")
                .field("passphrase", passphrase)
                .field("bits", bits)
                .finish(),
        }
    }
}

/// Service for sealing and opening envelopes
#[derive(Debug, Clone)]
pub struct SealService<R = OsRng> {
    keys: KeyMaterial<R>,
    cipher: GcmCipher<R>,
}

impl SealService<OsRng> {
    pub fn new() -> Self {
        Self {
            keys: KeyMaterial::new(),
            cipher: GcmCipher::new(),
        }
    }
}

impl Default for SealService<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> SealService<R> {
    pub fn from_parts(keys: KeyMaterial<R>, cipher: GcmCipher<R>) -> Self {
        Self { keys, cipher }
    }

    /// Generate a random key for key-file mode
    pub fn generate_key(&mut self, bits: u32) -> CryptResult<Key> {
        self.keys.generate_random_key(bits)
    }

    /// Seal plaintext under raw key bytes (two-segment envelope)
    pub fn seal_with_key(&mut self, key: &[u8], plaintext: &[u8]) -> CryptResult<String> {
        let sealed = self.cipher.encrypt(key, plaintext)?;
        info!(mode = %KeyMode::KeyFile, bytes = plaintext.len(), "sealed payload");
        Ok(payload::encode(None, &sealed.nonce, &sealed.ciphertext))
    }

    /// Seal plaintext under a passphrase (three-segment envelope)
    ///
    /// A fresh salt is generated and written as the first segment.
    pub fn seal_with_passphrase(
        &mut self,
        passphrase: SecureString,
        bits: u32,
        plaintext: &[u8],
    ) -> CryptResult<String> {
        let (key, salt) = self.keys.derive_key(passphrase, bits, None)?;
        let sealed = self.cipher.encrypt(key.as_bytes(), plaintext)?;
        info!(mode = %KeyMode::Passphrase, bits, bytes = plaintext.len(), "sealed payload");
        Ok(payload::encode(
            Some(salt.as_bytes()),
            &sealed.nonce,
            &sealed.ciphertext,
        ))
    }

    /// Open an envelope string
    ///
    /// The envelope's segment count decides which secret is required; a
    /// secret of the other kind is rejected before any decryption.
    pub fn open(&mut self, text: &str, secret: Secret) -> CryptResult<Vec<u8>> {
        let envelope = Envelope::decode(text)?;
        let mode = envelope.mode();
        debug!(%mode, ciphertext_len = envelope.ciphertext.len(), "decoded envelope");

        let plaintext = match (envelope.salt, secret) {
            (None, Secret::Key(key)) => {
                crypto::decrypt(key.as_bytes(), &envelope.nonce, &envelope.ciphertext)?
            }
            (Some(salt), Secret::Passphrase { passphrase, bits }) => {
                let salt = Salt::from_slice(&salt)?;
                let (key, _) = self.keys.derive_key(passphrase, bits, Some(salt))?;
                crypto::decrypt(key.as_bytes(), &envelope.nonce, &envelope.ciphertext)?
            }
            (_, secret) => {
                return Err(CryptError::InvalidParameter(format!(
                    "payload was sealed in {} mode but a {} was supplied",
                    mode,
                    secret.mode()
                )))
            }
        };

        info!(%mode, bytes = plaintext.len(), "opened payload");
        Ok(plaintext)
    }
}
