//! Key generation and passphrase-based key derivation
//!
//! Keys come from one of two places: the secure random source, or
//! PBKDF2-HMAC-SHA256 over a passphrase and a 16-byte salt. Derivation is
//! deterministic for a given (passphrase, salt, size), which is what lets
//! the decrypting side rebuild the key from the salt stored in the payload.

use aes_gcm::aead::{
    rand_core::{CryptoRng, RngCore},
    OsRng,
};
use sha2::Sha256;
use tracing::debug;

use crate::error::{CryptError, CryptResult};

use super::secure_memory::{SecureBytes, SecureString};

/// PBKDF2 iteration count for every derivation
pub const PBKDF2_ITERATIONS: u32 = 200_000;

/// Size of a derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// Supported AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes256,
}

impl KeySize {
    /// Parse a bit count; only 128 and 256 are accepted
    pub fn from_bits(bits: u32) -> CryptResult<Self> {
        match bits {
            128 => Ok(Self::Aes128),
            256 => Ok(Self::Aes256),
            other => Err(CryptError::unsupported_key_size(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Aes128 => 128,
            Self::Aes256 => 256,
        }
    }

    /// Key length in bytes
    pub fn byte_len(self) -> usize {
        self.bits() as usize / 8
    }
}

/// Raw AES key bytes, wiped on drop
#[derive(Clone, PartialEq)]
pub struct Key {
    bytes: SecureBytes,
}

impl Key {
    /// Wrap existing key bytes, checking the length is a valid AES key
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> CryptResult<Self> {
        let bytes = SecureBytes::new(bytes);
        match bytes.len() {
            16 | 32 => Ok(Self { bytes }),
            len => Err(CryptError::InvalidKey { len }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size(&self) -> KeySize {
        if self.bytes.len() == 16 {
            KeySize::Aes128
        } else {
            KeySize::Aes256
        }
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key").field("bits", &self.size().bits()).finish()
    }
}

/// Non-secret salt mixed into passphrase derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    pub fn new(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a salt recovered from a payload
    pub fn from_slice(bytes: &[u8]) -> CryptResult<Self> {
        let array: [u8; SALT_SIZE] = bytes.try_into().map_err(|_| {
            CryptError::MalformedPayload(format!(
                "salt must be {} bytes, got {}",
                SALT_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Produces key bytes from a random source or a passphrase
///
/// The random source is injected so tests can substitute a deterministic
/// one; production code uses [`OsRng`].
#[derive(Debug, Clone)]
pub struct KeyMaterial<R = OsRng> {
    rng: R,
}

impl KeyMaterial<OsRng> {
    /// Key material backed by the operating system CSPRNG
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for KeyMaterial<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> KeyMaterial<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a random AES key of `bits` length (128 or 256)
    pub fn generate_random_key(&mut self, bits: u32) -> CryptResult<Key> {
        let size = KeySize::from_bits(bits)?;

        let mut bytes = SecureBytes::zeroed(size.byte_len());
        self.rng.fill_bytes(bytes.as_bytes_mut());

        debug!(bits, "generated random key");
        Ok(Key { bytes })
    }

    /// Generate a fresh random salt
    pub fn generate_salt(&mut self) -> Salt {
        let mut salt = [0u8; SALT_SIZE];
        self.rng.fill_bytes(&mut salt);
        Salt(salt)
    }

    /// Derive a key from a passphrase
    ///
    /// With `salt == None` a fresh salt is generated (encryption side);
    /// otherwise the given salt is reused (decryption side). The passphrase
    /// is consumed and wiped before this returns, on every path.
    pub fn derive_key(
        &mut self,
        passphrase: SecureString,
        bits: u32,
        salt: Option<Salt>,
    ) -> CryptResult<(Key, Salt)> {
        let size = KeySize::from_bits(bits)?;
        if passphrase.is_empty() {
            return Err(CryptError::InvalidParameter(
                "passphrase must not be empty".to_string(),
            ));
        }

        let salt = match salt {
            Some(salt) => salt,
            None => self.generate_salt(),
        };

        let key = derive_with_salt(&passphrase, size, &salt);
        Ok((key, salt))
    }
}

/// PBKDF2-HMAC-SHA256 over the passphrase with the fixed iteration count
fn derive_with_salt(passphrase: &SecureString, size: KeySize, salt: &Salt) -> Key {
    debug!(
        bits = size.bits(),
        iterations = PBKDF2_ITERATIONS,
        "deriving key from passphrase"
    );

    let mut bytes = SecureBytes::zeroed(size.byte_len());
    pbkdf2_sha256(
        passphrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        bytes.as_bytes_mut(),
    );
    Key { bytes }
}

fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, out);
}
