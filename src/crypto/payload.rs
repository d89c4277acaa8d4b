//! Text serialization of encrypted payloads
//!
//! An envelope is a colon-separated list of standard base64 segments:
//!
//! ```text
//! key-file mode:    base64(nonce) ":" base64(ciphertext || tag)
//! passphrase mode:  base64(salt) ":" base64(nonce) ":" base64(ciphertext || tag)
//! ```
//!
//! The segment count alone decides the mode. Segment order is fixed; any
//! change would break previously written payloads.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{CryptError, CryptResult};

/// Separator between base64 segments
pub const SEGMENT_SEPARATOR: &str = ":";

/// How the key for an envelope must be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Raw key bytes, typically from a key file
    KeyFile,
    /// Key derived from a passphrase and the envelope's salt
    Passphrase,
}

impl std::fmt::Display for KeyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyFile => write!(f, "key file"),
            Self::Passphrase => write!(f, "passphrase"),
        }
    }
}

/// Decoded components of a serialized envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Option<Vec<u8>>,
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(salt: Option<Vec<u8>>, nonce: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            nonce,
            ciphertext,
        }
    }

    pub fn mode(&self) -> KeyMode {
        if self.salt.is_some() {
            KeyMode::Passphrase
        } else {
            KeyMode::KeyFile
        }
    }

    /// Serialize to the colon-delimited text form
    pub fn encode(&self) -> String {
        encode(self.salt.as_deref(), &self.nonce, &self.ciphertext)
    }

    /// Parse the colon-delimited text form
    pub fn decode(text: &str) -> CryptResult<Self> {
        decode(text)
    }
}

/// Encode (salt?, nonce, ciphertext) as colon-joined base64
pub fn encode(salt: Option<&[u8]>, nonce: &[u8], ciphertext: &[u8]) -> String {
    let mut segments = Vec::with_capacity(3);
    if let Some(salt) = salt {
        segments.push(STANDARD.encode(salt));
    }
    segments.push(STANDARD.encode(nonce));
    segments.push(STANDARD.encode(ciphertext));
    segments.join(SEGMENT_SEPARATOR)
}

/// Decode colon-joined base64 into (salt?, nonce, ciphertext)
///
/// Exactly two segments is key-file mode, exactly three is passphrase
/// mode. Anything else is rejected.
pub fn decode(text: &str) -> CryptResult<Envelope> {
    let segments: Vec<&str> = text.split(SEGMENT_SEPARATOR).collect();

    match segments.as_slice() {
        [nonce, ciphertext] => Ok(Envelope {
            salt: None,
            nonce: decode_segment("nonce", nonce)?,
            ciphertext: decode_segment("ciphertext", ciphertext)?,
        }),
        [salt, nonce, ciphertext] => Ok(Envelope {
            salt: Some(decode_segment("salt", salt)?),
            nonce: decode_segment("nonce", nonce)?,
            ciphertext: decode_segment("ciphertext", ciphertext)?,
        }),
        other => Err(CryptError::MalformedPayload(format!(
            "expected 2 or 3 segments, found {}",
            other.len()
        ))),
    }
}

fn decode_segment(name: &str, segment: &str) -> CryptResult<Vec<u8>> {
    STANDARD
        .decode(segment)
        .map_err(|e| CryptError::MalformedPayload(format!("invalid {} encoding: {}", name, e)))
}
