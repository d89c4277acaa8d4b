//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave half-written outputs on
//! failure, plus the base64 key-file format.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::crypto::{Key, SecureBytes};
use crate::error::{CryptError, CryptResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> CryptResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| CryptError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| CryptError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a whole file as bytes
pub fn read_bytes<P: AsRef<Path>>(path: P) -> CryptResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| CryptError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read a payload text file, dropping surrounding whitespace
///
/// Payloads are base64 text, so content that is not UTF-8 is a malformed
/// payload rather than an I/O failure.
pub fn read_text<P: AsRef<Path>>(path: P) -> CryptResult<String> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let text = std::str::from_utf8(&bytes).map_err(|e| {
        CryptError::MalformedPayload(format!("{} is not UTF-8 text: {}", path.display(), e))
    })?;
    Ok(text.trim().to_string())
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The target is either completely written or left untouched. The temp
/// file gets a random name, is created exclusively and is readable by the
/// owner only (Unix), so the published file is owner-only as well.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> CryptResult<()> {
    let path = path.as_ref();

    // Temp file lives next to the target so the rename stays on one filesystem
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| {
                CryptError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| CryptError::Io(format!("Failed to create temp file: {}", e)))?;

    write_synced(temp.as_file_mut(), contents)
        .map_err(|e| CryptError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    // On failure the temp file is removed when the returned handle drops
    temp.persist(path).map_err(|e| {
        CryptError::Io(format!("Failed to rename temp file: {}", e.error))
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write a key as a single line of base64
pub fn write_key_file<P: AsRef<Path>>(path: P, key: &Key) -> CryptResult<()> {
    let mut encoded = STANDARD.encode(key.as_bytes());
    encoded.push('\n');
    let contents = SecureBytes::new(encoded.into_bytes());
    write_atomic(path, &contents)
}

/// Read a base64 key file
///
/// The length is not checked here; the cipher rejects keys that are not
/// 16 or 32 bytes.
pub fn read_key_file<P: AsRef<Path>>(path: P) -> CryptResult<SecureBytes> {
    let path = path.as_ref();
    let contents = SecureBytes::new(read_bytes(path)?);

    let text = std::str::from_utf8(&contents).map_err(|_| {
        CryptError::InvalidParameter(format!("Key file {} is not text", path.display()))
    })?;

    STANDARD
        .decode(text.trim())
        .map(SecureBytes::new)
        .map_err(|_| {
            CryptError::InvalidParameter(format!(
                "Key file {} does not contain base64 key data",
                path.display()
            ))
        })
}

fn write_synced(file: &mut File, contents: &[u8]) -> std::io::Result<()> {
    file.write_all(contents)?;
    file.flush()?;
    // Sync to disk before rename
    file.sync_all()
}
