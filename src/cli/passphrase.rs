//! Passphrase input
//!
//! Reads from `GCMCRYPT_PASSPHRASE` when set, otherwise prompts on the
//! terminal with hidden input.

use crate::crypto::SecureString;
use crate::error::{CryptError, CryptResult};

/// Environment variable that supplies the passphrase non-interactively
pub const PASSPHRASE_ENV: &str = "GCMCRYPT_PASSPHRASE";

const MAX_ATTEMPTS: usize = 3;

/// Read the passphrase for opening an envelope
pub fn read_passphrase() -> CryptResult<SecureString> {
    match from_env() {
        Some(passphrase) => Ok(passphrase),
        None => prompt_passphrase("Enter passphrase: "),
    }
}

/// Read a new passphrase, asking for confirmation when prompting
pub fn read_new_passphrase() -> CryptResult<SecureString> {
    if let Some(passphrase) = from_env() {
        return Ok(passphrase);
    }

    for _ in 0..MAX_ATTEMPTS {
        let pass1 = prompt_passphrase("Enter new passphrase: ")?;

        if pass1.is_empty() {
            eprintln!("Passphrase must not be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_passphrase("Confirm passphrase: ")?;

        if pass1 != pass2 {
            eprintln!("Passphrases do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }

    Err(CryptError::InvalidParameter(
        "no matching passphrase entered".to_string(),
    ))
}

fn from_env() -> Option<SecureString> {
    std::env::var(PASSPHRASE_ENV).ok().map(SecureString::from)
}

/// Prompt for a passphrase (hidden input)
fn prompt_passphrase(prompt: &str) -> CryptResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| CryptError::Io(format!("Failed to read passphrase: {}", e)))
}
