//! Encrypt command
//!
//! Seals a file with one of three key sources: an existing key file, a
//! freshly generated key that is saved alongside, or a passphrase.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::config::Settings;
use crate::error::CryptResult;
use crate::services::SealService;
use crate::storage::file_io::{read_bytes, read_key_file, write_atomic, write_key_file};

use super::passphrase::read_new_passphrase;
use super::{display_path, resolve_bits};

/// Arguments for `encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// File to encrypt
    pub input: PathBuf,

    /// Where to write the encrypted payload
    pub output: PathBuf,

    #[command(flatten)]
    pub key: EncryptKeyArgs,

    /// Key size in bits (128 or 256) for --new-key and --passphrase
    #[arg(long)]
    pub bits: Option<u32>,
}

/// Where the encryption key comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct EncryptKeyArgs {
    /// Encrypt with the key stored in this key file
    #[arg(long, value_name = "PATH")]
    pub keyfile: Option<PathBuf>,

    /// Generate a random key, save it to PATH, and encrypt with it
    #[arg(long, value_name = "PATH")]
    pub new_key: Option<PathBuf>,

    /// Derive the key from a passphrase (prompted, or GCMCRYPT_PASSPHRASE)
    #[arg(long)]
    pub passphrase: bool,
}

/// Handle the encrypt command
pub fn handle_encrypt_command(settings: &Settings, args: EncryptArgs) -> CryptResult<()> {
    let plaintext = read_bytes(&args.input)?;
    let mut service = SealService::new();

    let sealed = if let Some(path) = &args.key.keyfile {
        if args.bits.is_some() {
            warn!("--bits is ignored with --keyfile; the key file decides the size");
        }
        let key = read_key_file(path)?;
        service.seal_with_key(&key, &plaintext)?
    } else if let Some(path) = &args.key.new_key {
        let bits = resolve_bits(args.bits, settings)?;
        let key = service.generate_key(bits)?;
        write_key_file(path, &key)?;
        println!("Wrote {}-bit key to: {}", bits, display_path(path));
        service.seal_with_key(key.as_bytes(), &plaintext)?
    } else {
        let bits = resolve_bits(args.bits, settings)?;
        let passphrase = read_new_passphrase()?;
        service.seal_with_passphrase(passphrase, bits, &plaintext)?
    };

    write_atomic(&args.output, sealed.as_bytes())?;

    println!(
        "Encrypted {} -> {}",
        args.input.display(),
        display_path(&args.output)
    );
    Ok(())
}
