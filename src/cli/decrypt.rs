//! Decrypt command

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::CryptResult;
use crate::services::{SealService, Secret};
use crate::storage::file_io::{read_key_file, read_text, write_atomic};

use super::passphrase::read_passphrase;
use super::{display_path, resolve_bits};

/// Arguments for `decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Encrypted payload file
    pub input: PathBuf,

    /// Where to write the recovered plaintext
    pub output: PathBuf,

    #[command(flatten)]
    pub key: DecryptKeyArgs,

    /// Key size in bits the passphrase was used with (128 or 256)
    #[arg(long)]
    pub bits: Option<u32>,
}

/// Which secret opens the payload
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct DecryptKeyArgs {
    /// Decrypt with the key stored in this key file
    #[arg(long, value_name = "PATH")]
    pub keyfile: Option<PathBuf>,

    /// Re-derive the key from a passphrase (prompted, or GCMCRYPT_PASSPHRASE)
    #[arg(long)]
    pub passphrase: bool,
}

/// Handle the decrypt command
pub fn handle_decrypt_command(settings: &Settings, args: DecryptArgs) -> CryptResult<()> {
    let text = read_text(&args.input)?;

    let secret = match &args.key.keyfile {
        Some(path) => Secret::Key(read_key_file(path)?),
        None => Secret::Passphrase {
            bits: resolve_bits(args.bits, settings)?,
            passphrase: read_passphrase()?,
        },
    };

    let plaintext = SealService::new().open(&text, secret)?;
    write_atomic(&args.output, &plaintext)?;

    println!(
        "Decrypted {} -> {}",
        args.input.display(),
        display_path(&args.output)
    );
    Ok(())
}
