//! Key generation command

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::CryptResult;
use crate::services::SealService;
use crate::storage::file_io::write_key_file;

use super::{display_path, resolve_bits};

/// Arguments for `gen-key`
#[derive(Args, Debug)]
pub struct KeyGenArgs {
    /// Where to write the base64-encoded key
    pub keyfile: PathBuf,

    /// Key size in bits (128 or 256); defaults to the configured size
    #[arg(long)]
    pub bits: Option<u32>,
}

/// Generate a random key and write it to a key file
pub fn handle_keygen_command(settings: &Settings, args: KeyGenArgs) -> CryptResult<()> {
    let bits = resolve_bits(args.bits, settings)?;

    let mut service = SealService::new();
    let key = service.generate_key(bits)?;
    write_key_file(&args.keyfile, &key)?;

    println!("Wrote {}-bit key to: {}", bits, display_path(&args.keyfile));
    Ok(())
}
