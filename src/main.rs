use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gcmcrypt::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_keygen_command, DecryptArgs,
    EncryptArgs, KeyGenArgs,
};
use gcmcrypt::config::{paths::CONFIG_DIR_ENV, CryptPaths, Settings};
use gcmcrypt::crypto::PBKDF2_ITERATIONS;
use gcmcrypt::CryptError;

#[derive(Parser)]
#[command(
    name = "gcmcrypt",
    version,
    about = "Encrypt and decrypt files with AES-GCM",
    long_about = "gcmcrypt encrypts files with AES-GCM using either a random key \
                  kept in a key file or a key derived from a passphrase with \
                  PBKDF2-HMAC-SHA256. Output is a colon-separated base64 text payload."
)]
struct Cli {
    /// Configuration directory
    #[arg(long, global = true, env = CONFIG_DIR_ENV, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random AES key and write it to a key file
    GenKey(KeyGenArgs),

    /// Encrypt a file
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Decrypt a file produced by `encrypt`
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<CryptError>()
                .map(CryptError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.config_dir {
        Some(dir) => CryptPaths::with_base_dir(dir),
        None => CryptPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    gcmcrypt::telemetry::init(&settings.log_level)?;

    match cli.command {
        Commands::GenKey(args) => {
            handle_keygen_command(&settings, args).context("gen-key failed")?;
        }
        Commands::Encrypt(args) => {
            handle_encrypt_command(&settings, args).context("encryption failed")?;
        }
        Commands::Decrypt(args) => {
            handle_decrypt_command(&settings, args).context("decryption failed")?;
        }
        Commands::Config => {
            println!("gcmcrypt Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Schema version:     {}", settings.schema_version);
            println!("  Default key size:   {} bits", settings.default_key_bits);
            println!("  Log level:          {}", settings.log_level);
            println!("  PBKDF2 iterations:  {}", PBKDF2_ITERATIONS);
        }
    }

    Ok(())
}
