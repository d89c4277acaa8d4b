//! Logging initialisation for the gcmcrypt binary.
//!
//! Human-readable logs go to stderr so stdout stays free for command
//! output. Nothing logged anywhere in the crate includes key bytes or
//! passphrases.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "GCMCRYPT_LOG";

/// Initialise the global tracing subscriber.
///
/// `GCMCRYPT_LOG` wins over `log_level` when it holds a valid directive.
///
/// # Errors
///
/// Returns an error if a subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
