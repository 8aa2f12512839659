mod config;

pub use config::{Config, RingConfig, TimelineConfig};

use std::path::PathBuf;

/// Returns `~/.config/dayring[-dev]/` based on DAYRING_ENV.
///
/// Set DAYRING_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYRING_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayring-dev")
    } else {
        base_dir.join("dayring")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
