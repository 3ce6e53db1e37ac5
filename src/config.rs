//! Host configuration.
//!
//! Command-line arguments (with environment fallbacks, see `main.rs`) are
//! validated into a [`HostConfig`]. Tuning knobs that have no flag are read
//! straight from the environment through [`env_parse`].

use std::path::PathBuf;

use geocanvas::view::Viewport;

use crate::persistence::PersistConfig;

pub const DEFAULT_STORE_DIR: &str = "documents";
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("store directory must not be empty")]
    EmptyStoreDir,
}

/// Validated host settings.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Directory holding one JSON document per key.
    pub store_dir: PathBuf,
    /// Simulated canvas size in CSS pixels.
    pub viewport: Viewport,
    /// Log `Speak` phrases from the canvas.
    pub narration: bool,
    pub persist: PersistConfig,
}

impl HostConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty store path or a viewport that is
    /// not strictly positive.
    pub fn new(store_dir: PathBuf, width: f64, height: f64, narration: bool) -> Result<Self, ConfigError> {
        if store_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStoreDir);
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { store_dir, viewport: Viewport::new(width, height), narration, persist: PersistConfig::from_env() })
    }
}

/// Parse `key` from the environment, falling back to `default` when the
/// variable is missing or malformed.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring malformed environment value");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
