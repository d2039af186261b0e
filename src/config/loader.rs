//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RouterConfig;

/// Error type for configuration loading and rule compilation.
///
/// Every variant is fatal at startup: the process must abort before the
/// listener binds, so misconfiguration surfaces as a clear failure instead
/// of confusing 404s at request time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid backend URL {url:?} for host {host:?}: {reason}")]
    InvalidBackend {
        host: String,
        url: String,
        reason: String,
    },
}

/// Load configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = serde_json::from_str(&content)?;
    Ok(config)
}
