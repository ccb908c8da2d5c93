//! Loading the global configuration from TOML.

use std::path::Path;

use thiserror::Error;

use franchise_core::DomainError;

use crate::global::GlobalConfig;

/// Environment variable holding the path of the configuration file.
pub const CONFIG_PATH_ENV: &str = "FRANCHISE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] DomainError),
}

/// Parse and validate a TOML document. Missing keys take the seeded defaults.
pub fn load_from_str(contents: &str) -> Result<GlobalConfig, ConfigError> {
    let config: GlobalConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML configuration file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<GlobalConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = load_from_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        catalog_items = config.catalog.len(),
        "loaded global config"
    );
    Ok(config)
}

/// Load from the file named by `FRANCHISE_CONFIG`, or the seeded defaults
/// when the variable is unset.
pub fn load_from_env() -> Result<GlobalConfig, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_from_path(path),
        Err(_) => {
            tracing::info!("{CONFIG_PATH_ENV} not set; using seeded config");
            Ok(GlobalConfig::default())
        }
    }
}
