//! Configuration Loader
//!
//! Environment-aware configuration loading. Merges, in order: compiled-in
//! defaults, an optional `config/gazette.toml` (or an explicit file), and
//! `GAZETTE_`-prefixed environment variables with `__` separating nesting
//! levels (`GAZETTE_NEWS__HOME_PAGE_SIZE=5`).

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use config::{Config, Environment, File};
use tracing::debug;

use super::GazetteConfig;
use crate::error::Result;

/// Loaded configuration plus the environment it was resolved for.
pub struct ConfigManager {
    config: GazetteConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection.
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from_file(None)
    }

    /// Load configuration from an explicit TOML file.
    ///
    /// With `None`, `config/gazette.toml` is used when present; a missing
    /// file is not an error, the defaults simply stand.
    pub fn load_from_file(config_file: Option<PathBuf>) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();

        let mut builder = Config::builder().add_source(Config::try_from(&GazetteConfig::default())?);

        builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name("config/gazette").required(false)),
        };

        let merged = builder
            .add_source(Environment::with_prefix("GAZETTE").separator("__"))
            .build()?;

        let config: GazetteConfig = merged.try_deserialize()?;
        config.validate()?;

        debug!(
            environment = %environment,
            bind_address = %config.server.bind_address,
            home_page_size = config.news.home_page_size,
            "Configuration loaded"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment,
        }))
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &GazetteConfig {
        &self.config
    }

    /// Environment name this configuration was resolved for.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn detect_environment() -> String {
        env::var("GAZETTE_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }
}
