//! # Configuration Management
//!
//! Typed configuration for the server, database, sessions, the news feed,
//! and the comment moderation filter. Values layer in three steps:
//! compiled-in defaults, an optional TOML file, and `GAZETTE_`-prefixed
//! environment variables (see [`loader::ConfigManager`]).

pub mod loader;

pub use loader::ConfigManager;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{GazetteError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub news: NewsConfig,
    pub moderation: ModerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite://gazette.db` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Number of news items on the home feed.
    pub home_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Substrings that make a comment invalid, matched case-insensitively.
    pub forbidden_words: Vec<String>,
}

impl Default for GazetteConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "127.0.0.1:8000".to_string(),
                request_timeout_ms: 30_000,
            },
            database: DatabaseConfig {
                url: "sqlite://gazette.db".to_string(),
                max_connections: 5,
                acquire_timeout_seconds: 10,
            },
            session: SessionConfig {
                cookie_name: constants::SESSION_COOKIE_NAME.to_string(),
                ttl_hours: constants::DEFAULT_SESSION_TTL_HOURS,
            },
            news: NewsConfig {
                home_page_size: constants::DEFAULT_HOME_PAGE_SIZE,
            },
            moderation: ModerationConfig {
                forbidden_words: constants::DEFAULT_FORBIDDEN_WORDS
                    .iter()
                    .map(|w| (*w).to_string())
                    .collect(),
            },
        }
    }
}

impl GazetteConfig {
    /// Validate invariants that would otherwise surface as confusing
    /// runtime behavior.
    pub fn validate(&self) -> Result<()> {
        if self.news.home_page_size == 0 {
            return Err(GazetteError::Configuration(
                "news.home_page_size must be at least 1".to_string(),
            ));
        }
        if self.session.ttl_hours <= 0 {
            return Err(GazetteError::Configuration(
                "session.ttl_hours must be positive".to_string(),
            ));
        }
        if self.session.cookie_name.is_empty() {
            return Err(GazetteError::Configuration(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(GazetteError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
