//! Crate-level error types.
//!
//! Web handlers use the HTTP-aware [`crate::web::errors::ApiError`] instead;
//! this type covers everything that happens before a request exists
//! (configuration loading, database bootstrap, server startup).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<config::ConfigError> for GazetteError {
    fn from(err: config::ConfigError) -> Self {
        GazetteError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GazetteError>;
