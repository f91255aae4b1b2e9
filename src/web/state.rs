//! # Web Application State
//!
//! Shared state for the web layer: the loaded configuration and the
//! database pool. Cloned per request by axum, so everything inside is
//! either `Arc`ed or itself cheaply cloneable.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::config::GazetteConfig;
use crate::database::{DatabaseConnection, DatabaseMigrations};
use crate::error::Result;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GazetteConfig>,
    pub db_pool: SqlitePool,
}

impl AppState {
    /// Build application state: validate configuration, open the pool,
    /// and ensure the schema exists.
    pub async fn new(config: GazetteConfig) -> Result<Self> {
        config.validate()?;

        let connection = DatabaseConnection::new(&config.database).await?;
        let db_pool = connection.pool().clone();

        DatabaseMigrations::run_all(&db_pool).await?;

        info!(
            database_url = %config.database.url,
            home_page_size = config.news.home_page_size,
            "Application state created"
        );

        Ok(Self {
            config: Arc::new(config),
            db_pool,
        })
    }
}
