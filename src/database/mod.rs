//! # Database Layer
//!
//! SQLite connection management and schema bootstrap.

pub mod connection;
pub mod migrations;

pub use connection::DatabaseConnection;
pub use migrations::DatabaseMigrations;
