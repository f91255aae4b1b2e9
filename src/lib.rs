#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Gazette
//!
//! A small session-authenticated web service hosting two applications that
//! share one authorization pattern: a public news feed with per-article
//! reader comments, and a private per-user notes collection addressed by
//! slug.
//!
//! ## Access model
//!
//! - News list and detail are public; commenting requires a login.
//! - A comment or note is mutable only by its owning author. Any other
//!   logged-in user gets a 404 on those object URLs, so existence never
//!   leaks; anonymous users are redirected to `login?next=<url>`.
//! - Notes are private end to end: list and detail are owner-only too.
//!
//! ## Module Organization
//!
//! - [`models`] - Data layer: users, sessions, news, comments, notes
//! - [`database`] - Pool construction and schema bootstrap
//! - [`web`] - Router, handlers, session identity, ownership guard
//! - [`validation`] - Comment moderation and note slug resolution
//! - [`slug`] - Slug derivation with Cyrillic transliteration
//! - [`config`] - Layered configuration management
//! - [`error`] - Crate-level error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gazette::config::GazetteConfig;
//! use gazette::web::{build_router, state::AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = AppState::new(GazetteConfig::default()).await?;
//! let router = build_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod slug;
pub mod validation;
pub mod web;

pub use error::{GazetteError, Result};
