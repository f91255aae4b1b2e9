//! # Database Schema Bootstrap
//!
//! The schema is small enough to ship embedded rather than as a directory
//! of migration files. `run_all` is idempotent (`CREATE TABLE IF NOT
//! EXISTS`), so it runs unconditionally at startup; `run_fresh_schema`
//! drops everything first and exists for tests and throwaway environments.

use sqlx::SqlitePool;
use tracing::debug;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS news (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text  TEXT NOT NULL,
    date  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    news_id    INTEGER NOT NULL REFERENCES news(id) ON DELETE CASCADE,
    author_id  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    text       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    text      TEXT NOT NULL,
    slug      TEXT NOT NULL UNIQUE,
    author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_news_date ON news(date DESC);
CREATE INDEX IF NOT EXISTS idx_comments_news_created ON comments(news_id, created_at);
CREATE INDEX IF NOT EXISTS idx_notes_author ON notes(author_id);
"#;

const DROP_ALL: &str = r#"
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS notes;
DROP TABLE IF EXISTS sessions;
DROP TABLE IF EXISTS news;
DROP TABLE IF EXISTS users;
"#;

/// Manages database schema setup.
pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Create any missing tables and indexes. Safe to run on every start.
    pub async fn run_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(pool).await?;
        debug!("Database schema ensured");
        Ok(())
    }

    /// Drop and recreate the whole schema.
    pub async fn run_fresh_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(DROP_ALL).execute(pool).await?;
        sqlx::raw_sql(SCHEMA).execute(pool).await?;
        debug!("Database schema rebuilt from scratch");
        Ok(())
    }
}
