//! # Session Model
//!
//! Server-side login sessions. The browser holds only the opaque token;
//! everything else lives in this table, so logout and expiry are effective
//! immediately without any client cooperation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for a user, valid for `ttl_hours` from now.
    pub async fn create(
        pool: &SqlitePool,
        user_id: i64,
        ttl_hours: i64,
    ) -> Result<Session, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(now)
        .bind(now + Duration::hours(ttl_hours))
        .fetch_one(pool)
        .await
    }

    /// Resolve a session token to its user, ignoring expired sessions.
    pub async fn authenticate(
        pool: &SqlitePool,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?1 AND s.expires_at > ?2
            "#,
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_optional(pool)
        .await
    }

    /// Delete a session by token. Deleting an unknown token is not an error.
    pub async fn delete(pool: &SqlitePool, token: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Remove sessions past their expiry. Returns how many were purged.
    pub async fn purge_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
            .bind(Utc::now())
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
