//! # Comment Model
//!
//! Reader comments under a news item. Each comment belongs to exactly one
//! news item and one author; only the author may edit or delete it (the
//! web layer enforces that through the ownership guard).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// New Comment for creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    /// Defaults to now when not provided; fixtures backdate through this.
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a comment.
    pub async fn create(
        pool: &SqlitePool,
        new_comment: NewComment,
    ) -> Result<Comment, sqlx::Error> {
        let created_at = new_comment.created_at.unwrap_or_else(Utc::now);

        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (news_id, author_id, text, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, news_id, author_id, text, created_at
            "#,
        )
        .bind(new_comment.news_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.text)
        .bind(created_at)
        .fetch_one(pool)
        .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, news_id, author_id, text, created_at
            FROM comments
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All comments under one news item, oldest first.
    ///
    /// Ties on the timestamp fall back to id so the order stays total.
    pub async fn list_for_news(
        pool: &SqlitePool,
        news_id: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, news_id, author_id, text, created_at
            FROM comments
            WHERE news_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(news_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the comment text, returning the updated row.
    pub async fn update_text(
        pool: &SqlitePool,
        id: i64,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET text = ?2
            WHERE id = ?1
            RETURNING id, news_id, author_id, text, created_at
            "#,
        )
        .bind(id)
        .bind(text)
        .fetch_one(pool)
        .await
    }

    /// Delete a comment by ID. Returns the number of rows removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Total number of comment rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(pool)
            .await
    }
}
