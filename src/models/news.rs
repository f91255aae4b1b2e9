//! # News Model
//!
//! Published articles for the public feed. News has no owner; anyone can
//! read it, and creation happens through editorial tooling rather than the
//! web surface, so the model carries no mutation endpoints.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Publication date; the home feed sorts on this, newest first.
    pub date: NaiveDate,
}

/// New News for creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    /// Defaults to today when not provided.
    pub date: Option<NaiveDate>,
}

impl News {
    /// Create a news item.
    pub async fn create(pool: &SqlitePool, new_news: NewNews) -> Result<News, sqlx::Error> {
        let date = new_news.date.unwrap_or_else(|| Utc::now().date_naive());

        sqlx::query_as::<_, News>(
            r#"
            INSERT INTO news (title, text, date)
            VALUES (?1, ?2, ?3)
            RETURNING id, title, text, date
            "#,
        )
        .bind(&new_news.title)
        .bind(&new_news.text)
        .bind(date)
        .fetch_one(pool)
        .await
    }

    /// Find a news item by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date
            FROM news
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// The home feed: newest first, capped at `limit` items.
    ///
    /// Ties on date fall back to id descending so the order stays total.
    pub async fn front_page(pool: &SqlitePool, limit: u32) -> Result<Vec<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date
            FROM news
            ORDER BY date DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await
    }

    /// Total number of news rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(pool)
            .await
    }
}
