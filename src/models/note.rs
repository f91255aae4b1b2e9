//! # Note Model
//!
//! Personal notes addressed by slug. Notes are private: list and detail are
//! restricted to the owning author, and the slug is unique across all
//! notes, not per user, so a slug identifies exactly one note.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
}

/// New Note for creation. The slug must already be resolved and checked
/// for uniqueness by the caller (see `validation::resolve_note_slug`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
}

impl Note {
    /// Create a note.
    pub async fn create(pool: &SqlitePool, new_note: NewNote) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (title, text, slug, author_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, text, slug, author_id
            "#,
        )
        .bind(&new_note.title)
        .bind(&new_note.text)
        .bind(&new_note.slug)
        .bind(new_note.author_id)
        .fetch_one(pool)
        .await
    }

    /// Find a note by slug.
    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id
            FROM notes
            WHERE slug = ?1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    /// Whether a slug is already taken, optionally excluding one note
    /// (the note being edited keeps its own slug without conflict).
    pub async fn slug_exists(
        pool: &SqlitePool,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, sqlx::Error> {
        let count = match exclude_id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM notes WHERE slug = ?1 AND id != ?2",
                )
                .bind(slug)
                .bind(id)
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes WHERE slug = ?1")
                    .bind(slug)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count > 0)
    }

    /// All notes belonging to one author, in creation order.
    pub async fn list_for_author(
        pool: &SqlitePool,
        author_id: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id
            FROM notes
            WHERE author_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await
    }

    /// Replace title, text, and slug, returning the updated row.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: &str,
        text: &str,
        slug: &str,
    ) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = ?2, text = ?3, slug = ?4
            WHERE id = ?1
            RETURNING id, title, text, slug, author_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(text)
        .bind(slug)
        .fetch_one(pool)
        .await
    }

    /// Delete a note by ID. Returns the number of rows removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Total number of note rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await
    }
}
