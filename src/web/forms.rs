//! # Request Forms
//!
//! Urlencoded form bodies accepted by the handlers. Every field carries a
//! serde default so a missing field reaches validation as an empty value
//! and re-renders the form instead of failing extraction with a 422.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    /// Optional; derived from the title when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Round-tripped from the login form's hidden field.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters carrying the post-login target (`?next=...`).
#[derive(Debug, Clone, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}
