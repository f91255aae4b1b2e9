//! # Shared Test Infrastructure
//!
//! Boots the full application against an isolated in-memory SQLite
//! database and drives the assembled router directly through
//! `tower::ServiceExt::oneshot`, so no ports are bound and tests stay
//! independent. Fixture helpers create users, sessions (the `force_login`
//! analog inserts a session row directly), news, comments, and notes.

#![allow(dead_code)] // each integration test binary uses its own subset

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use gazette::config::GazetteConfig;
use gazette::models::{
    Comment, NewComment, NewNews, NewNote, NewUser, News, Note, Session, User,
};
use gazette::web::state::AppState;
use gazette::web::build_router;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub config: GazetteConfig,
}

/// Boot the application against a fresh in-memory database.
///
/// The pool is capped at one connection: every connection to
/// `sqlite::memory:` is its own database, so the single connection *is*
/// the database.
pub async fn spawn_app() -> TestApp {
    let mut config = GazetteConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = 1;

    let state = AppState::new(config.clone()).await.expect("failed to build test app state");

    TestApp {
        pool: state.db_pool.clone(),
        router: build_router(state),
        config,
    }
}

impl TestApp {
    // ---- fixtures -------------------------------------------------------

    pub async fn create_user(&self, username: &str) -> User {
        User::create(
            &self.pool,
            NewUser {
                username: username.to_string(),
                password: "correct-horse-battery".to_string(),
            },
        )
        .await
        .expect("failed to create user")
    }

    /// Log a user in without going through the login form: insert a
    /// session row and return the `Cookie` header value for it.
    pub async fn force_login(&self, user: &User) -> String {
        let session = Session::create(&self.pool, user.id, self.config.session.ttl_hours)
            .await
            .expect("failed to create session");
        format!("{}={}", self.config.session.cookie_name, session.token)
    }

    pub async fn create_news(&self, title: &str, date: Option<NaiveDate>) -> News {
        News::create(
            &self.pool,
            NewNews {
                title: title.to_string(),
                text: "Just some text.".to_string(),
                date,
            },
        )
        .await
        .expect("failed to create news")
    }

    pub async fn create_comment(
        &self,
        news: &News,
        author: &User,
        text: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> Comment {
        Comment::create(
            &self.pool,
            NewComment {
                news_id: news.id,
                author_id: author.id,
                text: text.to_string(),
                created_at,
            },
        )
        .await
        .expect("failed to create comment")
    }

    pub async fn create_note(&self, author: &User, title: &str, slug: &str) -> Note {
        Note::create(
            &self.pool,
            NewNote {
                title: title.to_string(),
                text: "Note body.".to_string(),
                slug: slug.to_string(),
                author_id: author.id,
            },
        )
        .await
        .expect("failed to create note")
    }

    // ---- request helpers ------------------------------------------------

    pub async fn get(&self, path: &str) -> Response {
        self.request("GET", path, None, None).await
    }

    pub async fn get_as(&self, path: &str, cookie: &str) -> Response {
        self.request("GET", path, Some(cookie), None).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.request("POST", path, None, Some(encode_form(fields))).await
    }

    pub async fn post_form_as(
        &self,
        path: &str,
        cookie: &str,
        fields: &[(&str, &str)],
    ) -> Response {
        self.request("POST", path, Some(cookie), Some(encode_form(fields))).await
    }

    pub async fn delete_as(&self, path: &str, cookie: &str) -> Response {
        self.request("DELETE", path, Some(cookie), None).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        form_body: Option<String>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match form_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).expect("failed to encode form")
}

// ---- assertions ---------------------------------------------------------

/// Collect a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("Location header is not a string")
        .to_string()
}

/// The `assertRedirects` analog: a 302 pointing at the expected target.
pub fn assert_redirects_to(response: &Response, expected: &str) {
    assert_eq!(
        response.status(),
        StatusCode::FOUND,
        "expected a redirect, got {}",
        response.status()
    );
    assert_eq!(location(response), expected);
}

/// Redirect target for anonymous access to a protected URL.
pub fn login_redirect(next: &str) -> String {
    format!("/auth/login?next={next}")
}
