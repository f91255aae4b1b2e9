//! # Session Identity & Ownership Guard
//!
//! Two related pieces live here. The identity side: the [`CurrentUser`]
//! type the session middleware stashes in request extensions, the
//! extractors handlers use to require or merely observe it, and the
//! cookie plumbing. The authorization side: the ownership guard deciding
//! who may touch an owned record.
//!
//! The guard deliberately renders "not yours" as *not found*: a non-owner
//! probing another user's object URLs learns nothing about whether the
//! record exists.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;

use crate::web::errors::ApiError;

/// Identity resolved from the session cookie for the current request.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// The raw session token behind the current identity; logout needs it to
/// delete the right row.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Optional identity: present for logged-in requests, `None` otherwise.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

/// Optional session token, mirroring [`MaybeUser`].
#[derive(Debug, Clone)]
pub struct MaybeSessionToken(pub Option<SessionToken>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::login_required(&parts.uri))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<CurrentUser>().cloned()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeSessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSessionToken(
            parts.extensions.get::<SessionToken>().cloned(),
        ))
    }
}

/// Outcome of the ownership check for an owned record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Identity present and equal to the record's owner.
    Allow,
    /// Identity present but not the owner; rendered as HTTP 404.
    NotFound,
    /// No identity; rendered as a redirect to the login form.
    LoginRequired,
}

/// The ownership guard: who may reach an owned record's mutation and
/// restricted-view endpoints.
pub fn authorize_owner(identity: Option<i64>, owner_id: i64) -> AccessDecision {
    match identity {
        None => AccessDecision::LoginRequired,
        Some(user_id) if user_id == owner_id => AccessDecision::Allow,
        Some(_) => AccessDecision::NotFound,
    }
}

/// Handler-facing wrapper: the anonymous case is already handled by the
/// [`CurrentUser`] extractor, so only the not-owner outcome remains.
pub fn require_owner(user: &CurrentUser, owner_id: i64) -> Result<(), ApiError> {
    match authorize_owner(Some(user.id), owner_id) {
        AccessDecision::Allow => Ok(()),
        _ => Err(ApiError::NotFound),
    }
}

/// Pull the session token out of a `Cookie` request header.
pub fn extract_session_token<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            (name == cookie_name && !value.is_empty()).then_some(value)
        })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(cookie_name: &str, token: &str, ttl_hours: i64) -> String {
    let max_age = ttl_hours * 3600;
    format!("{cookie_name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session_cookie(cookie_name: &str) -> String {
    format!("{cookie_name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Validate a post-login redirect target. Only same-origin absolute paths
/// are honored; anything else falls back to the home feed.
pub fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") => n.to_string(),
        _ => crate::constants::paths::HOME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_identity_is_sent_to_login() {
        assert_eq!(authorize_owner(None, 7), AccessDecision::LoginRequired);
    }

    #[test]
    fn owner_is_allowed() {
        assert_eq!(authorize_owner(Some(7), 7), AccessDecision::Allow);
    }

    #[test]
    fn non_owner_sees_not_found_not_forbidden() {
        assert_eq!(authorize_owner(Some(8), 7), AccessDecision::NotFound);
    }

    #[test]
    fn require_owner_maps_mismatch_to_not_found() {
        let user = CurrentUser {
            id: 8,
            username: "reader".to_string(),
        };
        assert!(matches!(
            require_owner(&user, 7),
            Err(ApiError::NotFound)
        ));
        let owner = CurrentUser {
            id: 7,
            username: "author".to_string(),
        };
        assert!(require_owner(&owner, 7).is_ok());
    }

    #[test]
    fn session_token_is_found_among_other_cookies() {
        let header = "theme=dark; gazette_session=abc123; lang=en";
        assert_eq!(
            extract_session_token(header, "gazette_session"),
            Some("abc123")
        );
        assert_eq!(extract_session_token(header, "missing"), None);
        assert_eq!(extract_session_token("gazette_session=", "gazette_session"), None);
    }

    #[test]
    fn next_target_must_be_a_same_origin_path() {
        assert_eq!(sanitize_next(Some("/notes/add")), "/notes/add");
        assert_eq!(sanitize_next(Some("//evil.example")), "/");
        assert_eq!(sanitize_next(Some("https://evil.example")), "/");
        assert_eq!(sanitize_next(None), "/");
    }
}
