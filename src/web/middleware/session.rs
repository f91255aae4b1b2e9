//! # Session Resolution Middleware
//!
//! Resolves the session cookie to a user once per request and stashes the
//! identity in request extensions for the extractors in
//! [`crate::web::auth`]. Requests without a valid, unexpired session pass
//! through anonymous; the decision whether that matters belongs to each
//! route's extractors and the ownership guard.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::models::Session;
use crate::web::auth::{extract_session_token, CurrentUser, SessionToken};
use crate::web::state::AppState;

pub async fn load_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_session_token(raw, &state.config.session.cookie_name))
        .map(str::to_owned);

    if let Some(token) = token {
        match Session::authenticate(&state.db_pool, &token).await {
            Ok(Some(user)) => {
                debug!(user_id = user.id, username = %user.username, "Resolved session identity");
                request.extensions_mut().insert(CurrentUser {
                    id: user.id,
                    username: user.username,
                });
                request.extensions_mut().insert(SessionToken(token));
            }
            Ok(None) => {
                debug!("Session token unknown or expired; request stays anonymous");
            }
            Err(e) => {
                // Treat lookup failures as anonymous rather than failing the
                // request; protected routes will bounce to login.
                warn!(error = %e, "Session lookup failed");
            }
        }
    }

    next.run(request).await
}
