//! # Account Handlers
//!
//! Signup, login, and logout for the session identity provider. Login
//! honors a `next` target (query parameter on GET, hidden field on POST)
//! so protected routes can bounce anonymous visitors here and send them
//! back after they authenticate.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::paths;
use crate::models::{NewUser, Session, User};
use crate::web::auth::{
    clear_session_cookie, sanitize_next, session_cookie, MaybeSessionToken,
};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::forms::{LoginForm, NextQuery, SignupForm};
use crate::web::responses::{redirect_found, FormView, NON_FIELD_ERRORS};
use crate::web::state::AppState;

/// Account form page/re-render response.
#[derive(Debug, Serialize)]
pub struct AccountFormResponse {
    pub form: FormView,
}

fn login_form_view(username: &str, next: &str) -> FormView {
    FormView::new()
        .field("username", username)
        .field("password", "")
        .field("next", next)
}

/// Login form: GET /auth/login
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<AccountFormResponse> {
    Json(AccountFormResponse {
        form: login_form_view("", query.next.as_deref().unwrap_or("")),
    })
}

/// Authenticate: POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let next = form.next.as_deref().or(query.next.as_deref());

    let user = User::find_by_username(&state.db_pool, &form.username)
        .await
        .map_err(|e| ApiError::database_error(format!("loading user: {e}")))?;

    let authenticated = match user {
        Some(user) if user.verify_password(&form.password) => user,
        _ => {
            warn!(username = %form.username, "Failed login attempt");
            let mut view = login_form_view(&form.username, next.unwrap_or(""));
            view.add_error(NON_FIELD_ERRORS, "Invalid username or password");
            return Ok(Json(AccountFormResponse { form: view }).into_response());
        }
    };

    let session = Session::create(
        &state.db_pool,
        authenticated.id,
        state.config.session.ttl_hours,
    )
    .await
    .map_err(|e| ApiError::database_error(format!("creating session: {e}")))?;

    info!(user_id = authenticated.id, username = %authenticated.username, "User logged in");

    let cookie = session_cookie(
        &state.config.session.cookie_name,
        &session.token,
        state.config.session.ttl_hours,
    );

    let mut response = redirect_found(&sanitize_next(next));
    response.headers_mut().insert(
        header::SET_COOKIE,
        cookie.parse().map_err(|_| ApiError::Internal)?,
    );

    Ok(response)
}

/// End the session and render the logged-out page: GET /auth/logout
pub async fn logout_page(
    State(state): State<AppState>,
    MaybeSessionToken(token): MaybeSessionToken,
) -> ApiResult<Response> {
    if let Some(token) = token {
        Session::delete(&state.db_pool, &token.0)
            .await
            .map_err(|e| ApiError::database_error(format!("deleting session: {e}")))?;
        info!("User logged out");
    }

    let mut response = Json(json!({"detail": "Logged out"})).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        clear_session_cookie(&state.config.session.cookie_name)
            .parse()
            .map_err(|_| ApiError::Internal)?,
    );

    Ok(response)
}

/// Signup form: GET /auth/signup
pub async fn signup_page() -> Json<AccountFormResponse> {
    Json(AccountFormResponse {
        form: FormView::new().field("username", "").field("password", ""),
    })
}

/// Register: POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> ApiResult<Response> {
    let mut view = FormView::new()
        .field("username", form.username.as_str())
        .field("password", "");

    if form.username.trim().is_empty() {
        view.add_error("username", "This field is required");
    }
    if form.password.is_empty() {
        view.add_error("password", "This field is required");
    }

    if !view.has_errors()
        && User::find_by_username(&state.db_pool, &form.username)
            .await
            .map_err(|e| ApiError::database_error(format!("checking username: {e}")))?
            .is_some()
    {
        view.add_error("username", "A user with that username already exists");
    }

    if view.has_errors() {
        return Ok(Json(AccountFormResponse { form: view }).into_response());
    }

    let user = User::create(
        &state.db_pool,
        NewUser {
            username: form.username,
            password: form.password,
        },
    )
    .await
    .map_err(|e| ApiError::database_error(format!("creating user: {e}")))?;

    info!(user_id = user.id, username = %user.username, "User signed up");

    Ok(redirect_found(paths::LOGIN))
}
