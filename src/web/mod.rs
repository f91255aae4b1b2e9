//! # Web Layer
//!
//! Router assembly plus everything request-scoped: application state,
//! session identity, the ownership guard, forms, handlers, and the HTTP
//! error mapping.

pub mod auth;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use state::AppState;

/// Assemble the full route table with the session middleware applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::news::home_page))
        .route("/health", get(handlers::health::basic_health))
        .route("/news/{id}", get(handlers::news::news_detail))
        .route(
            "/news/{id}/comments",
            axum::routing::post(handlers::comments::create_comment),
        )
        .route(
            "/comments/{id}/edit",
            get(handlers::comments::edit_comment_form).post(handlers::comments::update_comment),
        )
        .route(
            "/comments/{id}/delete",
            get(handlers::comments::confirm_delete_comment)
                .post(handlers::comments::delete_comment),
        )
        .route("/notes", get(handlers::notes::list_notes))
        .route(
            "/notes/add",
            get(handlers::notes::new_note_form).post(handlers::notes::create_note),
        )
        .route("/notes/{slug}", get(handlers::notes::note_detail))
        .route(
            "/notes/{slug}/edit",
            get(handlers::notes::edit_note_form).post(handlers::notes::update_note),
        )
        .route(
            "/notes/{slug}/delete",
            get(handlers::notes::confirm_delete_note)
                .post(handlers::notes::delete_note)
                .delete(handlers::notes::delete_note),
        )
        .route(
            "/auth/login",
            get(handlers::accounts::login_page).post(handlers::accounts::login),
        )
        .route("/auth/logout", get(handlers::accounts::logout_page))
        .route(
            "/auth/signup",
            get(handlers::accounts::signup_page).post(handlers::accounts::signup),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::session::load_session,
        ))
        .with_state(state)
}
