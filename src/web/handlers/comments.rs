//! # Comment Handlers
//!
//! Creation, editing, and deletion of reader comments. Every route here
//! requires a login (the `CurrentUser` extractor bounces anonymous
//! requests to the login form), and edit/delete additionally pass the
//! ownership guard: a logged-in non-author gets a 404, never a 403.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use crate::constants::COMMENTS_FRAGMENT;
use crate::models::{Comment, NewComment, News};
use crate::validation::validate_comment_text;
use crate::web::auth::{require_owner, CurrentUser};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::forms::CommentForm;
use crate::web::responses::{redirect_found, FormView};
use crate::web::state::AppState;

/// Comment form page/re-render response.
#[derive(Debug, Serialize)]
pub struct CommentFormResponse {
    pub form: FormView,
}

/// Delete confirmation page response.
#[derive(Debug, Serialize)]
pub struct CommentDeleteResponse {
    pub comment: Comment,
}

fn detail_redirect(news_id: i64) -> Response {
    redirect_found(&format!("/news/{news_id}{COMMENTS_FRAGMENT}"))
}

/// Validate comment text against the moderation rules, collecting field
/// errors into the form view.
fn validated_form(state: &AppState, text: &str) -> FormView {
    let mut form = FormView::new().field("text", text);

    if text.trim().is_empty() {
        form.add_error("text", "This field is required");
    } else if let Err(message) =
        validate_comment_text(text, &state.config.moderation.forbidden_words)
    {
        form.add_error("text", message);
    }

    form
}

/// Create a comment under an article: POST /news/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    user: CurrentUser,
    Form(form): Form<CommentForm>,
) -> ApiResult<Response> {
    let news = News::find_by_id(&state.db_pool, news_id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading news {news_id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    let view = validated_form(&state, &form.text);
    if view.has_errors() {
        info!(news_id, user_id = user.id, "Rejected comment submission");
        return Ok(Json(CommentFormResponse { form: view }).into_response());
    }

    let comment = Comment::create(
        &state.db_pool,
        NewComment {
            news_id: news.id,
            author_id: user.id,
            text: form.text,
            created_at: None,
        },
    )
    .await
    .map_err(|e| ApiError::database_error(format!("creating comment: {e}")))?;

    info!(
        comment_id = comment.id,
        news_id,
        author_id = user.id,
        "Comment created"
    );

    Ok(detail_redirect(news_id))
}

/// Comment edit form: GET /comments/{id}/edit
pub async fn edit_comment_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: CurrentUser,
) -> ApiResult<Json<CommentFormResponse>> {
    let comment = Comment::find_by_id(&state.db_pool, id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading comment {id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, comment.author_id)?;

    Ok(Json(CommentFormResponse {
        form: FormView::new().field("text", comment.text),
    }))
}

/// Update a comment: POST /comments/{id}/edit
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: CurrentUser,
    Form(form): Form<CommentForm>,
) -> ApiResult<Response> {
    let comment = Comment::find_by_id(&state.db_pool, id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading comment {id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, comment.author_id)?;

    let view = validated_form(&state, &form.text);
    if view.has_errors() {
        info!(comment_id = id, user_id = user.id, "Rejected comment edit");
        return Ok(Json(CommentFormResponse { form: view }).into_response());
    }

    let updated = Comment::update_text(&state.db_pool, comment.id, &form.text)
        .await
        .map_err(|e| ApiError::database_error(format!("updating comment {id}: {e}")))?;

    info!(comment_id = updated.id, author_id = user.id, "Comment updated");

    Ok(detail_redirect(updated.news_id))
}

/// Delete confirmation page: GET /comments/{id}/delete
pub async fn confirm_delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: CurrentUser,
) -> ApiResult<Json<CommentDeleteResponse>> {
    let comment = Comment::find_by_id(&state.db_pool, id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading comment {id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, comment.author_id)?;

    Ok(Json(CommentDeleteResponse { comment }))
}

/// Delete a comment: POST /comments/{id}/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: CurrentUser,
) -> ApiResult<Response> {
    let comment = Comment::find_by_id(&state.db_pool, id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading comment {id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, comment.author_id)?;

    Comment::delete(&state.db_pool, comment.id)
        .await
        .map_err(|e| ApiError::database_error(format!("deleting comment {id}: {e}")))?;

    info!(comment_id = id, author_id = user.id, "Comment deleted");

    Ok(detail_redirect(comment.news_id))
}
