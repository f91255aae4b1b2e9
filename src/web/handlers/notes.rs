//! # Note Handlers
//!
//! The private notes app. Everything here requires a login; detail, edit,
//! and delete are additionally owner-only through the ownership guard, so
//! another user's slug answers 404 whether or not it exists.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use tracing::info;

use crate::constants::paths;
use crate::models::{NewNote, Note};
use crate::validation::{resolve_note_slug, slug_conflict_error};
use crate::web::auth::{require_owner, CurrentUser};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::forms::NoteForm;
use crate::web::responses::{redirect_found, FormView};
use crate::web::state::AppState;

/// Notes list response: only the requesting author's notes.
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

/// Note form page/re-render response.
#[derive(Debug, Serialize)]
pub struct NoteFormResponse {
    pub form: FormView,
}

/// Note detail response.
#[derive(Debug, Serialize)]
pub struct NoteDetailResponse {
    pub note: Note,
}

fn note_form_view(title: &str, text: &str, slug: &str) -> FormView {
    FormView::new()
        .field("title", title)
        .field("text", text)
        .field("slug", slug)
}

fn require_fields(form: &NoteForm, view: &mut FormView) {
    if form.title.trim().is_empty() {
        view.add_error("title", "This field is required");
    }
    if form.text.trim().is_empty() {
        view.add_error("text", "This field is required");
    }
}

/// Own notes list: GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<NoteListResponse>> {
    let notes = Note::list_for_author(&state.db_pool, user.id)
        .await
        .map_err(|e| ApiError::database_error(format!("listing notes: {e}")))?;

    Ok(Json(NoteListResponse { notes }))
}

/// Note creation form: GET /notes/add
pub async fn new_note_form(_user: CurrentUser) -> Json<NoteFormResponse> {
    Json(NoteFormResponse {
        form: note_form_view("", "", ""),
    })
}

/// Create a note: POST /notes/add
pub async fn create_note(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<NoteForm>,
) -> ApiResult<Response> {
    let slug = resolve_note_slug(form.slug.as_deref(), &form.title);
    let mut view = note_form_view(&form.title, &form.text, &slug);

    require_fields(&form, &mut view);

    if !view.has_errors()
        && Note::slug_exists(&state.db_pool, &slug, None)
            .await
            .map_err(|e| ApiError::database_error(format!("checking slug '{slug}': {e}")))?
    {
        view.add_error("slug", slug_conflict_error(&slug));
    }

    if view.has_errors() {
        info!(user_id = user.id, slug = %slug, "Rejected note creation");
        return Ok(Json(NoteFormResponse { form: view }).into_response());
    }

    let note = Note::create(
        &state.db_pool,
        NewNote {
            title: form.title,
            text: form.text,
            slug,
            author_id: user.id,
        },
    )
    .await
    .map_err(|e| ApiError::database_error(format!("creating note: {e}")))?;

    info!(note_id = note.id, slug = %note.slug, author_id = user.id, "Note created");

    Ok(redirect_found(paths::NOTES))
}

/// Note detail: GET /notes/{slug}
pub async fn note_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
) -> ApiResult<Json<NoteDetailResponse>> {
    let note = Note::find_by_slug(&state.db_pool, &slug)
        .await
        .map_err(|e| ApiError::database_error(format!("loading note '{slug}': {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, note.author_id)?;

    Ok(Json(NoteDetailResponse { note }))
}

/// Note edit form: GET /notes/{slug}/edit
pub async fn edit_note_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
) -> ApiResult<Json<NoteFormResponse>> {
    let note = Note::find_by_slug(&state.db_pool, &slug)
        .await
        .map_err(|e| ApiError::database_error(format!("loading note '{slug}': {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, note.author_id)?;

    Ok(Json(NoteFormResponse {
        form: note_form_view(&note.title, &note.text, &note.slug),
    }))
}

/// Update a note: POST /notes/{slug}/edit
pub async fn update_note(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
    Form(form): Form<NoteForm>,
) -> ApiResult<Response> {
    let note = Note::find_by_slug(&state.db_pool, &slug)
        .await
        .map_err(|e| ApiError::database_error(format!("loading note '{slug}': {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, note.author_id)?;

    let new_slug = resolve_note_slug(form.slug.as_deref(), &form.title);
    let mut view = note_form_view(&form.title, &form.text, &new_slug);

    require_fields(&form, &mut view);

    if !view.has_errors()
        && Note::slug_exists(&state.db_pool, &new_slug, Some(note.id))
            .await
            .map_err(|e| ApiError::database_error(format!("checking slug '{new_slug}': {e}")))?
    {
        view.add_error("slug", slug_conflict_error(&new_slug));
    }

    if view.has_errors() {
        info!(note_id = note.id, user_id = user.id, "Rejected note edit");
        return Ok(Json(NoteFormResponse { form: view }).into_response());
    }

    let updated = Note::update(&state.db_pool, note.id, &form.title, &form.text, &new_slug)
        .await
        .map_err(|e| ApiError::database_error(format!("updating note '{slug}': {e}")))?;

    info!(note_id = updated.id, slug = %updated.slug, "Note updated");

    Ok(redirect_found(paths::NOTES))
}

/// Delete confirmation page: GET /notes/{slug}/delete
pub async fn confirm_delete_note(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
) -> ApiResult<Json<NoteDetailResponse>> {
    let note = Note::find_by_slug(&state.db_pool, &slug)
        .await
        .map_err(|e| ApiError::database_error(format!("loading note '{slug}': {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, note.author_id)?;

    Ok(Json(NoteDetailResponse { note }))
}

/// Delete a note: POST or DELETE /notes/{slug}/delete
pub async fn delete_note(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    user: CurrentUser,
) -> ApiResult<Response> {
    let note = Note::find_by_slug(&state.db_pool, &slug)
        .await
        .map_err(|e| ApiError::database_error(format!("loading note '{slug}': {e}")))?
        .ok_or(ApiError::NotFound)?;

    require_owner(&user, note.author_id)?;

    Note::delete(&state.db_pool, note.id)
        .await
        .map_err(|e| ApiError::database_error(format!("deleting note '{slug}': {e}")))?;

    info!(note_id = note.id, slug = %note.slug, author_id = user.id, "Note deleted");

    Ok(redirect_found(paths::NOTES))
}
