//! # News Handlers
//!
//! The public read surface: the home feed and the article detail page.
//! Both are reachable anonymously; the detail page additionally offers a
//! comment form to logged-in readers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::models::{Comment, News};
use crate::web::auth::MaybeUser;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::responses::FormView;
use crate::web::state::AppState;

/// Home feed response.
#[derive(Debug, Serialize)]
pub struct HomePageResponse {
    pub news: Vec<News>,
}

/// Article detail response. `form` is present only for logged-in readers,
/// mirroring a server-rendered page that only shows the comment box after
/// login.
#[derive(Debug, Serialize)]
pub struct NewsDetailResponse {
    pub news: News,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
}

/// Home feed: GET /
///
/// Newest news first, truncated to the configured page size.
pub async fn home_page(State(state): State<AppState>) -> ApiResult<Json<HomePageResponse>> {
    let news = News::front_page(&state.db_pool, state.config.news.home_page_size)
        .await
        .map_err(|e| ApiError::database_error(format!("loading home feed: {e}")))?;

    debug!(count = news.len(), "Rendered home feed");

    Ok(Json(HomePageResponse { news }))
}

/// Article detail: GET /news/{id}
///
/// Comments come back oldest first.
pub async fn news_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Json<NewsDetailResponse>> {
    let news = News::find_by_id(&state.db_pool, id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading news {id}: {e}")))?
        .ok_or(ApiError::NotFound)?;

    let comments = Comment::list_for_news(&state.db_pool, news.id)
        .await
        .map_err(|e| ApiError::database_error(format!("loading comments for news {id}: {e}")))?;

    let form = user.map(|_| FormView::new().field("text", ""));

    Ok(Json(NewsDetailResponse {
        news,
        comments,
        form,
    }))
}
