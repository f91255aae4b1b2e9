//! Page content for the news app: feed size and order, comment order,
//! and when the comment form shows up.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::*;

#[tokio::test]
async fn home_page_news_count_is_capped() {
    let app = spawn_app().await;
    let page_size = app.config.news.home_page_size as usize;
    let today = Utc::now().date_naive();

    for index in 0..=page_size {
        app.create_news(
            &format!("News {index}"),
            Some(today - Duration::days(index as i64)),
        )
        .await;
    }

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["news"].as_array().unwrap().len(), page_size);
}

#[tokio::test]
async fn home_page_news_is_sorted_newest_first() {
    let app = spawn_app().await;
    let today = Utc::now().date_naive();

    // Created out of order on purpose.
    for offset in [3i64, 0, 5, 1] {
        app.create_news(
            &format!("News from {offset} days ago"),
            Some(today - Duration::days(offset)),
        )
        .await;
    }

    let body = response_json(app.get("/").await).await;
    let dates: Vec<String> = body["news"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["date"].as_str().unwrap().to_string())
        .collect();

    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted, "feed must be in reverse date order");
}

#[tokio::test]
async fn comments_are_sorted_chronologically() {
    let app = spawn_app().await;
    let author = app.create_user("author").await;
    let news = app.create_news("Headline", None).await;
    let now = Utc::now();

    // Created with shuffled backdated timestamps.
    for offset in [4i64, 1, 3, 0, 2] {
        app.create_comment(
            &news,
            &author,
            &format!("Comment {offset}"),
            Some(now + Duration::days(offset)),
        )
        .await;
    }

    let body = response_json(app.get(&format!("/news/{}", news.id)).await).await;
    let timestamps: Vec<String> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["created_at"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(timestamps.len(), 5);
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted, "comments must be oldest first");
}

#[tokio::test]
async fn anonymous_detail_page_has_no_comment_form() {
    let app = spawn_app().await;
    let news = app.create_news("Headline", None).await;

    let body = response_json(app.get(&format!("/news/{}", news.id)).await).await;

    assert!(body.get("form").is_none());
}

#[tokio::test]
async fn authorized_detail_page_has_comment_form() {
    let app = spawn_app().await;
    let news = app.create_news("Headline", None).await;
    let reader = app.create_user("reader").await;
    let cookie = app.force_login(&reader).await;

    let body = response_json(app.get_as(&format!("/news/{}", news.id), &cookie).await).await;

    assert!(body.get("form").is_some());
}

#[tokio::test]
async fn comment_edit_page_contains_form_with_current_text() {
    let app = spawn_app().await;
    let author = app.create_user("author").await;
    let news = app.create_news("Headline", None).await;
    let comment = app.create_comment(&news, &author, "Current text", None).await;
    let cookie = app.force_login(&author).await;

    let body = response_json(
        app.get_as(&format!("/comments/{}/edit", comment.id), &cookie)
            .await,
    )
    .await;

    assert_eq!(body["form"]["fields"]["text"], "Current text");
}
