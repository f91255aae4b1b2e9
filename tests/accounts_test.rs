//! Signup, login, logout, and session lifetime behavior.

mod common;

use axum::http::{header, StatusCode};
use common::*;
use gazette::models::{Session, User};

async fn user_count(app: &TestApp) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn signup_creates_user_and_redirects_to_login() {
    let app = spawn_app().await;

    let response = app
        .post_form(
            "/auth/signup",
            &[("username", "newcomer"), ("password", "hunter2hunter2")],
        )
        .await;

    assert_redirects_to(&response, "/auth/login");
    assert!(User::find_by_username(&app.pool, "newcomer")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn_app().await;
    app.create_user("taken").await;

    let response = app
        .post_form(
            "/auth/signup",
            &[("username", "taken"), ("password", "whatever123")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["form"]["errors"].get("username").is_some());
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn login_sets_session_cookie_and_redirects_home() {
    let app = spawn_app().await;
    app.create_user("resident").await;

    let response = app
        .post_form(
            "/auth/login",
            &[("username", "resident"), ("password", "correct-horse-battery")],
        )
        .await;

    assert_redirects_to(&response, "/");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("{}=", app.config.session.cookie_name)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_honors_next_target() {
    let app = spawn_app().await;
    app.create_user("resident").await;

    let response = app
        .post_form(
            "/auth/login",
            &[
                ("username", "resident"),
                ("password", "correct-horse-battery"),
                ("next", "/notes/add"),
            ],
        )
        .await;

    assert_redirects_to(&response, "/notes/add");
}

#[tokio::test]
async fn login_ignores_external_next_target() {
    let app = spawn_app().await;
    app.create_user("resident").await;

    for bad in ["https://evil.example/", "//evil.example"] {
        let response = app
            .post_form(
                "/auth/login",
                &[
                    ("username", "resident"),
                    ("password", "correct-horse-battery"),
                    ("next", bad),
                ],
            )
            .await;

        assert_redirects_to(&response, "/");
    }
}

#[tokio::test]
async fn wrong_password_rerenders_form_without_a_session() {
    let app = spawn_app().await;
    app.create_user("resident").await;

    let response = app
        .post_form(
            "/auth/login",
            &[("username", "resident"), ("password", "wrong")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = response_json(response).await;
    assert!(body["form"]["errors"].get("__all__").is_some());
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    let user = app.create_user("resident").await;
    let cookie = app.force_login(&user).await;

    let response = app.get_as("/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old cookie no longer authenticates anything.
    let after = app.get_as("/notes", &cookie).await;
    assert_redirects_to(&after, &login_redirect("/notes"));
}

#[tokio::test]
async fn expired_session_is_anonymous() {
    let app = spawn_app().await;
    let user = app.create_user("resident").await;
    let session = Session::create(&app.pool, user.id, -1).await.unwrap();
    let cookie = format!("{}={}", app.config.session.cookie_name, session.token);

    let response = app.get_as("/notes", &cookie).await;

    assert_redirects_to(&response, &login_redirect("/notes"));
}

#[tokio::test]
async fn login_page_carries_next_through_the_form() {
    let app = spawn_app().await;

    let body = response_json(app.get("/auth/login?next=/notes/add").await).await;

    assert_eq!(body["form"]["fields"]["next"], "/notes/add");
}
