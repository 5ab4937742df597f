mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::TestApp;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serial_test::serial;

async fn signed_up_token(app: &TestApp) -> String {
    let resp = app.sign_up("Ada", "ada@test.com", "hyperion1").await;
    resp.assert_status(StatusCode::OK);
    let json: serde_json::Value = resp.json();
    json["token"].as_str().unwrap().to_string()
}

#[serial]
#[tokio::test]
async fn get_session_returns_user() {
    let app = TestApp::new().await;
    let token = signed_up_token(&app).await;

    let resp = app.get_auth("/api/auth/session", &token).await;
    resp.assert_status(StatusCode::OK);

    let json: serde_json::Value = resp.json();
    assert_eq!(json["token"], token.as_str());
    assert_eq!(json["user"]["name"], "Ada");
    assert_eq!(json["user"]["email"], "ada@test.com");
}

#[serial]
#[tokio::test]
async fn get_session_requires_token() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/session")
        .body(Body::empty())
        .unwrap();

    let resp = app.request(req).await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[serial]
#[tokio::test]
async fn get_session_unknown_token() {
    let app = TestApp::new().await;

    let resp = app.get_auth("/api/auth/session", "totally-bogus-token").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[serial]
#[tokio::test]
async fn sign_out_invalidates_token() {
    let app = TestApp::new().await;
    let token = signed_up_token(&app).await;

    app.post_json_auth("/api/auth/sign-out", &token, serde_json::json!({}))
        .await
        .assert_status(StatusCode::OK);

    let resp = app.get_auth("/api/auth/session", &token).await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[serial]
#[tokio::test]
async fn sign_out_requires_auth() {
    let app = TestApp::new().await;

    let resp = app
        .post_json("/api/auth/sign-out", serde_json::json!({}))
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[serial]
#[tokio::test]
async fn expired_session_rejected_and_removed() {
    let app = TestApp::new().await;
    let token = signed_up_token(&app).await;

    // Age the session past its expiry
    let stored = entity::session::Entity::find()
        .filter(entity::session::Column::Token.eq(token.as_str()))
        .one(&app.state.db)
        .await
        .unwrap()
        .expect("session row");

    let mut active: entity::session::ActiveModel = stored.into();
    active.expires_at = Set((Utc::now() - Duration::hours(1)).naive_utc());
    active.update(&app.state.db).await.unwrap();

    let resp = app.get_auth("/api/auth/session", &token).await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let remaining = entity::session::Entity::find()
        .filter(entity::session::Column::Token.eq(token.as_str()))
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(remaining.is_none(), "expired session row should be deleted");
}

#[serial]
#[tokio::test]
async fn session_records_client_metadata() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/sign-up")
        .header("Content-Type", "application/json")
        .header("User-Agent", "vestibule-test/1.0")
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .body(Body::from(
            serde_json::to_vec(&serde_json::json!({
                "name": "Ada",
                "email": "ada@test.com",
                "password": "hyperion1",
            }))
            .unwrap(),
        ))
        .unwrap();

    let resp = app.request(req).await;
    resp.assert_status(StatusCode::OK);
    let json: serde_json::Value = resp.json();
    let token = json["token"].as_str().unwrap();

    let stored = entity::session::Entity::find()
        .filter(entity::session::Column::Token.eq(token))
        .one(&app.state.db)
        .await
        .unwrap()
        .expect("session row");

    assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(stored.user_agent.as_deref(), Some("vestibule-test/1.0"));
}
