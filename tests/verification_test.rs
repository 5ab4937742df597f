mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestApp;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serial_test::serial;

async fn sign_up_and_fetch_code(app: &TestApp, email: &str) -> (String, String) {
    let resp = app.sign_up("Ada", email, "hyperion1").await;
    resp.assert_status(StatusCode::OK);
    let json: serde_json::Value = resp.json();
    let token = json["token"].as_str().unwrap().to_string();

    let verification = entity::verification::Entity::find()
        .filter(entity::verification::Column::Identifier.eq(email))
        .one(&app.state.db)
        .await
        .unwrap()
        .expect("verification row");

    (token, verification.value)
}

#[serial]
#[tokio::test]
async fn verify_email_marks_user_verified() {
    let app = TestApp::new().await;
    let (token, code) = sign_up_and_fetch_code(&app, "ada@test.com").await;

    app.post_json(
        "/api/auth/verify-email",
        serde_json::json!({"email": "ada@test.com", "code": code}),
    )
    .await
    .assert_status(StatusCode::OK);

    let session: serde_json::Value = app.get_auth("/api/auth/session", &token).await.json();
    assert_eq!(session["user"]["email_verified"], true);
}

#[serial]
#[tokio::test]
async fn verify_email_wrong_code() {
    let app = TestApp::new().await;
    let (_token, _code) = sign_up_and_fetch_code(&app, "ada@test.com").await;

    let resp = app
        .post_json(
            "/api/auth/verify-email",
            serde_json::json!({"email": "ada@test.com", "code": "deadbeef"}),
        )
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[serial]
#[tokio::test]
async fn verify_email_code_is_single_use() {
    let app = TestApp::new().await;
    let (_token, code) = sign_up_and_fetch_code(&app, "ada@test.com").await;

    app.post_json(
        "/api/auth/verify-email",
        serde_json::json!({"email": "ada@test.com", "code": code}),
    )
    .await
    .assert_status(StatusCode::OK);

    let resp = app
        .post_json(
            "/api/auth/verify-email",
            serde_json::json!({"email": "ada@test.com", "code": code}),
        )
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[serial]
#[tokio::test]
async fn verify_email_expired_code_rejected_and_removed() {
    let app = TestApp::new().await;
    let (_token, code) = sign_up_and_fetch_code(&app, "ada@test.com").await;

    let stored = entity::verification::Entity::find()
        .filter(entity::verification::Column::Identifier.eq("ada@test.com"))
        .one(&app.state.db)
        .await
        .unwrap()
        .expect("verification row");

    let mut active: entity::verification::ActiveModel = stored.into();
    active.expires_at = Set((Utc::now() - Duration::hours(1)).naive_utc());
    active.update(&app.state.db).await.unwrap();

    let resp = app
        .post_json(
            "/api/auth/verify-email",
            serde_json::json!({"email": "ada@test.com", "code": code}),
        )
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let json: serde_json::Value = resp.json();
    assert_eq!(json["error"], "verification_expired");

    let remaining = entity::verification::Entity::find()
        .filter(entity::verification::Column::Identifier.eq("ada@test.com"))
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(remaining.is_none(), "expired verification row should be deleted");
}
