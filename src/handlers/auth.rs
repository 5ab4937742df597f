use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::{ClientMeta, CurrentSession};
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::auth::session;
use crate::auth::token::generate_verification_code;
use crate::error::AppError;
use crate::forms;
use crate::AppState;

/// Provider id of the local email/password identity.
const CREDENTIAL_PROVIDER: &str = "credential";

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub avatar_url: Option<String>,
}

impl From<entity::user::Model> for UserResponse {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified: user.email_verified,
            avatar_url: user.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at: chrono::NaiveDateTime,
    pub user: UserResponse,
}

// --- Handlers ---

pub async fn sign_up(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if !forms::is_valid_email(&req.email) {
        return Err(AppError::InvalidEmail);
    }
    validate_password(&req.password)?;

    let existing = entity::user::Entity::find()
        .filter(entity::user::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    let now = Utc::now().naive_utc();
    let user_id = Uuid::new_v4().to_string();

    let user = entity::user::ActiveModel {
        id: Set(user_id.clone()),
        name: Set(name.to_string()),
        email: Set(req.email.clone()),
        email_verified: Set(false),
        avatar_url: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let user = user.insert(&state.db).await?;

    // Local credential identity carrying the password hash
    let password_hash = hash_password(&req.password)?;
    let account = entity::account::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.clone()),
        account_id: Set(user_id.clone()),
        provider_id: Set(CREDENTIAL_PROVIDER.to_string()),
        access_token: Set(None),
        refresh_token: Set(None),
        id_token: Set(None),
        access_token_expires_at: Set(None),
        refresh_token_expires_at: Set(None),
        scope: Set(None),
        password: Set(Some(password_hash)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    account.insert(&state.db).await?;

    // Verification code for the address; surfaced through logs until a
    // mailer is wired up.
    let code = generate_verification_code();
    let verification = entity::verification::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        identifier: Set(req.email.clone()),
        value: Set(code.clone()),
        expires_at: Set(
            (Utc::now() + Duration::hours(state.config.verification_expiry_hours)).naive_utc(),
        ),
        created_at: Set(now),
        updated_at: Set(now),
    };
    verification.insert(&state.db).await?;
    tracing::debug!(email = %req.email, %code, "issued email verification code");

    let created = session::create_session(
        &state.db,
        &user_id,
        Duration::days(state.config.session_expiry_days),
        meta.ip_address,
        meta.user_agent,
    )
    .await?;

    Ok(Json(SessionResponse {
        token: created.token,
        expires_at: created.expires_at,
        user: user.into(),
    }))
}

pub async fn sign_in(
    State(state): State<AppState>,
    meta: ClientMeta,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    // Unknown email, missing credential account and bad password are
    // indistinguishable to the caller.
    let user = entity::user::Entity::find()
        .filter(entity::user::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let account = entity::account::Entity::find()
        .filter(entity::account::Column::UserId.eq(user.id.as_str()))
        .filter(entity::account::Column::ProviderId.eq(CREDENTIAL_PROVIDER))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_hash = account.password.ok_or(AppError::InvalidCredentials)?;
    if !verify_password(&req.password, &password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let lifetime = if req.remember_me {
        Duration::days(state.config.session_expiry_days)
    } else {
        Duration::hours(state.config.session_short_expiry_hours)
    };

    let created = session::create_session(
        &state.db,
        &user.id,
        lifetime,
        meta.ip_address,
        meta.user_agent,
    )
    .await?;

    Ok(Json(SessionResponse {
        token: created.token,
        expires_at: created.expires_at,
        user: user.into(),
    }))
}

pub async fn sign_out(
    current: CurrentSession,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    session::delete_session(&state.db, &current.session.token).await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

pub async fn get_session(
    current: CurrentSession,
) -> Result<Json<SessionResponse>, AppError> {
    Ok(Json(SessionResponse {
        token: current.session.token,
        expires_at: current.session.expires_at,
        user: current.user.into(),
    }))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let stored = entity::verification::Entity::find()
        .filter(entity::verification::Column::Identifier.eq(req.email.as_str()))
        .filter(entity::verification::Column::Value.eq(req.code.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidVerification)?;

    if stored.expires_at < Utc::now().naive_utc() {
        stored.delete(&state.db).await?;
        return Err(AppError::VerificationExpired);
    }

    let user = entity::user::Entity::find()
        .filter(entity::user::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let mut active: entity::user::ActiveModel = user.into();
    active.email_verified = Set(true);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(&state.db).await?;

    stored.delete(&state.db).await?;

    Ok(Json(serde_json::json!({"status": "ok"})))
}
