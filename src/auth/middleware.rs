use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use sea_orm::EntityTrait;

use crate::auth::session;
use crate::error::AppError;

/// Best-effort client IP: X-Forwarded-For first hop, then X-Real-IP.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

/// Extracts the live session (and its user) from a Bearer token.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session: entity::session::Model,
    pub user: entity::user::Model,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync + AsRef<crate::AppState>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state: &crate::AppState = state.as_ref();

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let stored = session::find_live_session(&app_state.db, token).await?;

        let user = entity::user::Entity::find_by_id(stored.user_id.clone())
            .one(&app_state.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(CurrentSession {
            session: stored,
            user,
        })
    }
}

/// Client metadata recorded on newly created sessions.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(ClientMeta {
            ip_address: client_ip(&parts.headers),
            user_agent,
        })
    }
}
