use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

use crate::auth::token::generate_session_token;
use crate::error::AppError;

/// Create a session row for a user. `lifetime` controls the expiry horizon;
/// expiry is always in the future at creation.
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: &str,
    lifetime: Duration,
    ip_address: Option<String>,
    user_agent: Option<String>,
) -> Result<entity::session::Model, AppError> {
    let now = Utc::now().naive_utc();
    let expires_at = (Utc::now() + lifetime).naive_utc();

    let model = entity::session::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        token: Set(generate_session_token()),
        expires_at: Set(expires_at),
        ip_address: Set(ip_address),
        user_agent: Set(user_agent),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(model.insert(db).await?)
}

/// Look up a session by its raw token, enforcing expiry. Expired rows are
/// deleted on sight.
pub async fn find_live_session(
    db: &DatabaseConnection,
    token: &str,
) -> Result<entity::session::Model, AppError> {
    let stored = entity::session::Entity::find()
        .filter(entity::session::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or(AppError::InvalidSession)?;

    if stored.expires_at < Utc::now().naive_utc() {
        stored.delete(db).await?;
        return Err(AppError::InvalidSession);
    }

    Ok(stored)
}

/// Delete a session by its raw token (sign-out).
pub async fn delete_session(db: &DatabaseConnection, token: &str) -> Result<(), AppError> {
    entity::session::Entity::delete_many()
        .filter(entity::session::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(())
}
