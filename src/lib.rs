pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod views;

use sea_orm::DatabaseConnection;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AsRef<AppState> for AppState {
    fn as_ref(&self) -> &AppState {
        self
    }
}
