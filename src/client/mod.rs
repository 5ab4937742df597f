//! Front-end side of the authentication service: the operation set the
//! views consume, an HTTP implementation of it, and the shared session
//! cell the home view observes.

mod http;
mod session;

use async_trait::async_trait;

pub use http::HttpAuthClient;
pub use session::{Session, SessionCell, SessionUser};

/// The remote operations the views trigger. Implementations are swappable
/// so tests can substitute a double.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthClientError>;

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session, AuthClientError>;

    async fn sign_out(&self) -> Result<(), AuthClientError>;

    /// Shared cell holding the current session, kept up to date by the
    /// other operations.
    fn session(&self) -> &SessionCell;
}

/// Failure of a remote operation. Every variant collapses to a single
/// displayable message.
#[derive(Debug, thiserror::Error)]
pub enum AuthClientError {
    /// The service rejected the operation and said why.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered garbage.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthClientError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
