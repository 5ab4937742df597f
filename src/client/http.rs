use async_trait::async_trait;
use serde::Deserialize;

use super::{AuthClient, AuthClientError, Session, SessionCell};

/// HTTP implementation of [`AuthClient`] against a running service.
#[derive(Clone)]
pub struct HttpAuthClient {
    base_url: String,
    http: reqwest::Client,
    cell: SessionCell,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            cell: SessionCell::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn rejection(resp: reqwest::Response) -> AuthClientError {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(body) => AuthClientError::Rejected(body.message),
            Err(_) => AuthClientError::Rejected(format!("request failed with status {status}")),
        }
    }

    async fn read_session(resp: reqwest::Response) -> Result<Session, AuthClientError> {
        if resp.status().is_success() {
            Ok(resp.json::<Session>().await?)
        } else {
            Err(Self::rejection(resp).await)
        }
    }

    /// Ask the service for the current session and update the cell. Returns
    /// `None` (clearing the cell) when the token is gone or stale.
    pub async fn load_session(&self) -> Result<Option<Session>, AuthClientError> {
        let Some(current) = self.cell.get() else {
            return Ok(None);
        };

        let resp = self
            .http
            .get(self.url("/api/auth/session"))
            .bearer_auth(&current.token)
            .send()
            .await?;

        if resp.status().is_success() {
            let session: Session = resp.json().await?;
            self.cell.set(session.clone());
            Ok(Some(session))
        } else {
            self.cell.clear();
            Ok(None)
        }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthClientError> {
        let resp = self
            .http
            .post(self.url("/api/auth/sign-up"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let session = Self::read_session(resp).await?;
        self.cell.set(session.clone());
        Ok(session)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Session, AuthClientError> {
        let resp = self
            .http
            .post(self.url("/api/auth/sign-in"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "remember_me": remember_me,
            }))
            .send()
            .await?;

        let session = Self::read_session(resp).await?;
        self.cell.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthClientError> {
        let Some(current) = self.cell.get() else {
            return Ok(());
        };

        let resp = self
            .http
            .post(self.url("/api/auth/sign-out"))
            .bearer_auth(&current.token)
            .send()
            .await?;

        if resp.status().is_success() {
            self.cell.clear();
            Ok(())
        } else {
            Err(Self::rejection(resp).await)
        }
    }

    fn session(&self) -> &SessionCell {
        &self.cell
    }
}
