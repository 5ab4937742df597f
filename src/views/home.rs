use std::sync::Arc;

use crate::client::AuthClient;

use super::Navigation;

/// What the home page shows: a loading indicator until the session is
/// known, then the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeState {
    Loading,
    SignedIn { name: String },
}

pub struct HomeView {
    client: Arc<dyn AuthClient>,
    error: Option<String>,
}

impl HomeView {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self {
            client,
            error: None,
        }
    }

    pub fn state(&self) -> HomeState {
        match self.client.session().get() {
            Some(session) => HomeState::SignedIn {
                name: session.user.name,
            },
            None => HomeState::Loading,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign out the current session and navigate to the login page. Does
    /// nothing while the session is still loading.
    pub async fn sign_out(&mut self) -> Option<Navigation> {
        if self.client.session().get().is_none() {
            return None;
        }

        match self.client.sign_out().await {
            Ok(()) => Some(Navigation::SignIn),
            Err(err) => {
                self.error = Some(err.message());
                None
            }
        }
    }
}
