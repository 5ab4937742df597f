use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Authenticated user as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub avatar_url: Option<String>,
}

/// An active login: the bearer token plus the user it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: chrono::NaiveDateTime,
    pub user: SessionUser,
}

/// Process-wide observable holding the current session. Writers replace the
/// value; readers sample it with [`SessionCell::get`] or subscribe for
/// change notifications.
#[derive(Clone)]
pub struct SessionCell {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl SessionCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn set(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Subscribe for updates. The receiver observes every replacement,
    /// including [`SessionCell::clear`].
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionCell {
    fn default() -> Self {
        Self::new()
    }
}
