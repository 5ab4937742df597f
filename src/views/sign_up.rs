use std::sync::Arc;

use crate::client::AuthClient;
use crate::forms::{validate_sign_up, FieldError, SignUpForm};

use super::Navigation;

/// Registration flow: local validation, then a single remote call guarded
/// by the pending flag, ending in navigation home or an inline alert.
pub struct SignUpView {
    client: Arc<dyn AuthClient>,
    pending: bool,
    error: Option<String>,
    field_errors: Vec<FieldError>,
}

impl SignUpView {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self {
            client,
            pending: false,
            error: None,
            field_errors: Vec::new(),
        }
    }

    /// True while a submission is in flight; further submits are ignored.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Alert text from the last failed remote call, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Field messages from the last rejected submission.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Submit the form. Returns the navigation target on success; `None`
    /// leaves the caller on the page with `field_errors` or `error` set.
    /// A failed attempt is not retried.
    pub async fn submit(&mut self, form: &SignUpForm) -> Option<Navigation> {
        if self.pending {
            return None;
        }

        self.error = None;
        self.field_errors = validate_sign_up(form);
        if !self.field_errors.is_empty() {
            return None;
        }

        self.pending = true;
        let result = self
            .client
            .sign_up(&form.name, &form.email, &form.password)
            .await;
        self.pending = false;

        match result {
            Ok(_) => Some(Navigation::Home),
            Err(err) => {
                self.error = Some(err.message());
                None
            }
        }
    }
}
