use std::sync::Arc;

use crate::client::AuthClient;
use crate::forms::{validate_sign_in, FieldError, SignInForm};

use super::Navigation;

/// Login flow. Same shape as registration: validate, one guarded remote
/// call, navigate or surface the returned message.
pub struct SignInView {
    client: Arc<dyn AuthClient>,
    pending: bool,
    error: Option<String>,
    field_errors: Vec<FieldError>,
}

impl SignInView {
    pub fn new(client: Arc<dyn AuthClient>) -> Self {
        Self {
            client,
            pending: false,
            error: None,
            field_errors: Vec::new(),
        }
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub async fn submit(&mut self, form: &SignInForm) -> Option<Navigation> {
        if self.pending {
            return None;
        }

        self.error = None;
        self.field_errors = validate_sign_in(form);
        if !self.field_errors.is_empty() {
            return None;
        }

        self.pending = true;
        let result = self
            .client
            .sign_in(&form.email, &form.password, form.remember_me)
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
