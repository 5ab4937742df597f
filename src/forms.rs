//! Field validation for the sign-up and sign-in forms. Validation runs
//! before any remote call and returns a structured list of field errors so
//! the rendering layer stays free of rules.

use std::sync::OnceLock;

use regex::Regex;

use crate::auth::password::MIN_PASSWORD_LEN;

/// A field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Checks applied to the registration form. An empty return means the form
/// may be submitted.
pub fn validate_sign_up(form: &SignUpForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if form.email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&form.email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address.",
        ));
    }

    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if form.password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 7 characters.",
        ));
    }

    if form.confirm_password.is_empty() {
        errors.push(FieldError::new(
            "confirm_password",
            "Confirmed Password is required",
        ));
    } else if form.confirm_password != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords don't match"));
    }

    errors
}

/// Checks applied to the login form: same discipline as sign-up, minus the
/// length rule.
pub fn validate_sign_in(form: &SignInForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&form.email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address.",
        ));
    }

    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> SignUpForm {
        SignUpForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hyperion".to_string(),
            confirm_password: "hyperion".to_string(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        assert!(validate_sign_up(&complete_form()).is_empty());
    }

    #[test]
    fn requires_every_field() {
        let errors = validate_sign_up(&SignUpForm::default());
        let messages: Vec<&str> = errors.iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Email is required",
                "Password is required",
                "Confirmed Password is required",
            ]
        );
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a b@example.com"] {
            let form = SignUpForm {
                email: bad.to_string(),
                ..complete_form()
            };
            let errors = validate_sign_up(&form);
            assert_eq!(errors.len(), 1, "expected one error for {bad:?}");
            assert_eq!(errors[0].field, "email");
            assert_eq!(errors[0].message, "Please enter a valid email address.");
        }
    }

    #[test]
    fn rejects_short_password() {
        let form = SignUpForm {
            password: "six666".to_string(),
            confirm_password: "six666".to_string(),
            ..complete_form()
        };
        let errors = validate_sign_up(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].message, "Password must be at least 7 characters.");
    }

    #[test]
    fn rejects_password_mismatch_on_confirm_field() {
        let form = SignUpForm {
            confirm_password: "different".to_string(),
            ..complete_form()
        };
        let errors = validate_sign_up(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
        assert_eq!(errors[0].message, "Passwords don't match");
    }

    #[test]
    fn sign_in_applies_same_email_rule() {
        let form = SignInForm {
            email: "not-an-email".to_string(),
            password: "whatever".to_string(),
            remember_me: false,
        };
        let errors = validate_sign_in(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Please enter a valid email address.");
    }

    #[test]
    fn sign_in_has_no_length_rule() {
        let form = SignInForm {
            email: "ada@example.com".to_string(),
            password: "abc".to_string(),
            remember_me: false,
        };
        assert!(validate_sign_in(&form).is_empty());
    }
}
