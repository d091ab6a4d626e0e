//! Form field types, validators and the per-request error accumulator.

use regex::Regex;
use serde::Deserialize;

use crate::foyer::error::messages;

pub const MIN_PASSWORD_CHARS: usize = 5;

/// Validation errors collected while handling one request. Built fresh per
/// handler invocation and handed to the view, never shared across requests.
#[derive(Clone, Debug, Default)]
pub struct FormErrors {
    errors: Vec<String>,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(String::as_str)
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^\d{10}$").map_or(false, |re| re.is_match(phone))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if !valid_email(&self.email) {
            errors.push(messages::invalid_email(&self.email));
        }

        if self.password.is_empty() {
            errors.push(messages::EMPTY_PASSWORD);
        }

        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl SignupForm {
    /// Field-level checks only; the duplicate-email check needs the store and
    /// stays in the handler.
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.username.is_empty() {
            errors.push(messages::invalid_username(&self.username));
        }

        if self.password.len() < MIN_PASSWORD_CHARS {
            errors.push(messages::short_password(
                MIN_PASSWORD_CHARS,
                self.password.len(),
            ));
        }

        if self.password != self.confirm_password {
            errors.push(messages::PASSWORDS_DO_NOT_MATCH);
        }

        if !valid_email(&self.email) {
            errors.push(messages::invalid_email(&self.email));
        }

        errors
    }
}

#[derive(Debug, Deserialize)]
pub struct RecoveryForm {
    #[serde(default)]
    pub recovery_method: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryMethod {
    Email,
    Phone,
}

#[must_use]
pub fn classify_recovery_method(value: &str) -> Option<RecoveryMethod> {
    if valid_email(value) {
        Some(RecoveryMethod::Email)
    } else if valid_phone(value) {
        Some(RecoveryMethod::Phone)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(valid_email("user@example.com"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("not an email"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_valid_phone() {
        assert!(valid_phone("0123456789"));
        assert!(!valid_phone("12345"));
        assert!(!valid_phone("01234567890"));
        assert!(!valid_phone("phone12345"));
    }

    #[test]
    fn test_classify_recovery_method() {
        assert_eq!(
            classify_recovery_method("user@example.com"),
            Some(RecoveryMethod::Email)
        );
        assert_eq!(
            classify_recovery_method("0123456789"),
            Some(RecoveryMethod::Phone)
        );
        assert_eq!(classify_recovery_method("junk"), None);
    }

    #[test]
    fn login_form_collects_all_errors() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: String::new(),
        };

        let errors = form.validate();
        assert!(errors.has_errors());
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn login_form_valid() {
        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
        };

        assert!(form.validate().is_empty());
    }

    #[test]
    fn signup_form_short_and_mismatched_password() {
        let form = SignupForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "abc".to_string(),
            confirm_password: "abcd".to_string(),
        };

        let errors = form.validate();
        let rendered: Vec<&str> = errors.iter().collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("5 letters or more"));
        assert_eq!(rendered[1], messages::PASSWORDS_DO_NOT_MATCH);
    }

    #[test]
    fn signup_form_valid() {
        let form = SignupForm {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        };

        assert!(form.validate().is_empty());
    }
}
