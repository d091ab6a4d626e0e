use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::foyer::{handlers::LOGIN_PATH, views};

/// Fatal failures: none of these leak internal detail to the client, all of
/// them end up as a logged 500 page with a back link.
#[derive(Debug, Error)]
pub enum Error {
    #[error("session store failure: {0}")]
    Session(String),
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hash failure: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("{self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            views::internal_error_page(LOGIN_PATH),
        )
            .into_response()
    }
}

/// User-facing messages rendered inside the form error list. These are HTML
/// fragments: dynamic parts are escaped, markup in the constants is intended.
pub mod messages {
    use crate::foyer::views::escape;

    pub const EMPTY_PASSWORD: &str = "The password cannot be empty.";
    pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

    pub fn incorrect_password(max_attempts: i32) -> String {
        format!(
            "Wrong password. Please try again or click on the 'Forgot your password?' link. Remember that you only have {max_attempts} attempts."
        )
    }

    pub fn no_user_found(email: &str) -> String {
        format!(
            "No user has been found registered with the email '{}'",
            escape(email)
        )
    }

    pub fn invalid_email(email: &str) -> String {
        format!("The email '{}' is not a valid email.", escape(email))
    }

    pub fn invalid_username(username: &str) -> String {
        format!(
            "The value '{}' is not valid data for the 'username' field.",
            escape(username)
        )
    }

    pub fn short_password(min_chars: usize, current_chars: usize) -> String {
        format!(
            "Password must contain {min_chars} letters or more (current letters: {current_chars})."
        )
    }

    pub fn duplicate_email(email: &str) -> String {
        format!(
            "The email '{}' is already registered. Please enter a different email address.",
            escape(email)
        )
    }

    pub fn account_blocked(recover_path: &str) -> String {
        format!(
            "Your account has been locked due to an excessive number of failed password attempts. To unlock your account, please click <a href='{recover_path}'>here</a> to recover your account. We are sorry for any inconvenience this may cause and we are here to help."
        )
    }

    pub fn invalid_recovery_method(value: &str) -> String {
        format!(
            "The value '{}' is not a valid email address or phone number.",
            escape(value)
        )
    }

    pub fn no_account_for_identifier(value: &str) -> String {
        format!("No account matches '{}'.", escape(value))
    }

    pub fn recovery_by_email(email: &str) -> String {
        format!(
            "A recovery link will be sent to the email '{}'.",
            escape(email)
        )
    }

    pub fn recovery_by_phone(phone: &str) -> String {
        format!(
            "A recovery code will be sent to the phone number '{}'.",
            escape(phone)
        )
    }
}
