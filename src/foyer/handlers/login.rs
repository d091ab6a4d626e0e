use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, instrument};

use crate::foyer::{
    error::{messages, Error},
    forms::{FormErrors, LoginForm},
    handlers::{HOME_PATH, RECOVER_PATH},
    lockout::{self, LockoutOutcome, MAX_LOGIN_ATTEMPTS},
    password, session, views, AppState,
};

pub async fn login_form() -> impl IntoResponse {
    views::login_page(&FormErrors::new())
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, Error> {
    let mut errors = form.validate();
    if errors.has_errors() {
        return Ok(views::login_page(&errors).into_response());
    }

    let Some(user) = state.store.find_by_email(&form.email).await? else {
        debug!("no account for email");
        errors.push(messages::no_user_found(&form.email));
        return Ok(views::login_page(&errors).into_response());
    };

    // A locked account never gets a password comparison.
    if user.is_locked {
        errors.push(messages::account_blocked(RECOVER_PATH));
        return Ok(views::login_page(&errors).into_response());
    }

    if password::verify_password(&form.password, &user.password_hash)? {
        let cookie = session::start_session(&state.sessions, user.user_id)?;
        lockout::record_successful_login(state.store.as_ref(), user.user_id).await?;

        debug!("login successful");
        return Ok(([(SET_COOKIE, cookie)], Redirect::to(HOME_PATH)).into_response());
    }

    match lockout::record_failed_attempt(state.store.as_ref(), user.user_id).await? {
        LockoutOutcome::Locked => errors.push(messages::account_blocked(RECOVER_PATH)),
        LockoutOutcome::WrongPassword => {
            errors.push(messages::incorrect_password(MAX_LOGIN_ATTEMPTS));
        }
    }

    Ok(views::login_page(&errors).into_response())
}
