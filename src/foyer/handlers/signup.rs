use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, instrument};

use crate::foyer::{
    error::{messages, Error},
    forms::{self, FormErrors, SignupForm},
    handlers::LOGIN_PATH,
    password, views, AppState,
};

pub async fn signup_form() -> impl IntoResponse {
    views::signup_page(&FormErrors::new())
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, Error> {
    let mut errors = form.validate();

    // Only consult the store once the email at least looks like one.
    if forms::valid_email(&form.email) && state.store.email_exists(&form.email).await? {
        errors.push(messages::duplicate_email(&form.email));
    }

    if errors.has_errors() {
        return Ok(views::signup_page(&errors).into_response());
    }

    let password_hash = password::hash_password(&form.password)?;
    state
        .store
        .insert_user(&form.username, &form.email, &password_hash)
        .await?;

    debug!("account created");
    Ok(Redirect::to(LOGIN_PATH).into_response())
}
