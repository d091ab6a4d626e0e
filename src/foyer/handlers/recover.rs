use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use tracing::{debug, instrument};

use crate::foyer::{
    error::{messages, Error},
    forms::{self, FormErrors, RecoveryForm, RecoveryMethod},
    views, AppState,
};

pub async fn recovery_form() -> impl IntoResponse {
    views::recovery_page(&FormErrors::new(), None)
}

#[instrument(skip_all)]
pub async fn recovery_submit(
    State(state): State<AppState>,
    Form(form): Form<RecoveryForm>,
) -> Result<Response, Error> {
    let mut errors = FormErrors::new();

    let Some(method) = forms::classify_recovery_method(&form.recovery_method) else {
        errors.push(messages::invalid_recovery_method(&form.recovery_method));
        return Ok(views::recovery_page(&errors, None).into_response());
    };

    match state.store.find_by_identifier(&form.recovery_method).await? {
        Some(account) => {
            debug!("recovery account resolved");
            let notice = match method {
                RecoveryMethod::Email => messages::recovery_by_email(&account.user.email),
                RecoveryMethod::Phone => {
                    messages::recovery_by_phone(account.phone.as_deref().unwrap_or_default())
                }
            };
            Ok(views::recovery_page(&errors, Some(&notice)).into_response())
        }
        None => {
            errors.push(messages::no_account_for_identifier(&form.recovery_method));
            Ok(views::recovery_page(&errors, None).into_response())
        }
    }
}
