use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::foyer::{error::Error, handlers::LOGIN_PATH, session, views, AppState};

// The route guard already requires a session; the re-check keeps the handler
// correct if it is ever registered without one.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, Error> {
    match session::current_user(&state.sessions, &headers)? {
        Some(user_id) => Ok(views::home_page(&user_id).into_response()),
        None => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}
