//! Access-control middleware. Each guard consults the session store before
//! the handler runs and either passes the request through or short-circuits
//! with a redirect; a session-store failure is fatal to the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::foyer::{
    handlers::{HOME_PATH, LOGIN_PATH},
    session, AppState,
};

/// Let the request through only with an authenticated session; otherwise
/// redirect to the login page.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match session::current_user(&state.sessions, request.headers()) {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Let the request through only without an authenticated session; signed-in
/// users are sent back home.
pub async fn require_no_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match session::current_user(&state.sessions, request.headers()) {
        Ok(Some(_)) => Redirect::to(HOME_PATH).into_response(),
        Ok(None) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::COOKIE, header::LOCATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::foyer::{
        router::{Guard, RouteTable},
        session::{start_session, SessionStore},
        store::mem::MemStore,
        AppState,
    };

    async fn protected() -> &'static str {
        "protected"
    }

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(MemStore::new()),
            sessions: SessionStore::new(),
        }
    }

    fn request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn require_session_redirects_anonymous_to_login() {
        let mut table = RouteTable::new();
        table
            .get("/private", protected, Some(Guard::RequireSession))
            .unwrap();
        let app = table.build(test_state());

        let response = app.oneshot(request("/private", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    #[tokio::test]
    async fn require_session_passes_authenticated_request() {
        let state = test_state();
        let cookie = start_session(&state.sessions, 7).unwrap();

        let mut table = RouteTable::new();
        table
            .get("/private", protected, Some(Guard::RequireSession))
            .unwrap();
        let app = table.build(state);

        let response = app
            .oneshot(request("/private", Some(cookie.to_str().unwrap())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn require_no_session_redirects_authenticated_home() {
        let state = test_state();
        let cookie = start_session(&state.sessions, 7).unwrap();

        let mut table = RouteTable::new();
        table
            .get("/public", protected, Some(Guard::RequireNoSession))
            .unwrap();
        let app = table.build(state);

        let response = app
            .oneshot(request("/public", Some(cookie.to_str().unwrap())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn require_no_session_passes_anonymous_request() {
        let mut table = RouteTable::new();
        table
            .get("/public", protected, Some(Guard::RequireNoSession))
            .unwrap();
        let app = table.build(test_state());

        let response = app.oneshot(request("/public", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
