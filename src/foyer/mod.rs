use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod error;
pub mod forms;
pub mod handlers;
pub mod lockout;
pub mod password;
pub mod router;
pub mod session;
pub mod store;
pub mod views;

use handlers::{HOME_PATH, LOGIN_PATH, RECOVER_PATH, SIGNUP_PATH};
use router::{Guard, RouteTable, RouterError};
use session::SessionStore;
use store::{PgStore, UserStore};

/// Shared per-process state handed to every handler and guard.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub sessions: SessionStore,
}

/// The full route table for the service.
///
/// # Errors
/// Returns an error if a (path, method) pair is registered twice.
pub fn routes() -> Result<RouteTable, RouterError> {
    let mut table = RouteTable::new();

    table.get(HOME_PATH, handlers::home, Some(Guard::RequireSession))?;

    table.get(
        LOGIN_PATH,
        handlers::login::login_form,
        Some(Guard::RequireNoSession),
    )?;
    table.post(LOGIN_PATH, handlers::login::login_submit, None)?;

    table.get(
        SIGNUP_PATH,
        handlers::signup::signup_form,
        Some(Guard::RequireNoSession),
    )?;
    table.post(SIGNUP_PATH, handlers::signup::signup_submit, None)?;

    table.get(
        RECOVER_PATH,
        handlers::recover::recovery_form,
        Some(Guard::RequireNoSession),
    )?;
    table.post(RECOVER_PATH, handlers::recover::recovery_submit, None)?;

    Ok(table)
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        sessions: SessionStore::new(),
    };

    let app = routes()?.build(state).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
