//! Route table and dispatcher. Routes are registered per (path, method) with
//! an optional access-control guard, then assembled into the serving router.

use std::collections::HashMap;

use axum::{
    handler::Handler,
    http::Method,
    middleware,
    routing::{self, MethodRouter},
    Router,
};
use thiserror::Error;

use crate::foyer::{handlers::guards, AppState};

/// Access-control wrapper applied in front of a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session must carry a user id, otherwise redirect to the login page.
    RequireSession,
    /// Session must NOT carry a user id, otherwise redirect home.
    RequireNoSession,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("route already registered for {method} {path}")]
    Duplicate { path: String, method: Method },
}

/// One registered route. Immutable once registered; owned by the table.
pub struct Route {
    method: Method,
    handler: MethodRouter<AppState>,
    guard: Option<Guard>,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn guard(&self) -> Option<Guard> {
        self.guard
    }
}

/// Mapping from path to the routes registered on it, one per method.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, Vec<Route>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for (path, method). Duplicate registrations are
    /// rejected rather than overwritten.
    ///
    /// # Errors
    /// Returns `RouterError::Duplicate` if (path, method) is already taken.
    pub fn register(
        &mut self,
        path: &str,
        method: Method,
        handler: MethodRouter<AppState>,
        guard: Option<Guard>,
    ) -> Result<(), RouterError> {
        let routes = self.routes.entry(path.to_string()).or_default();

        if routes.iter().any(|route| route.method == method) {
            return Err(RouterError::Duplicate {
                path: path.to_string(),
                method,
            });
        }

        routes.push(Route {
            method,
            handler,
            guard,
        });

        Ok(())
    }

    /// # Errors
    /// Returns `RouterError::Duplicate` if GET is already taken on the path.
    pub fn get<H, T>(
        &mut self,
        path: &str,
        handler: H,
        guard: Option<Guard>,
    ) -> Result<(), RouterError>
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(path, Method::GET, routing::get(handler), guard)
    }

    /// # Errors
    /// Returns `RouterError::Duplicate` if POST is already taken on the path.
    pub fn post<H, T>(
        &mut self,
        path: &str,
        handler: H,
        guard: Option<Guard>,
    ) -> Result<(), RouterError>
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.register(path, Method::POST, routing::post(handler), guard)
    }

    /// Exact-match lookup. Absence is not an error at this layer; the built
    /// router answers 404/405 for it.
    #[must_use]
    pub fn lookup(&self, path: &str, method: &Method) -> Option<&Route> {
        self.routes
            .get(path)?
            .iter()
            .find(|route| &route.method == method)
    }

    /// Assemble the serving router: per path, merge the per-method handlers
    /// into one entry point, wrapping each guarded handler so the guard runs
    /// first and can short-circuit. Unregistered (path, method) pairs never
    /// reach a handler.
    #[must_use]
    pub fn build(self, state: AppState) -> Router {
        let mut app = Router::new();

        for (path, routes) in self.routes {
            let mut combined: Option<MethodRouter<AppState>> = None;

            for route in routes {
                // route_layer keeps the guard off the method-not-allowed
                // fallback: it only ever wraps the registered handler.
                let handler = match route.guard {
                    Some(Guard::RequireSession) => route.handler.route_layer(
                        middleware::from_fn_with_state(state.clone(), guards::require_session),
                    ),
                    Some(Guard::RequireNoSession) => route.handler.route_layer(
                        middleware::from_fn_with_state(state.clone(), guards::require_no_session),
                    ),
                    None => route.handler,
                };

                combined = Some(match combined {
                    Some(merged) => merged.merge(handler),
                    None => handler,
                });
            }

            if let Some(method_router) = combined {
                app = app.route(&path, method_router);
            }
        }

        app.with_state(state)
    }
}
