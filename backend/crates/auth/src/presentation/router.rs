//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(state: AuthAppState<PgUserRepository>) -> Router {
    auth_router_generic(state)
}

/// Create a generic Auth router for any repository implementation
///
/// Public: `POST /user/register`, `POST /auth/login`.
/// Protected: `GET /user/me`, `GET /auth/me`.
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/user/me", get(handlers::me))
        .route("/auth/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/user/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
