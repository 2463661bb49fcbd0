//! CRM Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, PgUserRepository, require_auth};

use crate::domain::repository::CrmRepository;
use crate::infra::postgres::PgCrmRepository;
use crate::presentation::handlers::{self, CrmAppState};

/// Create the CRM router with PostgreSQL repositories
pub fn crm_router(
    state: CrmAppState<PgCrmRepository>,
    auth: AuthAppState<PgUserRepository>,
) -> Router {
    crm_router_generic(state, auth)
}

/// Create a generic CRM router; every route requires a valid access token
pub fn crm_router_generic<R, U>(state: CrmAppState<R>, auth: AuthAppState<U>) -> Router
where
    R: CrmRepository,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        // Clients
        .route("/clients/add", post(handlers::add_client::<R>))
        .route("/clients/get/{id}", get(handlers::get_client::<R>))
        .route("/clients/all", get(handlers::list_clients::<R>))
        .route("/clients/update/{id}", put(handlers::update_client::<R>))
        .route("/clients/delete/{id}", delete(handlers::delete_client::<R>))
        // Orders
        .route("/orders/add", post(handlers::add_order::<R>))
        .route("/orders/get/{id}", get(handlers::get_order::<R>))
        .route("/orders/all/{client_id}", get(handlers::list_orders::<R>))
        .route("/orders/update/{id}", put(handlers::update_order::<R>))
        .route("/orders/delete/{id}", delete(handlers::delete_order::<R>))
        // Payments
        .route("/payments/add", post(handlers::add_payment::<R>))
        .route("/payments/get/{id}", get(handlers::get_payment::<R>))
        .route("/payments/all/{order_id}", get(handlers::list_payments::<R>))
        .route("/payments/update/{id}", put(handlers::update_payment::<R>))
        .route("/payments/delete/{id}", delete(handlers::delete_payment::<R>))
        .route_layer(middleware::from_fn_with_state(auth, require_auth::<U>))
        .with_state(state)
}
