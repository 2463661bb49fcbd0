//! HTTP Handlers
//!
//! Thin orchestration: caller identity from `CurrentUser`, work done by the
//! ownership-scoped services, errors mapped to status codes by `CrmError`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use auth::CurrentUser;

use crate::application::{ClientService, CrmCaches, OrderService, PaymentService};
use crate::domain::repository::CrmRepository;
use crate::domain::value_object::ids::{ClientId, OrderId, PaymentId};
use crate::error::CrmResult;
use crate::presentation::dto::{
    ClientRequest, ClientResponse, OrderRequest, OrderResponse, PaymentRequest, PaymentResponse,
};

/// Shared state for CRM handlers
pub struct CrmAppState<R>
where
    R: CrmRepository,
{
    pub repo: Arc<R>,
    pub caches: CrmCaches,
}

impl<R> CrmAppState<R>
where
    R: CrmRepository,
{
    pub fn new(repo: R, caches: CrmCaches) -> Self {
        Self {
            repo: Arc::new(repo),
            caches,
        }
    }

    fn clients(&self) -> ClientService<R> {
        ClientService::new(self.repo.clone(), self.caches.clone())
    }

    fn orders(&self) -> OrderService<R> {
        OrderService::new(self.repo.clone(), self.caches.clone())
    }

    fn payments(&self) -> PaymentService<R> {
        PaymentService::new(self.repo.clone())
    }
}

impl<R> Clone for CrmAppState<R>
where
    R: CrmRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            caches: self.caches.clone(),
        }
    }
}

// ============================================================================
// Clients
// ============================================================================

/// POST /clients/add
pub async fn add_client<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ClientRequest>,
) -> CrmResult<Json<ClientResponse>> {
    let client = state.clients().create(&user.user_id, req.into()).await?;
    Ok(Json(client.into()))
}

/// GET /clients/get/{id}
pub async fn get_client<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<Json<ClientResponse>> {
    let client = state
        .clients()
        .get(&user.user_id, &ClientId::from_uuid(id))
        .await?;
    Ok(Json(client.into()))
}

/// GET /clients/all
pub async fn list_clients<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
) -> CrmResult<Json<Vec<ClientResponse>>> {
    let clients = state.clients().list(&user.user_id).await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

/// PUT /clients/update/{id}
pub async fn update_client<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ClientRequest>,
) -> CrmResult<Json<ClientResponse>> {
    let client = state
        .clients()
        .update(&user.user_id, &ClientId::from_uuid(id), req.into())
        .await?;
    Ok(Json(client.into()))
}

/// DELETE /clients/delete/{id}
pub async fn delete_client<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<StatusCode> {
    state
        .clients()
        .delete(&user.user_id, &ClientId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Orders
// ============================================================================

/// POST /orders/add
pub async fn add_order<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<OrderRequest>,
) -> CrmResult<Json<OrderResponse>> {
    let order = state.orders().create(&user.user_id, req.into()).await?;
    Ok(Json(order.into()))
}

/// GET /orders/get/{id}
pub async fn get_order<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<Json<OrderResponse>> {
    let order = state
        .orders()
        .get(&user.user_id, &OrderId::from_uuid(id))
        .await?;
    Ok(Json(order.into()))
}

/// GET /orders/all/{client_id}
pub async fn list_orders<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(client_id): Path<Uuid>,
) -> CrmResult<Json<Vec<OrderResponse>>> {
    let orders = state
        .orders()
        .list(&user.user_id, &ClientId::from_uuid(client_id))
        .await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// PUT /orders/update/{id}
pub async fn update_order<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<OrderRequest>,
) -> CrmResult<Json<OrderResponse>> {
    let order = state
        .orders()
        .update(&user.user_id, &OrderId::from_uuid(id), req.into())
        .await?;
    Ok(Json(order.into()))
}

/// DELETE /orders/delete/{id}
pub async fn delete_order<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<StatusCode> {
    state
        .orders()
        .delete(&user.user_id, &OrderId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Payments
// ============================================================================

/// POST /payments/add
pub async fn add_payment<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PaymentRequest>,
) -> CrmResult<Json<PaymentResponse>> {
    let payment = state.payments().create(&user.user_id, req.into()).await?;
    Ok(Json(payment.into()))
}

/// GET /payments/get/{id}
pub async fn get_payment<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<Json<PaymentResponse>> {
    let payment = state
        .payments()
        .get(&user.user_id, &PaymentId::from_uuid(id))
        .await?;
    Ok(Json(payment.into()))
}

/// GET /payments/all/{order_id}
pub async fn list_payments<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(order_id): Path<Uuid>,
) -> CrmResult<Json<Vec<PaymentResponse>>> {
    let payments = state
        .payments()
        .list(&user.user_id, &OrderId::from_uuid(order_id))
        .await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

/// PUT /payments/update/{id}
pub async fn update_payment<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PaymentRequest>,
) -> CrmResult<Json<PaymentResponse>> {
    let payment = state
        .payments()
        .update(&user.user_id, &PaymentId::from_uuid(id), req.into())
        .await?;
    Ok(Json(payment.into()))
}

/// DELETE /payments/delete/{id}
pub async fn delete_payment<R: CrmRepository>(
    State(state): State<CrmAppState<R>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> CrmResult<StatusCode> {
    state
        .payments()
        .delete(&user.user_id, &PaymentId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
