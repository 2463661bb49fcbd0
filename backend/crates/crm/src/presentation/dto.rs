//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{
    client::{Client, ClientFields},
    order::{Order, OrderFields},
    payment::{Payment, PaymentFields},
};
use crate::domain::value_object::ids::{ClientId, OrderId};
use crate::domain::value_object::order_status::OrderStatus;

// ============================================================================
// Clients
// ============================================================================

/// Create/update body for a client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRequest {
    pub name: String,
    pub contact: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ClientRequest> for ClientFields {
    fn from(req: ClientRequest) -> Self {
        Self {
            name: req.name,
            contact: req.contact,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub contact: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.client_id.into_uuid(),
            user_id: client.user_id.into_uuid(),
            name: client.name,
            contact: client.contact,
            notes: client.notes,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Create/update body for an order; omitted status means `new`
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
}

impl From<OrderRequest> for OrderFields {
    fn from(req: OrderRequest) -> Self {
        Self {
            client_id: ClientId::from_uuid(req.client_id),
            title: req.title,
            description: req.description,
            price: req.price,
            status: req.status,
            notes: req.notes,
            is_paid: req.is_paid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.order_id.into_uuid(),
            user_id: order.user_id.into_uuid(),
            client_id: order.client_id.into_uuid(),
            title: order.title,
            description: order.description,
            price: order.price,
            status: order.status,
            notes: order.notes,
            is_paid: order.is_paid,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// ============================================================================
// Payments
// ============================================================================

/// Create/update body for a payment
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub amount: i64,
    #[serde(default)]
    pub is_paid: bool,
}

impl From<PaymentRequest> for PaymentFields {
    fn from(req: PaymentRequest) -> Self {
        Self {
            order_id: OrderId::from_uuid(req.order_id),
            amount: req.amount,
            is_paid: req.is_paid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub amount: i64,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.payment_id.into_uuid(),
            user_id: payment.user_id.into_uuid(),
            order_id: payment.order_id.into_uuid(),
            amount: payment.amount,
            is_paid: payment.is_paid,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}
