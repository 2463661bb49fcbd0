//! Order Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::ids::{ClientId, OrderId};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CrmError, CrmResult};

/// Mutable fields of an order, replaced wholesale on update
///
/// `client_id` is mutable too; the parent is re-checked for ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    pub client_id: ClientId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub is_paid: bool,
}

impl OrderFields {
    /// Title must be non-empty, price non-negative
    pub fn validate(self) -> CrmResult<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CrmError::Validation("Order title cannot be empty".into()));
        }

        if self.price < 0 {
            return Err(CrmError::Validation("Price cannot be negative".into()));
        }

        Ok(Self { title, ..self })
    }
}

/// Work ordered by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub client_id: ClientId,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_id: UserId, fields: OrderFields) -> Self {
        let now = super::now();
        Self {
            order_id: OrderId::new(),
            user_id,
            client_id: fields.client_id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            status: fields.status,
            notes: fields.notes,
            is_paid: fields.is_paid,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable fields
    pub fn apply(&mut self, fields: OrderFields) {
        self.client_id = fields.client_id;
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.status = fields.status;
        self.notes = fields.notes;
        self.is_paid = fields.is_paid;
        self.updated_at = super::now();
    }
}
