//! In-memory CRM repository
//!
//! Same contract as the PostgreSQL adapter. All three tables sit behind one
//! mutex, so each cascade is atomic with respect to every other operation.

use std::collections::HashMap;
use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::entity::{client::Client, order::Order, payment::Payment};
use crate::domain::repository::{ClientRepository, OrderRepository, PaymentRepository};
use crate::domain::value_object::ids::{ClientId, OrderId, PaymentId};
use crate::error::{CrmError, CrmResult};

#[derive(Default)]
struct Tables {
    clients: HashMap<ClientId, Client>,
    orders: HashMap<OrderId, Order>,
    payments: HashMap<PaymentId, Payment>,
}

#[derive(Clone, Default)]
pub struct InMemoryCrmRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCrmRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts `(clients, orders, payments)` across all users
    pub fn counts(&self) -> (usize, usize, usize) {
        let tables = self.tables.lock();
        (
            tables.clients.len(),
            tables.orders.len(),
            tables.payments.len(),
        )
    }
}

/// Stable listing order, matching `ORDER BY created_at, id`
fn sorted<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) -> Vec<T> {
    rows.sort_by_key(|row| key(row));
    rows
}

impl ClientRepository for InMemoryCrmRepository {
    async fn create_client(&self, client: &Client) -> CrmResult<()> {
        self.tables
            .lock()
            .clients
            .insert(client.client_id, client.clone());
        Ok(())
    }

    async fn find_client(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Option<Client>> {
        Ok(self
            .tables
            .lock()
            .clients
            .get(client_id)
            .filter(|c| &c.user_id == owner)
            .cloned())
    }

    async fn list_clients(&self, owner: &UserId) -> CrmResult<Vec<Client>> {
        let rows = self
            .tables
            .lock()
            .clients
            .values()
            .filter(|c| &c.user_id == owner)
            .cloned()
            .collect();
        Ok(sorted(rows, |c: &Client| (c.created_at, c.client_id.into_uuid())))
    }

    async fn update_client(&self, client: &Client) -> CrmResult<bool> {
        let mut tables = self.tables.lock();
        match tables.clients.get_mut(&client.client_id) {
            Some(existing) if existing.user_id == client.user_id => {
                *existing = client.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_client_cascade(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<bool> {
        let mut tables = self.tables.lock();
        let Tables {
            clients,
            orders,
            payments,
        } = &mut *tables;

        if !clients.get(client_id).is_some_and(|c| &c.user_id == owner) {
            return Ok(false);
        }

        let order_ids: Vec<OrderId> = orders
            .values()
            .filter(|o| &o.client_id == client_id)
            .map(|o| o.order_id)
            .collect();

        payments.retain(|_, p| !order_ids.contains(&p.order_id));
        orders.retain(|_, o| &o.client_id != client_id);
        clients.remove(client_id);

        Ok(true)
    }
}

impl OrderRepository for InMemoryCrmRepository {
    async fn create_order(&self, order: &Order) -> CrmResult<()> {
        let mut tables = self.tables.lock();
        if !tables.clients.contains_key(&order.client_id) {
            return Err(CrmError::ClientNotFound);
        }
        tables.orders.insert(order.order_id, order.clone());
        Ok(())
    }

    async fn find_order(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Option<Order>> {
        Ok(self
            .tables
            .lock()
            .orders
            .get(order_id)
            .filter(|o| &o.user_id == owner)
            .cloned())
    }

    async fn list_orders(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Vec<Order>> {
        let rows = self
            .tables
            .lock()
            .orders
            .values()
            .filter(|o| &o.user_id == owner && &o.client_id == client_id)
            .cloned()
            .collect();
        Ok(sorted(rows, |o: &Order| (o.created_at, o.order_id.into_uuid())))
    }

    async fn update_order(&self, order: &Order) -> CrmResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.clients.contains_key(&order.client_id) {
            return Err(CrmError::ClientNotFound);
        }
        match tables.orders.get_mut(&order.order_id) {
            Some(existing) if existing.user_id == order.user_id => {
                *existing = order.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_order_cascade(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<bool> {
        let mut tables = self.tables.lock();

        if !tables
            .orders
            .get(order_id)
            .is_some_and(|o| &o.user_id == owner)
        {
            return Ok(false);
        }

        tables.payments.retain(|_, p| &p.order_id != order_id);
        tables.orders.remove(order_id);

        Ok(true)
    }
}

impl PaymentRepository for InMemoryCrmRepository {
    async fn create_payment(&self, payment: &Payment) -> CrmResult<()> {
        let mut tables = self.tables.lock();
        if !tables.orders.contains_key(&payment.order_id) {
            return Err(CrmError::OrderNotFound);
        }
        tables.payments.insert(payment.payment_id, payment.clone());
        Ok(())
    }

    async fn find_payment(
        &self,
        owner: &UserId,
        payment_id: &PaymentId,
    ) -> CrmResult<Option<Payment>> {
        Ok(self
            .tables
            .lock()
            .payments
            .get(payment_id)
            .filter(|p| &p.user_id == owner)
            .cloned())
    }

    async fn list_payments(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Vec<Payment>> {
        let rows = self
            .tables
            .lock()
            .payments
            .values()
            .filter(|p| &p.user_id == owner && &p.order_id == order_id)
            .cloned()
            .collect();
        Ok(sorted(rows, |p: &Payment| (p.created_at, p.payment_id.into_uuid())))
    }

    async fn update_payment(&self, payment: &Payment) -> CrmResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.orders.contains_key(&payment.order_id) {
            return Err(CrmError::OrderNotFound);
        }
        match tables.payments.get_mut(&payment.payment_id) {
            Some(existing) if existing.user_id == payment.user_id => {
                *existing = payment.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_payment(&self, owner: &UserId, payment_id: &PaymentId) -> CrmResult<bool> {
        let mut tables = self.tables.lock();
        if !tables
            .payments
            .get(payment_id)
            .is_some_and(|p| &p.user_id == owner)
        {
            return Ok(false);
        }
        tables.payments.remove(payment_id);
        Ok(true)
    }
}
