//! Order Service

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;

use crate::application::cache::{CrmCaches, orders_key, orders_prefix};
use crate::domain::entity::order::{Order, OrderFields};
use crate::domain::repository::{ClientRepository, OrderRepository};
use crate::domain::value_object::ids::{ClientId, OrderId};
use crate::error::{CrmError, CrmResult};

pub struct OrderService<R>
where
    R: ClientRepository + OrderRepository,
{
    repo: Arc<R>,
    caches: CrmCaches,
}

impl<R> OrderService<R>
where
    R: ClientRepository + OrderRepository,
{
    pub fn new(repo: Arc<R>, caches: CrmCaches) -> Self {
        Self { repo, caches }
    }

    /// Missing or foreign parent client reads as `ClientNotFound`
    async fn ensure_client(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<()> {
        match self.repo.find_client(owner, client_id).await? {
            Some(_) => Ok(()),
            None => Err(CrmError::ClientNotFound),
        }
    }

    pub async fn create(&self, owner: &UserId, fields: OrderFields) -> CrmResult<Order> {
        let fields = fields.validate()?;
        self.ensure_client(owner, &fields.client_id).await?;

        let order = Order::new(*owner, fields);
        self.repo.create_order(&order).await?;

        self.caches.orders.invalidate_prefix(&orders_prefix(owner));
        tracing::info!(
            user_id = %owner,
            client_id = %order.client_id,
            order_id = %order.order_id,
            "Order created"
        );

        Ok(order)
    }

    pub async fn get(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Order> {
        self.repo
            .find_order(owner, order_id)
            .await?
            .ok_or(CrmError::OrderNotFound)
    }

    /// Orders of one client; an unknown or foreign client simply has none
    pub async fn list(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Vec<Order>> {
        let key = orders_key(owner, client_id);
        if let Some(orders) = self.caches.orders.get(&key) {
            return Ok(orders);
        }

        // A mutation committing during the read bumps the generation
        let generation = self.caches.orders.generation();
        let orders = self.repo.list_orders(owner, client_id).await?;
        self.caches
            .orders
            .set_if_fresh(&key, orders.clone(), generation);
        Ok(orders)
    }

    pub async fn update(
        &self,
        owner: &UserId,
        order_id: &OrderId,
        fields: OrderFields,
    ) -> CrmResult<Order> {
        let fields = fields.validate()?;
        let mut order = self.get(owner, order_id).await?;
        self.ensure_client(owner, &fields.client_id).await?;
        order.apply(fields);

        if !self.repo.update_order(&order).await? {
            return Err(CrmError::OrderNotFound);
        }

        self.caches.orders.invalidate_prefix(&orders_prefix(owner));
        tracing::info!(user_id = %owner, order_id = %order_id, "Order updated");

        Ok(order)
    }

    /// Deletes the order together with its payments
    pub async fn delete(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<()> {
        if !self.repo.delete_order_cascade(owner, order_id).await? {
            return Err(CrmError::OrderNotFound);
        }

        self.caches.orders.invalidate_prefix(&orders_prefix(owner));
        tracing::info!(user_id = %owner, order_id = %order_id, "Order deleted");

        Ok(())
    }
}
