//! PostgreSQL Repository Implementations
//!
//! Multi-statement operations run in one transaction; an early return drops
//! the transaction, which rolls it back.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use kernel::error::conversions::is_foreign_key_violation;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{client::Client, order::Order, payment::Payment};
use crate::domain::repository::{ClientRepository, OrderRepository, PaymentRepository};
use crate::domain::value_object::ids::{ClientId, OrderId, PaymentId};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CrmError, CrmResult};

/// PostgreSQL-backed CRM repository
#[derive(Clone)]
pub struct PgCrmRepository {
    pool: PgPool,
}

impl PgCrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Client Repository Implementation
// ============================================================================

impl ClientRepository for PgCrmRepository {
    async fn create_client(&self, client: &Client) -> CrmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id,
                user_id,
                name,
                contact,
                notes,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(client.client_id.as_uuid())
        .bind(client.user_id.as_uuid())
        .bind(&client.name)
        .bind(&client.contact)
        .bind(&client.notes)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_client(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, user_id, name, contact, notes, created_at, updated_at
            FROM clients
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(client_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClientRow::into_client))
    }

    async fn list_clients(&self, owner: &UserId) -> CrmResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, user_id, name, contact, notes, created_at, updated_at
            FROM clients
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ClientRow::into_client).collect())
    }

    async fn update_client(&self, client: &Client) -> CrmResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE clients SET
                name = $3,
                contact = $4,
                notes = $5,
                updated_at = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(client.client_id.as_uuid())
        .bind(client.user_id.as_uuid())
        .bind(&client.name)
        .bind(&client.contact)
        .bind(&client.notes)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn delete_client_cascade(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes against concurrent order inserts for this client
        let found = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM clients WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(client_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if found.is_none() {
            return Ok(false);
        }

        let payments = sqlx::query(
            "DELETE FROM payments WHERE order_id IN (SELECT id FROM orders WHERE client_id = $1)",
        )
        .bind(client_id.as_uuid())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let orders = sqlx::query("DELETE FROM orders WHERE client_id = $1")
            .bind(client_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM clients WHERE id = $1 AND user_id = $2")
            .bind(client_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            client_id = %client_id,
            orders_deleted = orders,
            payments_deleted = payments,
            "Client cascade committed"
        );

        Ok(true)
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgCrmRepository {
    async fn create_order(&self, order: &Order) -> CrmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id,
                user_id,
                client_id,
                title,
                description,
                price,
                status,
                notes,
                is_paid,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.client_id.as_uuid())
        .bind(&order.title)
        .bind(&order.description)
        .bind(order.price)
        .bind(order.status.code())
        .bind(&order.notes)
        .bind(order.is_paid)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Client vanished between the ownership check and the insert
            if is_foreign_key_violation(&e) {
                CrmError::ClientNotFound
            } else {
                CrmError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_order(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, client_id, title, description, price, status,
                   notes, is_paid, created_at, updated_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    async fn list_orders(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, client_id, title, description, price, status,
                   notes, is_paid, created_at, updated_at
            FROM orders
            WHERE user_id = $1 AND client_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(owner.as_uuid())
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    async fn update_order(&self, order: &Order) -> CrmResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE orders SET
                client_id = $3,
                title = $4,
                description = $5,
                price = $6,
                status = $7,
                notes = $8,
                is_paid = $9,
                updated_at = $10
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.client_id.as_uuid())
        .bind(&order.title)
        .bind(&order.description)
        .bind(order.price)
        .bind(order.status.code())
        .bind(&order.notes)
        .bind(order.is_paid)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                CrmError::ClientNotFound
            } else {
                CrmError::Database(e)
            }
        })?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn delete_order_cascade(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<bool> {
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM orders WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(order_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if found.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM payments WHERE order_id = $1")
            .bind(order_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM orders WHERE id = $1 AND user_id = $2")
            .bind(order_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgCrmRepository {
    async fn create_payment(&self, payment: &Payment) -> CrmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id,
                user_id,
                order_id,
                amount,
                is_paid,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.order_id.as_uuid())
        .bind(payment.amount)
        .bind(payment.is_paid)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                CrmError::OrderNotFound
            } else {
                CrmError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_payment(
        &self,
        owner: &UserId,
        payment_id: &PaymentId,
    ) -> CrmResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, user_id, order_id, amount, is_paid, created_at, updated_at
            FROM payments
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(payment_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PaymentRow::into_payment))
    }

    async fn list_payments(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, user_id, order_id, amount, is_paid, created_at, updated_at
            FROM payments
            WHERE user_id = $1 AND order_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(owner.as_uuid())
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentRow::into_payment).collect())
    }

    async fn update_payment(&self, payment: &Payment) -> CrmResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE payments SET
                order_id = $3,
                amount = $4,
                is_paid = $5,
                updated_at = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.user_id.as_uuid())
        .bind(payment.order_id.as_uuid())
        .bind(payment.amount)
        .bind(payment.is_paid)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                CrmError::OrderNotFound
            } else {
                CrmError::Database(e)
            }
        })?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn delete_payment(&self, owner: &UserId, payment_id: &PaymentId) -> CrmResult<bool> {
        let deleted = sqlx::query("DELETE FROM payments WHERE id = $1 AND user_id = $2")
            .bind(payment_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    contact: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Client {
        Client {
            client_id: ClientId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            contact: self.contact,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    client_id: Uuid,
    title: String,
    description: String,
    price: i64,
    status: String,
    notes: Option<String>,
    is_paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> CrmResult<Order> {
        let status = OrderStatus::from_code(&self.status)
            .ok_or_else(|| CrmError::Internal(format!("Invalid order status: {}", self.status)))?;

        Ok(Order {
            order_id: OrderId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            client_id: ClientId::from_uuid(self.client_id),
            title: self.title,
            description: self.description,
            price: self.price,
            status,
            notes: self.notes,
            is_paid: self.is_paid,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: Uuid,
    order_id: Uuid,
    amount: i64,
    is_paid: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> Payment {
        Payment {
            payment_id: PaymentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            order_id: OrderId::from_uuid(self.order_id),
            amount: self.amount,
            is_paid: self.is_paid,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
