//! Repository Traits
//!
//! Every lookup and mutation takes the owning user id and filters by it.
//! Method names are distinct across the three traits so one adapter type can
//! implement all of them without call-site ambiguity.

use auth::domain::value_object::user_id::UserId;

use crate::domain::entity::{client::Client, order::Order, payment::Payment};
use crate::domain::value_object::ids::{ClientId, OrderId, PaymentId};
use crate::error::CrmResult;

/// Client repository trait
#[trait_variant::make(ClientRepository: Send)]
pub trait LocalClientRepository {
    async fn create_client(&self, client: &Client) -> CrmResult<()>;

    async fn find_client(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Option<Client>>;

    async fn list_clients(&self, owner: &UserId) -> CrmResult<Vec<Client>>;

    /// Overwrite mutable fields; `false` if no such client for `client.user_id`
    async fn update_client(&self, client: &Client) -> CrmResult<bool>;

    /// Delete the client, its orders and their payments atomically.
    /// `false` (and nothing deleted) if no such client for `owner`.
    async fn delete_client_cascade(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<bool>;
}

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    async fn create_order(&self, order: &Order) -> CrmResult<()>;

    async fn find_order(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Option<Order>>;

    async fn list_orders(&self, owner: &UserId, client_id: &ClientId) -> CrmResult<Vec<Order>>;

    /// Overwrite mutable fields; `false` if no such order for `order.user_id`
    async fn update_order(&self, order: &Order) -> CrmResult<bool>;

    /// Delete the order and its payments atomically.
    /// `false` (and nothing deleted) if no such order for `owner`.
    async fn delete_order_cascade(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<bool>;
}

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create_payment(&self, payment: &Payment) -> CrmResult<()>;

    async fn find_payment(
        &self,
        owner: &UserId,
        payment_id: &PaymentId,
    ) -> CrmResult<Option<Payment>>;

    async fn list_payments(&self, owner: &UserId, order_id: &OrderId) -> CrmResult<Vec<Payment>>;

    /// Overwrite mutable fields; `false` if no such payment for `payment.user_id`
    async fn update_payment(&self, payment: &Payment) -> CrmResult<bool>;

    async fn delete_payment(&self, owner: &UserId, payment_id: &PaymentId) -> CrmResult<bool>;
}

/// Everything the HTTP layer needs from one adapter
pub trait CrmRepository:
    ClientRepository + OrderRepository + PaymentRepository + Send + Sync + 'static
{
}

impl<T> CrmRepository for T where
    T: ClientRepository + OrderRepository + PaymentRepository + Send + Sync + 'static
{
}
