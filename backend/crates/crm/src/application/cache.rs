//! Result caches for list lookups
//!
//! `clients:{user}` holds a user's client list, `orders:{user}:{client}` the
//! orders of one client. Invalidation works on these prefixes.

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;
use platform::cache::{CacheConfig, NoOpCache, ResultCache, TtlCache};

use crate::domain::entity::{client::Client, order::Order};
use crate::domain::value_object::ids::ClientId;

/// The two list caches shared by all CRM services
#[derive(Clone)]
pub struct CrmCaches {
    pub clients: Arc<dyn ResultCache<Vec<Client>>>,
    pub orders: Arc<dyn ResultCache<Vec<Order>>>,
}

impl CrmCaches {
    /// In-process TTL caches, one per list type
    pub fn new(config: CacheConfig) -> Self {
        Self {
            clients: Arc::new(TtlCache::new(config)),
            orders: Arc::new(TtlCache::new(config)),
        }
    }

    /// Caches that never hit; every lookup goes to the repository
    pub fn disabled() -> Self {
        Self {
            clients: Arc::new(NoOpCache),
            orders: Arc::new(NoOpCache),
        }
    }

    /// Forget every cached list that mentions `owner`
    pub fn invalidate_owner(&self, owner: &UserId) {
        self.clients.invalidate_prefix(&clients_key(owner));
        self.orders.invalidate_prefix(&orders_prefix(owner));
    }
}

impl Default for CrmCaches {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

pub fn clients_key(owner: &UserId) -> String {
    format!("clients:{owner}")
}

pub fn orders_key(owner: &UserId, client_id: &ClientId) -> String {
    format!("orders:{owner}:{client_id}")
}

/// Prefix covering every cached order list of `owner`
pub fn orders_prefix(owner: &UserId) -> String {
    format!("orders:{owner}")
}
