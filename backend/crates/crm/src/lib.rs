//! CRM Backend Module
//!
//! Clients, their orders, and the payments recorded against those orders.
//! Every row belongs to exactly one user, and every read or write is scoped
//! to the authenticated caller: another user's id behaves like a missing id.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, order status, repository traits
//! - `application/` - Client, order and payment services (validation, cache, cascade)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Cascade rules
//! - Deleting a client deletes its orders and their payments in one transaction
//! - Deleting an order deletes its payments in one transaction

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{ClientService, CrmCaches, OrderService, PaymentService};
pub use error::{CrmError, CrmResult};
pub use infra::memory::InMemoryCrmRepository;
pub use infra::postgres::PgCrmRepository;
pub use presentation::handlers::CrmAppState;
pub use presentation::router::{crm_router, crm_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
