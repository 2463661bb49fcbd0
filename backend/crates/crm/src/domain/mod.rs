//! Domain Layer
//!
//! Entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Client, Order, Payment};
pub use repository::{ClientRepository, CrmRepository, OrderRepository, PaymentRepository};
