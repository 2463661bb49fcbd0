//! Value Object Module

pub mod ids;
pub mod order_status;

pub use ids::{ClientId, OrderId, PaymentId};
pub use order_status::OrderStatus;
