//! Application Layer
//!
//! Ownership-scoped services over the repository traits. Validation runs
//! before any store access; list lookups go through the result cache and
//! every mutation invalidates the affected key prefix.

pub mod cache;
pub mod clients;
pub mod orders;
pub mod payments;

// Re-exports
pub use cache::CrmCaches;
pub use clients::ClientService;
pub use orders::OrderService;
pub use payments::PaymentService;
