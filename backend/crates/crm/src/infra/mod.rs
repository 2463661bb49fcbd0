//! Infrastructure Layer
//!
//! Database implementations and the in-memory adapter used by tests.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCrmRepository;
pub use postgres::PgCrmRepository;
