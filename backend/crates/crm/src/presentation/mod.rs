//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router. Every route sits behind `auth::require_auth`.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CrmAppState;
pub use router::{crm_router, crm_router_generic};
