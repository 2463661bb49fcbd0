//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - the response-facing error type and its classification
//! - typed UUID identifiers
//!
//! Only things whose meaning is identical across the auth and CRM domains
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
