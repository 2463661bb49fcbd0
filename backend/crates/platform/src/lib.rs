//! Platform Crate - Technical Infrastructure
//!
//! Domain-free building blocks used by the auth and CRM crates:
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (JWT)
//! - Time-expiring result cache
//! - Cookie and Authorization header helpers

pub mod cache;
pub mod cookie;
pub mod password;
pub mod token;
