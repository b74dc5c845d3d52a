//! `infinit-core` — domain primitives shared by the Infinit restaurant crates.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{TenantId, UserId};
