//! `infinit-auth` — tenant isolation for the Infinit restaurant module.
//!
//! Resolves the tenant ("company") bound to the current caller, memoizes it
//! for the request, and enforces it on documents, list filters and bulk
//! query conditions. Decoupled from HTTP, storage and the host ORM: the host
//! supplies its services through the traits in [`directory`].

pub mod condition;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod filter;
pub mod guard;
pub mod hooks;
pub mod policy;
pub mod principal;
pub mod roles;

#[cfg(test)]
mod testing;

pub use condition::{PlaceholderStyle, TenantCondition};
pub use config::TenancyConfig;
pub use context::RequestContext;
pub use directory::{
    DefaultsStore, InMemoryDirectory, ProfileStore, RoleDirectory, SchemaMetadata,
};
pub use error::TenancyError;
pub use filter::Filters;
pub use guard::{Document, GuardedEntity, LifecycleEvent, RecordTenant};
pub use hooks::HostHooks;
pub use policy::{TenantPolicy, TenantSource};
pub use principal::CallerKind;
pub use roles::Role;
