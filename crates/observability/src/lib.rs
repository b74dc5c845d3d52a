//! Tracing/logging setup shared by Infinit binaries and hosts.
//!
//! Nothing inside the workspace installs a subscriber; the host process does,
//! once, before it starts serving requests:
//!
//! ```no_run
//! use infinit_auth::{InMemoryDirectory, TenancyConfig, TenantPolicy};
//! use std::sync::Arc;
//!
//! infinit_observability::init();
//!
//! let policy = TenantPolicy::from_directory(
//!     TenancyConfig::from_env(),
//!     Arc::new(InMemoryDirectory::new()),
//! );
//! tracing::info!(?policy, "tenant policy ready");
//! ```

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
