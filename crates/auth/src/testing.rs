//! Shared fixtures for unit tests.

use std::sync::Arc;

use infinit_core::UserId;

use crate::config::TenancyConfig;
use crate::context::RequestContext;
use crate::directory::InMemoryDirectory;
use crate::policy::TenantPolicy;

pub(crate) const ORDER: &str = "Restaurant Order";
pub(crate) const MENU_NOTE: &str = "Menu Note";

pub(crate) fn user(name: &str) -> UserId {
    UserId::parse(name).unwrap()
}

pub(crate) struct Fixture {
    pub directory: Arc<InMemoryDirectory>,
    pub policy: TenantPolicy,
}

impl Fixture {
    /// `Restaurant Order` declares `company`; `Menu Note` does not.
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        directory.declare_field(ORDER, "company");
        directory.declare_field(ORDER, "status");
        directory.declare_field(MENU_NOTE, "body");

        let policy = TenantPolicy::from_directory(TenancyConfig::default(), directory.clone());
        Self { directory, policy }
    }

    pub fn with_tenant(caller: &str, tenant: &str) -> Self {
        let fx = Self::new();
        fx.directory.set_default(&user(caller), "Company", tenant);
        fx
    }

    pub fn ctx(&self, caller: &str) -> RequestContext {
        RequestContext::new(user(caller))
    }
}
