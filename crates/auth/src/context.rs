use std::cell::OnceCell;

use uuid::Uuid;

use infinit_core::{TenantId, UserId};

/// Per-request tenancy state.
///
/// Owns the caller identity and the request-scoped tenant cache. Create one
/// at the start of a request and drop it at the end; it is deliberately not
/// `Sync` so the cache can never be shared between in-flight requests.
#[derive(Debug)]
pub struct RequestContext {
    request_id: Uuid,
    caller: UserId,
    tenant: OnceCell<TenantId>,
}

impl RequestContext {
    pub fn new(caller: UserId) -> Self {
        Self::with_request_id(Uuid::now_v7(), caller)
    }

    pub fn with_request_id(request_id: Uuid, caller: UserId) -> Self {
        Self {
            request_id,
            caller,
            tenant: OnceCell::new(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn caller(&self) -> &UserId {
        &self.caller
    }

    /// Tenant memoized for this request, if one has been resolved.
    pub fn cached_tenant(&self) -> Option<&TenantId> {
        self.tenant.get()
    }

    /// Populate the cache. The first resolved value wins for the rest of the
    /// request; later writes are ignored.
    pub(crate) fn remember_tenant(&self, tenant: TenantId) -> &TenantId {
        self.tenant.get_or_init(|| tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_starts_empty_and_keeps_first_value() {
        let ctx = RequestContext::new(UserId::from_static("chef@acme.test"));
        assert!(ctx.cached_tenant().is_none());

        ctx.remember_tenant(TenantId::from_static("Acme"));
        ctx.remember_tenant(TenantId::from_static("Globex"));

        assert_eq!(ctx.cached_tenant().map(TenantId::as_str), Some("Acme"));
    }

    #[test]
    fn each_request_gets_its_own_cache() {
        let first = RequestContext::new(UserId::from_static("chef@acme.test"));
        first.remember_tenant(TenantId::from_static("Acme"));

        let second = RequestContext::new(UserId::from_static("chef@acme.test"));
        assert!(second.cached_tenant().is_none());
        assert_ne!(first.request_id(), second.request_id());
    }
}
