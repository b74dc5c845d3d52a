//! List-query filter injection.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::context::RequestContext;
use crate::policy::TenantPolicy;

/// Host list-query filters: field name to match value.
pub type Filters = BTreeMap<String, Value>;

impl TenantPolicy {
    /// Scope a list query to the caller's tenant.
    ///
    /// Forces the tenant field to the caller's tenant when the entity type
    /// declares it, overwriting any supplied value. Every other key is kept.
    /// Super callers, callers without a tenant, and tenant-less types get the
    /// filters back unchanged. A missing map is treated as empty.
    pub fn apply_tenant_filter(
        &self,
        ctx: &RequestContext,
        entity_type: &str,
        filters: Option<Filters>,
    ) -> Filters {
        let mut filters = filters.unwrap_or_default();

        if self.caller_kind(ctx).is_super() {
            return filters;
        }

        let Some(tenant) = self.resolve_caller_tenant(ctx) else {
            return filters;
        };

        if self.has_tenant_field(entity_type) {
            let field = self.config().tenant_field.clone();
            if let Some(previous) = filters.insert(field, Value::String(tenant.to_string())) {
                if previous.as_str() != Some(tenant.as_str()) {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        entity_type,
                        %previous,
                        "overrode caller-supplied tenant filter"
                    );
                }
            }
        }

        filters
    }
}
