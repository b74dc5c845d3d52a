//! Host framework extension points.
//!
//! A host wires these three calls into its document lifecycle, list query
//! and permission query hooks. Event names arrive as the host's strings.

use infinit_core::UserId;

use crate::condition::TenantCondition;
use crate::context::RequestContext;
use crate::error::TenancyError;
use crate::filter::Filters;
use crate::guard::{GuardedEntity, LifecycleEvent};
use crate::policy::TenantPolicy;

pub trait HostHooks {
    /// Document create/update hook. May reject with `AccessDenied`.
    fn on_document_event(
        &self,
        ctx: &RequestContext,
        entity: &mut dyn GuardedEntity,
        event: &str,
    ) -> Result<(), TenancyError>;

    /// Called before a listing query runs; returns the filters to use.
    fn on_list_query(
        &self,
        ctx: &RequestContext,
        entity_type: &str,
        filters: Option<Filters>,
    ) -> Filters;

    /// Extra restriction for the host's permission query, or `None`.
    fn permission_query_conditions(
        &self,
        ctx: &RequestContext,
        user: Option<&UserId>,
    ) -> Option<TenantCondition>;
}

impl HostHooks for TenantPolicy {
    fn on_document_event(
        &self,
        ctx: &RequestContext,
        entity: &mut dyn GuardedEntity,
        event: &str,
    ) -> Result<(), TenancyError> {
        let event: LifecycleEvent = event.parse()?;
        self.guard_entity(ctx, entity, event)
    }

    fn on_list_query(
        &self,
        ctx: &RequestContext,
        entity_type: &str,
        filters: Option<Filters>,
    ) -> Filters {
        self.apply_tenant_filter(ctx, entity_type, filters)
    }

    fn permission_query_conditions(
        &self,
        ctx: &RequestContext,
        user: Option<&UserId>,
    ) -> Option<TenantCondition> {
        self.tenant_query_condition(ctx, user)
    }
}
