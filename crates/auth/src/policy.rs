use std::sync::Arc;

use infinit_core::{TenantId, UserId};

use crate::config::TenancyConfig;
use crate::context::RequestContext;
use crate::directory::{DefaultsStore, ProfileStore, RoleDirectory, SchemaMetadata};
use crate::error::TenancyError;
use crate::principal::CallerKind;
use crate::roles::holds_any;

/// Where a caller's tenant was found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TenantSource {
    UserDefault,
    Profile,
}

/// Tenant resolution and enforcement for one host installation.
///
/// Holds configuration and the host collaborators; all per-request state
/// lives in the [`RequestContext`] passed to each call.
///
/// - No persistent writes
/// - No panics
/// - "Tenant unknown" is never an error, except in [`TenantPolicy::require_tenant`]
#[derive(Clone)]
pub struct TenantPolicy {
    config: TenancyConfig,
    metadata: Arc<dyn SchemaMetadata>,
    roles: Arc<dyn RoleDirectory>,
    defaults: Arc<dyn DefaultsStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl core::fmt::Debug for TenantPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TenantPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TenantPolicy {
    pub fn new(
        config: TenancyConfig,
        metadata: Arc<dyn SchemaMetadata>,
        roles: Arc<dyn RoleDirectory>,
        defaults: Arc<dyn DefaultsStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            config,
            metadata,
            roles,
            defaults,
            profiles,
        }
    }

    /// Build a policy whose collaborators are all served by one directory.
    pub fn from_directory<D>(config: TenancyConfig, directory: Arc<D>) -> Self
    where
        D: SchemaMetadata + RoleDirectory + DefaultsStore + ProfileStore + 'static,
    {
        Self::new(
            config,
            directory.clone(),
            directory.clone(),
            directory.clone(),
            directory,
        )
    }

    pub fn config(&self) -> &TenancyConfig {
        &self.config
    }

    pub fn caller_kind(&self, ctx: &RequestContext) -> CallerKind {
        self.config.caller_kind(ctx.caller())
    }

    /// Whether records of `entity_type` carry the tenant field at all.
    pub fn has_tenant_field(&self, entity_type: &str) -> bool {
        self.metadata.has_field(entity_type, &self.config.tenant_field)
    }

    /// Tenant bound to the current caller, memoized for the request.
    ///
    /// Returns `None` for the super identity (not tenant-constrained) and for
    /// callers with no tenant configured. Unresolved lookups are not cached.
    pub fn resolve_caller_tenant(&self, ctx: &RequestContext) -> Option<TenantId> {
        if self.caller_kind(ctx).is_super() {
            return None;
        }

        if let Some(tenant) = ctx.cached_tenant() {
            tracing::debug!(request_id = %ctx.request_id(), tenant = %tenant, "tenant cache hit");
            return Some(tenant.clone());
        }

        let (tenant, source) = self.lookup_tenant(ctx.caller())?;
        tracing::debug!(
            request_id = %ctx.request_id(),
            caller = %ctx.caller(),
            tenant = %tenant,
            ?source,
            "resolved caller tenant"
        );
        Some(ctx.remember_tenant(tenant).clone())
    }

    /// Uncached lookup: per-user default first, then the profile attribute.
    pub fn lookup_tenant(&self, user: &UserId) -> Option<(TenantId, TenantSource)> {
        let from_default = self.defaults.user_default(user, &self.config.defaults_key);
        if let Some(tenant) = from_default.as_deref().and_then(TenantId::parse) {
            return Some((tenant, TenantSource::UserDefault));
        }

        let from_profile = self.profiles.profile_value(user, &self.config.profile_field);
        from_profile
            .as_deref()
            .and_then(TenantId::parse)
            .map(|tenant| (tenant, TenantSource::Profile))
    }

    pub fn is_super_admin(&self, ctx: &RequestContext) -> bool {
        if self.caller_kind(ctx).is_super() {
            return true;
        }

        self.roles
            .roles_for(ctx.caller())
            .contains(&self.config.super_admin_role)
    }

    /// Caller holds one of the configured restaurant admin roles.
    pub fn is_domain_admin(&self, ctx: &RequestContext) -> bool {
        if self.caller_kind(ctx).is_super() {
            return true;
        }

        holds_any(
            &self.roles.roles_for(ctx.caller()),
            &self.config.domain_admin_roles,
        )
    }

    /// Run `op` only if the caller has a tenant; hands it the tenant.
    pub fn with_required_tenant<T>(
        &self,
        ctx: &RequestContext,
        op: impl FnOnce(&TenantId) -> T,
    ) -> Result<T, TenancyError> {
        match self.resolve_caller_tenant(ctx) {
            Some(tenant) => Ok(op(&tenant)),
            None => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    caller = %ctx.caller(),
                    "operation requires a tenant but none is configured"
                );
                Err(TenancyError::configuration_required())
            }
        }
    }

    /// Wrap an operation so it fails fast when the caller has no tenant.
    ///
    /// The returned operation takes the same inputs as `op` and yields its
    /// output unchanged inside `Ok`.
    pub fn require_tenant<A, T, F>(
        &self,
        op: F,
    ) -> impl Fn(&RequestContext, A) -> Result<T, TenancyError>
    where
        F: Fn(&RequestContext, A) -> T,
    {
        move |ctx: &RequestContext, args: A| self.with_required_tenant(ctx, |_| op(ctx, args))
    }
}
