//! Document guard: auto-fill the tenant on create, deny on mismatch.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use infinit_core::TenantId;

use crate::context::RequestContext;
use crate::error::TenancyError;
use crate::policy::TenantPolicy;

/// A record the guard can inspect and, on creation, stamp with a tenant.
///
/// The field name is supplied by the policy so one implementation can serve
/// any tenant field configuration.
pub trait GuardedEntity {
    fn entity_type(&self) -> &str;

    /// True until the record has been persisted once.
    fn is_new(&self) -> bool;

    /// Tenant value currently stored on the record.
    fn tenant(&self, field: &str) -> RecordTenant;

    fn set_tenant(&mut self, field: &str, tenant: &TenantId);
}

/// What a record holds in its tenant field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordTenant {
    /// Missing, `null` or the empty string.
    Unset,
    /// A string tenant, exactly as stored.
    Set(String),
    /// A value that cannot name a tenant (number, object, ...).
    Malformed(String),
}

impl RecordTenant {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Exact comparison; no trimming or case folding.
    pub fn is(&self, tenant: &TenantId) -> bool {
        matches!(self, Self::Set(raw) if raw == tenant.as_str())
    }
}

impl core::fmt::Display for RecordTenant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unset => f.write_str("<unset>"),
            Self::Set(raw) | Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Host document lifecycle events the guard is wired to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    BeforeInsert,
    Validate,
    BeforeSave,
    OnUpdate,
    OnTrash,
}

impl LifecycleEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeforeInsert => "before_insert",
            Self::Validate => "validate",
            Self::BeforeSave => "before_save",
            Self::OnUpdate => "on_update",
            Self::OnTrash => "on_trash",
        }
    }
}

impl core::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = TenancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before_insert" => Ok(Self::BeforeInsert),
            "validate" => Ok(Self::Validate),
            "before_save" => Ok(Self::BeforeSave),
            "on_update" => Ok(Self::OnUpdate),
            "on_trash" => Ok(Self::OnTrash),
            other => Err(TenancyError::UnknownEvent(other.to_string())),
        }
    }
}

/// Dynamic host document: a type name, a persistence flag and a field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub doctype: String,
    pub name: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// A document that has not been saved yet.
    pub fn new(doctype: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            name: None,
            is_new: true,
            fields: Map::new(),
        }
    }

    /// A previously saved document.
    pub fn existing(doctype: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            name: Some(name.into()),
            is_new: false,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl GuardedEntity for Document {
    fn entity_type(&self) -> &str {
        &self.doctype
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn tenant(&self, field: &str) -> RecordTenant {
        match self.fields.get(field) {
            None | Some(Value::Null) => RecordTenant::Unset,
            Some(Value::String(raw)) if raw.is_empty() => RecordTenant::Unset,
            Some(Value::String(raw)) => RecordTenant::Set(raw.clone()),
            Some(other) => RecordTenant::Malformed(other.to_string()),
        }
    }

    fn set_tenant(&mut self, field: &str, tenant: &TenantId) {
        self.fields
            .insert(field.to_string(), Value::String(tenant.to_string()));
    }
}

impl TenantPolicy {
    /// Enforce tenant isolation on a record at a lifecycle event.
    ///
    /// Super and anonymous callers, tenant-less entity types, and callers
    /// with no resolvable tenant pass through untouched. A new record with
    /// no tenant is stamped with the caller's. Any record whose tenant is set
    /// and not exactly the caller's, including non-string values, is rejected.
    pub fn guard_entity<E>(
        &self,
        ctx: &RequestContext,
        entity: &mut E,
        event: LifecycleEvent,
    ) -> Result<(), TenancyError>
    where
        E: GuardedEntity + ?Sized,
    {
        let kind = self.caller_kind(ctx);
        if kind.is_super() || kind.is_anonymous() {
            return Ok(());
        }

        if !self.has_tenant_field(entity.entity_type()) {
            return Ok(());
        }

        // Unknown tenant: leave it to the host's own permission checks.
        let Some(caller_tenant) = self.resolve_caller_tenant(ctx) else {
            return Ok(());
        };

        let field = self.config().tenant_field.as_str();
        let current = entity.tenant(field);

        if entity.is_new() && current.is_unset() {
            entity.set_tenant(field, &caller_tenant);
            tracing::info!(
                request_id = %ctx.request_id(),
                entity_type = entity.entity_type(),
                tenant = %caller_tenant,
                %event,
                "assigned caller tenant to new record"
            );
            return Ok(());
        }

        if current.is_unset() || current.is(&caller_tenant) {
            return Ok(());
        }

        tracing::warn!(
            request_id = %ctx.request_id(),
            caller = %ctx.caller(),
            entity_type = entity.entity_type(),
            record_tenant = %current,
            caller_tenant = %caller_tenant,
            %event,
            "cross-tenant access denied"
        );
        Err(TenancyError::access_denied())
    }
}
