//! Row-level condition for bulk queries.
//!
//! The condition matches rows either in the tenant table itself (its key is
//! the tenant) or in any table whose tenant column equals the tenant. The
//! tenant is always a bind parameter; only configured identifiers appear in
//! the SQL text.

use serde::Serialize;

use infinit_core::{TenantId, UserId};

use crate::context::RequestContext;
use crate::policy::TenantPolicy;

/// Placeholder syntax of the target database driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` (MySQL/MariaDB, SQLite).
    Question,
    /// `$n` starting at the given index (Postgres). Indexes start at 1.
    Numbered(usize),
}

/// `(<scope_table>.<scope_key> = :tenant OR <tenant_column> = :tenant)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantCondition {
    pub scope_table: String,
    pub scope_key: String,
    pub tenant_column: String,
    pub tenant: TenantId,
}

impl TenantCondition {
    /// Render the SQL fragment and its bind parameters, in order.
    ///
    /// Returns `None` when a numbered placeholder would be `$0` or overflow.
    pub fn to_sql(&self, style: PlaceholderStyle) -> Option<(String, Vec<String>)> {
        let (first, second) = match style {
            PlaceholderStyle::Question => ("?".to_string(), "?".to_string()),
            PlaceholderStyle::Numbered(0) => return None,
            PlaceholderStyle::Numbered(start) => {
                let next = start.checked_add(1)?;
                (format!("${start}"), format!("${next}"))
            }
        };

        let sql = format!(
            "({}.{} = {first} OR {} = {second})",
            quote_ident(&self.scope_table),
            quote_ident(&self.scope_key),
            quote_ident(&self.tenant_column),
        );

        Some((sql, vec![self.tenant.to_string(), self.tenant.to_string()]))
    }

    /// True if a row with these values would pass the condition.
    pub fn matches(&self, scope_key_value: Option<&str>, tenant_value: Option<&str>) -> bool {
        let tenant = self.tenant.as_str();
        scope_key_value == Some(tenant) || tenant_value == Some(tenant)
    }
}

fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

impl TenantPolicy {
    /// Extra restriction for bulk queries run on behalf of `caller`
    /// (defaults to the request's caller).
    ///
    /// Looks the tenant up directly rather than through the request cache,
    /// since `caller` may be someone other than the current caller. `None`
    /// means "no extra restriction".
    pub fn tenant_query_condition(
        &self,
        ctx: &RequestContext,
        caller: Option<&UserId>,
    ) -> Option<TenantCondition> {
        let caller = caller.unwrap_or(ctx.caller());
        if self.config().caller_kind(caller).is_super() {
            return None;
        }

        let (tenant, _) = self.lookup_tenant(caller)?;
        let config = self.config();
        Some(TenantCondition {
            scope_table: config.scope_table.clone(),
            scope_key: config.scope_key.clone(),
            tenant_column: config.tenant_field.clone(),
            tenant,
        })
    }
}
