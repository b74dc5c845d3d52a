//! Tenancy configuration.
//!
//! Defaults match the host ERP's conventions: tenants live in a `company`
//! field, the per-user default is stored under `Company`, and the fallback
//! profile attribute is `custom_company`.

use serde::{Deserialize, Serialize};

use infinit_core::{DomainError, DomainResult, UserId};

use crate::principal::CallerKind;
use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenancyConfig {
    /// Identity exempt from all tenant checks.
    pub super_user: UserId,
    /// Unauthenticated identity.
    pub anonymous_user: UserId,
    /// Field that carries the tenant on guarded records.
    pub tenant_field: String,
    /// Key of the per-user default holding the caller's tenant.
    pub defaults_key: String,
    /// Profile attribute consulted when no default is set.
    pub profile_field: String,
    /// Table holding the tenants themselves, used by bulk query conditions.
    pub scope_table: String,
    /// Key column of `scope_table`.
    pub scope_key: String,
    /// Role that makes a caller a super admin.
    pub super_admin_role: Role,
    /// Roles that make a caller a restaurant (domain) admin.
    pub domain_admin_roles: Vec<Role>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            super_user: UserId::from_static("Administrator"),
            anonymous_user: UserId::from_static("Guest"),
            tenant_field: "company".to_string(),
            defaults_key: "Company".to_string(),
            profile_field: "custom_company".to_string(),
            scope_table: "tabCompany".to_string(),
            scope_key: "name".to_string(),
            super_admin_role: Role::new(Role::SYSTEM_MANAGER),
            domain_admin_roles: vec![
                Role::new(Role::RESTAURANT_ADMIN),
                Role::new(Role::RESTAURANT_MANAGER),
                Role::new(Role::SYSTEM_MANAGER),
            ],
        }
    }
}

impl TenancyConfig {
    /// Defaults overridden by `INFINIT_*` environment variables.
    ///
    /// Invalid (blank) values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `INFINIT_*`
    /// key. Blank values keep the default; an invalid result falls back to
    /// the defaults entirely.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(user) = lookup_user(&lookup, "INFINIT_SUPER_USER") {
            config.super_user = user;
        }
        if let Some(user) = lookup_user(&lookup, "INFINIT_ANONYMOUS_USER") {
            config.anonymous_user = user;
        }
        lookup_string(&lookup, "INFINIT_TENANT_FIELD", &mut config.tenant_field);
        lookup_string(&lookup, "INFINIT_DEFAULTS_KEY", &mut config.defaults_key);
        lookup_string(&lookup, "INFINIT_PROFILE_FIELD", &mut config.profile_field);
        lookup_string(&lookup, "INFINIT_SCOPE_TABLE", &mut config.scope_table);
        lookup_string(&lookup, "INFINIT_SCOPE_KEY", &mut config.scope_key);

        if let Err(err) = config.validate() {
            tracing::warn!("tenancy config from environment is invalid ({err}); using defaults");
            return Self::default();
        }

        config
    }

    pub fn validate(&self) -> DomainResult<()> {
        let fields = [
            ("tenant_field", &self.tenant_field),
            ("defaults_key", &self.defaults_key),
            ("profile_field", &self.profile_field),
            ("scope_table", &self.scope_table),
            ("scope_key", &self.scope_key),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{name} must not be empty")));
            }
        }

        if self.super_user == self.anonymous_user {
            return Err(DomainError::validation(
                "super_user and anonymous_user must differ",
            ));
        }

        Ok(())
    }

    pub fn caller_kind(&self, caller: &UserId) -> CallerKind {
        if *caller == self.super_user {
            CallerKind::Super
        } else if *caller == self.anonymous_user {
            CallerKind::Anonymous
        } else {
            CallerKind::Member
        }
    }
}

fn lookup_user(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<UserId> {
    let raw = lookup(key)?;
    let parsed = UserId::parse(&raw);
    if parsed.is_none() {
        tracing::warn!("{key} is blank; keeping default");
    }
    parsed
}

fn lookup_string(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut String) {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => *target = value.trim().to_string(),
        Some(_) => tracing::warn!("{key} is blank; keeping default"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn user(name: &str) -> UserId {
        UserId::parse(name).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let config = TenancyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tenant_field, "company");
        assert!(config.domain_admin_roles.contains(&config.super_admin_role));
    }

    #[test]
    fn classifies_distinguished_callers() {
        let config = TenancyConfig::default();
        assert_eq!(config.caller_kind(&user("Administrator")), CallerKind::Super);
        assert_eq!(config.caller_kind(&user("Guest")), CallerKind::Anonymous);
        assert_eq!(config.caller_kind(&user("chef@acme.test")), CallerKind::Member);
    }

    #[test]
    fn rejects_blank_fields_and_shared_identities() {
        let mut config = TenancyConfig::default();
        config.tenant_field = "  ".to_string();
        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));

        let mut config = TenancyConfig::default();
        config.anonymous_user = config.super_user.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TenancyConfig =
            serde_json::from_str(r#"{ "tenant_field": "outlet", "super_user": "root" }"#).unwrap();

        assert_eq!(config.tenant_field, "outlet");
        assert_eq!(config.super_user.as_str(), "root");
        assert_eq!(config.profile_field, "custom_company");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = TenancyConfig::from_lookup(vars(&[
            ("INFINIT_SUPER_USER", "root"),
            ("INFINIT_ANONYMOUS_USER", "visitor"),
            ("INFINIT_TENANT_FIELD", " outlet "),
            ("INFINIT_DEFAULTS_KEY", "Outlet"),
            ("INFINIT_PROFILE_FIELD", "home_outlet"),
            ("INFINIT_SCOPE_TABLE", "tabOutlet"),
            ("INFINIT_SCOPE_KEY", "outlet_code"),
        ]));

        assert_eq!(config.super_user.as_str(), "root");
        assert_eq!(config.anonymous_user.as_str(), "visitor");
        assert_eq!(config.tenant_field, "outlet");
        assert_eq!(config.defaults_key, "Outlet");
        assert_eq!(config.profile_field, "home_outlet");
        assert_eq!(config.scope_table, "tabOutlet");
        assert_eq!(config.scope_key, "outlet_code");
    }

    #[test]
    fn blank_variables_keep_defaults() {
        let config = TenancyConfig::from_lookup(vars(&[
            ("INFINIT_SUPER_USER", "   "),
            ("INFINIT_TENANT_FIELD", ""),
            ("INFINIT_SCOPE_KEY", " "),
            ("INFINIT_PROFILE_FIELD", "home_outlet"),
        ]));
        let defaults = TenancyConfig::default();

        assert_eq!(config.super_user, defaults.super_user);
        assert_eq!(config.tenant_field, defaults.tenant_field);
        assert_eq!(config.scope_key, defaults.scope_key);
        assert_eq!(config.profile_field, "home_outlet");
    }

    #[test]
    fn invalid_combination_falls_back_to_all_defaults() {
        let config = TenancyConfig::from_lookup(vars(&[
            ("INFINIT_SUPER_USER", "shared"),
            ("INFINIT_ANONYMOUS_USER", "shared"),
            ("INFINIT_TENANT_FIELD", "outlet"),
        ]));

        assert_eq!(config, TenancyConfig::default());
    }

    #[test]
    fn no_variables_yields_defaults() {
        assert_eq!(TenancyConfig::from_lookup(|_| None), TenancyConfig::default());
    }
}
