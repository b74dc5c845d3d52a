//! Host collaborators the tenancy layer reads from.
//!
//! The host framework owns schema metadata, role assignments, per-user
//! defaults and user profiles. These traits are the read-only slice of those
//! services that tenant resolution needs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use infinit_core::UserId;

use crate::roles::Role;

/// Schema introspection: does an entity type declare a field?
pub trait SchemaMetadata: Send + Sync {
    fn has_field(&self, entity_type: &str, field: &str) -> bool;
}

/// Role assignments for any caller.
pub trait RoleDirectory: Send + Sync {
    fn roles_for(&self, user: &UserId) -> Vec<Role>;
}

/// Per-user default values (e.g. the default company).
pub trait DefaultsStore: Send + Sync {
    fn user_default(&self, user: &UserId, key: &str) -> Option<String>;
}

/// Attributes stored on the user's profile record.
pub trait ProfileStore: Send + Sync {
    fn profile_value(&self, user: &UserId, field: &str) -> Option<String>;
}

impl<S> SchemaMetadata for Arc<S>
where
    S: SchemaMetadata + ?Sized,
{
    fn has_field(&self, entity_type: &str, field: &str) -> bool {
        (**self).has_field(entity_type, field)
    }
}

impl<S> RoleDirectory for Arc<S>
where
    S: RoleDirectory + ?Sized,
{
    fn roles_for(&self, user: &UserId) -> Vec<Role> {
        (**self).roles_for(user)
    }
}

impl<S> DefaultsStore for Arc<S>
where
    S: DefaultsStore + ?Sized,
{
    fn user_default(&self, user: &UserId, key: &str) -> Option<String> {
        (**self).user_default(user, key)
    }
}

impl<S> ProfileStore for Arc<S>
where
    S: ProfileStore + ?Sized,
{
    fn profile_value(&self, user: &UserId, field: &str) -> Option<String> {
        (**self).profile_value(user, field)
    }
}

/// In-memory implementation of every collaborator, for tests/dev.
///
/// Counts default and profile lookups so callers can observe whether the
/// request cache was hit.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    fields: RwLock<HashMap<String, HashSet<String>>>,
    roles: RwLock<HashMap<UserId, Vec<Role>>>,
    defaults: RwLock<HashMap<(UserId, String), String>>,
    profiles: RwLock<HashMap<(UserId, String), String>>,
    lookups: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `field` on `entity_type`.
    pub fn declare_field(&self, entity_type: impl Into<String>, field: impl Into<String>) {
        if let Ok(mut map) = self.fields.write() {
            map.entry(entity_type.into()).or_default().insert(field.into());
        }
    }

    pub fn grant_roles(&self, user: &UserId, roles: impl IntoIterator<Item = Role>) {
        if let Ok(mut map) = self.roles.write() {
            map.entry(user.clone()).or_default().extend(roles);
        }
    }

    pub fn set_default(&self, user: &UserId, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut map) = self.defaults.write() {
            map.insert((user.clone(), key.into()), value.into());
        }
    }

    pub fn set_profile_value(
        &self,
        user: &UserId,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let Ok(mut map) = self.profiles.write() {
            map.insert((user.clone(), field.into()), value.into());
        }
    }

    /// Number of default + profile lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl SchemaMetadata for InMemoryDirectory {
    fn has_field(&self, entity_type: &str, field: &str) -> bool {
        match self.fields.read() {
            Ok(map) => map.get(entity_type).is_some_and(|f| f.contains(field)),
            Err(_) => false,
        }
    }
}

impl RoleDirectory for InMemoryDirectory {
    fn roles_for(&self, user: &UserId) -> Vec<Role> {
        match self.roles.read() {
            Ok(map) => map.get(user).cloned().unwrap_or_default(),
            Err(_) => vec![],
        }
    }
}

impl DefaultsStore for InMemoryDirectory {
    fn user_default(&self, user: &UserId, key: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let map = self.defaults.read().ok()?;
        map.get(&(user.clone(), key.to_string())).cloned()
    }
}

impl ProfileStore for InMemoryDirectory {
    fn profile_value(&self, user: &UserId, field: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let map = self.profiles.read().ok()?;
        map.get(&(user.clone(), field.to_string())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_directory_answers_each_collaborator() {
        let dir = InMemoryDirectory::new();
        let user = UserId::from_static("chef@acme.test");

        dir.declare_field("Restaurant Order", "company");
        dir.grant_roles(&user, [Role::new(Role::RESTAURANT_MANAGER)]);
        dir.set_default(&user, "Company", "Acme");
        dir.set_profile_value(&user, "custom_company", "Acme Foods");

        assert!(dir.has_field("Restaurant Order", "company"));
        assert!(!dir.has_field("Restaurant Order", "outlet"));
        assert!(!dir.has_field("Menu Item", "company"));
        assert_eq!(dir.roles_for(&user), vec![Role::new(Role::RESTAURANT_MANAGER)]);
        assert_eq!(dir.user_default(&user, "Company").as_deref(), Some("Acme"));
        assert_eq!(
            dir.profile_value(&user, "custom_company").as_deref(),
            Some("Acme Foods")
        );
        assert_eq!(dir.lookups(), 2);
    }

    #[test]
    fn arc_wrapped_directory_delegates() {
        let dir = Arc::new(InMemoryDirectory::new());
        dir.declare_field("Restaurant Table", "company");

        let metadata: Arc<dyn SchemaMetadata> = dir.clone();
        assert!(metadata.has_field("Restaurant Table", "company"));
    }
}
