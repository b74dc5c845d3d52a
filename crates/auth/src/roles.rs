use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role name held by a caller (e.g. "System Manager", "Restaurant Admin").
///
/// Roles are opaque strings at this layer; the host's permission system owns
/// what a role grants. Tenancy only asks whether a caller holds one of a few
/// elevated names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const SYSTEM_MANAGER: &'static str = "System Manager";
    pub const RESTAURANT_ADMIN: &'static str = "Restaurant Admin";
    pub const RESTAURANT_MANAGER: &'static str = "Restaurant Manager";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// True if any role in `held` appears in `wanted`.
pub fn holds_any(held: &[Role], wanted: &[Role]) -> bool {
    held.iter().any(|role| wanted.contains(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_any_matches_on_intersection() {
        let held = vec![Role::new("Waiter"), Role::new(Role::RESTAURANT_MANAGER)];
        let wanted = vec![Role::new(Role::RESTAURANT_ADMIN), Role::new(Role::RESTAURANT_MANAGER)];

        assert!(holds_any(&held, &wanted));
        assert!(!holds_any(&held[..1], &wanted));
        assert!(!holds_any(&[], &wanted));
    }
}
