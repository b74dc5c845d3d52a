use serde::{Deserialize, Serialize};

/// How the tenancy layer treats a caller identity.
///
/// Two identities are distinguished by configuration; everyone else is a
/// regular member whose tenant is looked up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerKind {
    /// Unrestricted identity; exempt from every tenant check.
    Super,
    /// Unauthenticated identity; never resolves a tenant.
    Anonymous,
    /// Any other authenticated caller.
    Member,
}

impl CallerKind {
    pub fn is_super(self) -> bool {
        matches!(self, Self::Super)
    }

    pub fn is_anonymous(self) -> bool {
        matches!(self, Self::Anonymous)
    }
}
