//! Strongly-typed identifiers used across the domain.
//!
//! The host framework names tenants and users with free-form strings
//! (`"Acme Foods"`, `"chef@acme.test"`), so these are string newtypes rather
//! than UUIDs. The only structural rule is that an identifier is non-empty
//! once surrounding whitespace is removed.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a tenant (the "company" a record belongs to).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

/// Identifier of a caller (the acting user).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse an identifier, trimming surrounding whitespace.
            ///
            /// Returns `None` for empty input; the host uses empty strings to
            /// mean "unset".
            pub fn parse(raw: &str) -> Option<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            /// Wrap a literal known to be non-empty (defaults, tests).
            pub fn from_static(raw: &'static str) -> Self {
                debug_assert!(!raw.trim().is_empty(), "{} literal must not be blank", $name);
                Self(raw.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| DomainError::invalid_id(format!("{}: empty", $name)))
            }
        }
    };
}

impl_string_newtype!(TenantId, "TenantId");
impl_string_newtype!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let tenant = TenantId::parse("  Acme Foods ").unwrap();
        assert_eq!(tenant.as_str(), "Acme Foods");
    }

    #[test]
    fn blank_identifiers_are_unset() {
        assert!(TenantId::parse("").is_none());
        assert!(UserId::parse("   ").is_none());
    }

    #[test]
    fn from_str_reports_invalid_id() {
        let err = "".parse::<TenantId>().unwrap_err();
        assert_eq!(err, DomainError::InvalidId("TenantId: empty".to_string()));
    }

    #[test]
    fn serde_rejects_empty_tenant() {
        let ok: TenantId = serde_json::from_str("\"Acme\"").unwrap();
        assert_eq!(ok.as_str(), "Acme");
        assert!(serde_json::from_str::<TenantId>("\"\"").is_err());
    }
}
