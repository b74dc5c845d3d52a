use thiserror::Error;

/// User-facing denial for cross-tenant access.
pub const ACCESS_DENIED_MESSAGE: &str =
    "Access Denied: You can only access data from your own organization.";

/// User-facing message when an operation needs a tenant and none is set.
pub const TENANT_REQUIRED_MESSAGE: &str =
    "Company context required. Please set your default company.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenancyError {
    /// A record belongs to a different tenant than the caller.
    #[error("{0}")]
    AccessDenied(String),

    /// The operation requires a tenant and the caller has none configured.
    #[error("{0}")]
    ConfigurationRequired(String),

    /// The host invoked the document hook with an event name we do not know.
    #[error("unknown document event '{0}'")]
    UnknownEvent(String),
}

impl TenancyError {
    pub fn access_denied() -> Self {
        Self::AccessDenied(ACCESS_DENIED_MESSAGE.to_string())
    }

    pub fn configuration_required() -> Self {
        Self::ConfigurationRequired(TENANT_REQUIRED_MESSAGE.to_string())
    }
}
