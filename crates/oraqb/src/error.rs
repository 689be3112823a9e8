//! Error types for oraqb

use thiserror::Error;

/// Result type alias for oraqb validation.
pub type QbResult<T> = Result<T, QbError>;

/// Problems detected by the opt-in validation pass.
///
/// Builders never fail while being configured or rendered; these errors only
/// come out of [`SqlQb::validate`](crate::SqlQb::validate) and
/// [`SqlQb::build_checked`](crate::SqlQb::build_checked).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// A fragment or bound that can never produce valid SQL (e.g. a negative LIMIT)
    #[error("Invalid fragment: {0}")]
    InvalidFragment(String),

    /// The assembled statement is structurally broken
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    /// Rendered `?` placeholders and bound parameters disagree
    #[error("Parameter mismatch: {placeholders} placeholder(s) but {params} parameter(s)")]
    ParamMismatch { placeholders: usize, params: usize },
}

impl QbError {
    /// Create an invalid fragment error
    pub fn invalid_fragment(message: impl Into<String>) -> Self {
        Self::InvalidFragment(message.into())
    }

    /// Create a malformed query error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedQuery(message.into())
    }

    /// Check if this is an invalid fragment error
    pub fn is_invalid_fragment(&self) -> bool {
        matches!(self, Self::InvalidFragment(_))
    }

    /// Check if this is a malformed query error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedQuery(_))
    }

    /// Check if this is a parameter mismatch error
    pub fn is_param_mismatch(&self) -> bool {
        matches!(self, Self::ParamMismatch { .. })
    }
}
