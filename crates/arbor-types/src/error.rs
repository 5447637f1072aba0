use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown resource state code: {0}")]
    UnknownStateCode(i32),
}

/// Closed classification shared by every Arbor error type.
///
/// Each crate keeps its own error enum; `kind()` on those enums maps onto this
/// set so callers can branch on the failure class without matching every
/// crate-specific variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed caller input. Never retried.
    InvalidParameter,
    /// No collector strategy with the requested name.
    UnknownStrategy,
    /// No resource type handler for the requested id or name.
    UnknownResourceType,
    /// Requested path, resource, content, or backup is absent.
    NotFound,
    /// The operation is intentionally disabled.
    UnsupportedOperation,
    /// A registration clashes with an existing entry.
    Conflict,
    /// Failure reported by an external collaborator.
    Collaborator,
}

impl ErrorKind {
    /// Returns `true` if the caller may reasonably try again with other input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidParameter => "invalid parameter",
            Self::UnknownStrategy => "unknown strategy",
            Self::UnknownResourceType => "unknown resource type",
            Self::NotFound => "not found",
            Self::UnsupportedOperation => "unsupported operation",
            Self::Conflict => "conflict",
            Self::Collaborator => "collaborator failure",
        };
        f.write_str(s)
    }
}
