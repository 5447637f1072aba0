use arbor_tree::TreeError;
use arbor_types::ErrorKind;

/// Errors from collector queries.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// The parameter string is malformed.
    #[error("invalid collector parameter '{param}': {reason}")]
    InvalidParameter { param: String, reason: String },

    /// No strategy has this name.
    #[error("unknown collector strategy: {0}")]
    UnknownStrategy(String),

    /// A tree read failed. Passed through unchanged.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl CollectorError {
    pub fn invalid(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::UnknownStrategy(_) => ErrorKind::UnknownStrategy,
            Self::Tree(e) => e.kind(),
        }
    }
}

/// Result alias for collector operations.
pub type CollectorResult<T> = Result<T, CollectorError>;
