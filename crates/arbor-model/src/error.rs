use arbor_types::{ErrorKind, ResourceId};

/// Errors from model construction and snapshotting.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A field value violates a resource invariant.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The content buffer of a file could not be found at snapshot time.
    #[error("content not found for resource {resource_id} ({path})")]
    ContentNotFound { resource_id: ResourceId, path: String },

    /// An external collaborator failed; the original error is kept as source.
    #[error("{operation} failed for {target}: {source}")]
    Collaborator {
        operation: &'static str,
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ModelError {
    /// Create an invalid-parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Wrap a collaborator error with the operation and target it concerned.
    pub fn collaborator(
        operation: &'static str,
        target: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Collaborator {
            operation,
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::ContentNotFound { .. } => ErrorKind::NotFound,
            Self::Collaborator { .. } => ErrorKind::Collaborator,
        }
    }
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
