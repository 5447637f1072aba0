use arbor_types::ErrorKind;

/// Errors from tree-read operations.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// No resource at the requested path.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The path is malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A resource or definition already occupies the key.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The model rejected a record read from the backend.
    #[error("model error: {0}")]
    Model(#[from] arbor_model::ModelError),

    /// Failure in the underlying storage backend.
    #[error("backend error: {0}")]
    Backend(String),
}

impl TreeError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidPath(_) => ErrorKind::InvalidParameter,
            Self::AlreadyExists(_) => ErrorKind::Conflict,
            Self::Model(e) => e.kind(),
            Self::Backend(_) => ErrorKind::Collaborator,
        }
    }
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
