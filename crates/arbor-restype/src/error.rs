use arbor_types::ErrorKind;

/// Errors from resource type dispatch and registry configuration.
#[derive(Debug, thiserror::Error)]
pub enum ResourceTypeError {
    /// No handler is registered under the requested id or name.
    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),

    /// The handler refuses the operation; calling it is a programming error.
    #[error("unsupported operation '{operation}' for resource type {type_name}")]
    UnsupportedOperation {
        type_name: String,
        operation: &'static str,
    },

    /// A handler with the same id or name is already registered.
    #[error("duplicate resource type: {0}")]
    DuplicateResourceType(String),

    /// The create request is malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The model rejected the resource assembled by a handler.
    #[error("model error: {0}")]
    Model(#[from] arbor_model::ModelError),

    /// The registry configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ResourceTypeError {
    /// Create an unsupported-operation error.
    pub fn unsupported(type_name: impl Into<String>, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            type_name: type_name.into(),
            operation,
        }
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownResourceType(_) => ErrorKind::UnknownResourceType,
            Self::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            Self::DuplicateResourceType(_) => ErrorKind::Conflict,
            Self::InvalidParameter(_) | Self::Config(_) => ErrorKind::InvalidParameter,
            Self::Model(e) => e.kind(),
        }
    }
}

impl From<toml::de::Error> for ResourceTypeError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result alias for resource type operations.
pub type ResourceTypeResult<T> = Result<T, ResourceTypeError>;
