use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Change-tracking state of a resource.
///
/// Transitions are driven by callers (write, create, delete, publish). This
/// type only stores the value; nothing here infers it from other fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceState {
    #[default]
    Unchanged,
    Changed,
    New,
    Deleted,
}

impl ResourceState {
    /// Stable numeric code used by persistence drivers.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Unchanged => 0,
            Self::Changed => 1,
            Self::New => 2,
            Self::Deleted => 3,
        }
    }

    /// Parse a numeric code.
    pub fn from_code(code: i32) -> Result<Self, TypeError> {
        match code {
            0 => Ok(Self::Unchanged),
            1 => Ok(Self::Changed),
            2 => Ok(Self::New),
            3 => Ok(Self::Deleted),
            other => Err(TypeError::UnknownStateCode(other)),
        }
    }

    /// Returns `true` for every state except `Unchanged`.
    pub fn is_modified(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "unchanged"),
            Self::Changed => write!(f, "changed"),
            Self::New => write!(f, "new"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for state in [
            ResourceState::Unchanged,
            ResourceState::Changed,
            ResourceState::New,
            ResourceState::Deleted,
        ] {
            assert_eq!(ResourceState::from_code(state.code()).unwrap(), state);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(
            ResourceState::from_code(7),
            Err(TypeError::UnknownStateCode(7))
        );
    }

    #[test]
    fn modified_helpers() {
        assert!(!ResourceState::Unchanged.is_modified());
        assert!(ResourceState::Changed.is_modified());
        assert!(ResourceState::Deleted.is_deleted());
        assert!(ResourceState::New.is_new());
        assert_eq!(ResourceState::default(), ResourceState::Unchanged);
    }
}
