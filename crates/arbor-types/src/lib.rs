//! Foundation types for Arbor, the versioned hierarchical content store.
//!
//! Every stored item is addressed by two independent identities: a
//! [`StructureId`] for its link in the tree and a [`ResourceId`] for its
//! content record, which siblings share. This crate holds those identities and
//! the other primitives every Arbor crate depends on.
//!
//! # Key Types
//!
//! - [`StructureId`], [`ResourceId`], [`ProjectId`], [`PrincipalId`],
//!   [`PropertyDefinitionId`], [`BackupId`]: UUID newtypes
//! - [`ResourceState`]: change-tracking state
//! - [`ResourceFlags`]: persisted flag bits
//! - [`Timestamp`] / [`ReleaseWindow`]: millisecond instants and validity intervals
//! - [`ContentDigest`]: BLAKE3 digest of a content buffer
//! - [`ErrorKind`]: the failure classes shared by every Arbor error

pub mod digest;
pub mod error;
pub mod flags;
pub mod ids;
pub mod state;
pub mod temporal;

pub use digest::ContentDigest;
pub use error::{ErrorKind, TypeError};
pub use flags::ResourceFlags;
pub use ids::{
    BackupId, PrincipalId, ProjectId, PropertyDefinitionId, ResourceId, ResourceTypeId,
    StructureId,
};
pub use state::ResourceState;
pub use temporal::{ReleaseWindow, Timestamp};
