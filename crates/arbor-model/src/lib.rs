//! Resource model for Arbor.
//!
//! This crate holds the entities every other Arbor crate passes around:
//!
//! - [`Resource`] -- structural and content metadata of a tree entry
//! - [`File`] -- a file resource plus its owned content buffer
//! - [`ResourceBuilder`] -- the staging area that is the only way to assemble
//!   a [`Resource`] from raw field values
//! - [`PropertyDefinition`] / [`Property`] -- metadata slots and their values
//! - [`Project`] -- the unit of publishing
//! - [`BackupResource`] / [`HistoryProject`] -- immutable publish-time
//!   snapshots with principal names frozen in
//!
//! # Design Rules
//!
//! 1. Invariants are checked once, when a resource is built; setters that could
//!    break one return a `Result`.
//! 2. A folder never has content and never becomes a file.
//! 3. Content buffers are owned `Vec<u8>`s. Cloning copies them, so no two
//!    instances alias the same bytes.
//! 4. Snapshots are never mutated after construction.

pub mod backup;
pub mod builder;
pub mod error;
pub mod file;
pub mod history;
pub mod path;
pub mod project;
pub mod property;
pub mod resource;

pub use backup::{
    BackupResource, BackupStamp, ContentSource, PrincipalNames, PrincipalResolver,
    VersionedResource,
};
pub use builder::ResourceBuilder;
pub use error::{ModelError, ModelResult};
pub use file::File;
pub use history::{HistoryProject, ProjectNames, PublishStamp};
pub use project::{Project, ProjectType};
pub use property::{MappingType, Property, PropertyDefinition, NULL_PROPERTY_DEFINITION};
pub use resource::{
    compare_date_last_modified, compare_date_released, compare_root_path, Resource, ResourceKind,
};
