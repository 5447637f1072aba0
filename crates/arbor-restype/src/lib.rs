//! Resource type dispatch for Arbor.
//!
//! Every resource carries a numeric type id. The [`ResourceTypeRegistry`] maps
//! that id, and a parallel name, to a [`ResourceTypeHandler`] that knows how
//! to create resources of the type and which loader interprets their content.
//!
//! Types are an open set: the built-ins come from
//! [`ResourceTypeRegistry::with_default_types`], further types are registered
//! at runtime, usually from a [`RegistryConfig`] TOML document.

pub mod config;
pub mod error;
pub mod generic;
pub mod handler;
pub mod registry;

pub use config::{DefaultProperty, RegistryConfig, TypeConfig, TypeKind};
pub use error::{ResourceTypeError, ResourceTypeResult};
pub use generic::{
    default_types, DeprecatedResourceType, GenericResourceType, LOADER_DUMP, LOADER_IMAGE,
    LOADER_JSP, LOADER_POINTER,
};
pub use handler::{assemble_resource, CreateRequest, NewResource, ResourceTypeHandler};
pub use registry::{ResourceTypeRegistry, TypeRef};
