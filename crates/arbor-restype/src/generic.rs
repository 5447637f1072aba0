use std::sync::Arc;

use tracing::error;

use arbor_model::Property;
use arbor_types::{ResourceTypeId, Timestamp};

use crate::error::{ResourceTypeError, ResourceTypeResult};
use crate::handler::{assemble_resource, CreateRequest, NewResource, ResourceTypeHandler};

/// Loader that streams content unchanged.
pub const LOADER_DUMP: u32 = 1;
/// Loader that scales and serves images.
pub const LOADER_IMAGE: u32 = 2;
/// Loader that redirects to the link stored as content.
pub const LOADER_POINTER: u32 = 4;
/// Loader that executes server-side templates.
pub const LOADER_JSP: u32 = 6;

// ---------------------------------------------------------------------------
// GenericResourceType
// ---------------------------------------------------------------------------

/// A data-driven handler: all type behavior comes from its fields.
///
/// Covers every built-in type and every type declared in a
/// [`RegistryConfig`](crate::RegistryConfig).
#[derive(Clone, Debug)]
pub struct GenericResourceType {
    name: String,
    type_id: ResourceTypeId,
    loader_id: u32,
    folder: bool,
    direct_editable: bool,
    cache_property: Option<String>,
    default_properties: Vec<Property>,
}

impl GenericResourceType {
    /// A content type.
    pub fn file(name: impl Into<String>, type_id: u32, loader_id: u32) -> Self {
        Self {
            name: name.into(),
            type_id: ResourceTypeId(type_id),
            loader_id,
            folder: false,
            direct_editable: false,
            cache_property: None,
            default_properties: Vec::new(),
        }
    }

    /// A folder type.
    pub fn folder(name: impl Into<String>, type_id: u32, loader_id: u32) -> Self {
        Self {
            folder: true,
            ..Self::file(name, type_id, loader_id)
        }
    }

    pub fn with_direct_editable(mut self, editable: bool) -> Self {
        self.direct_editable = editable;
        self
    }

    pub fn with_cache_property(mut self, property: impl Into<String>) -> Self {
        self.cache_property = Some(property.into());
        self
    }

    pub fn with_default_properties(mut self, properties: Vec<Property>) -> Self {
        self.default_properties = properties;
        self
    }
}

impl ResourceTypeHandler for GenericResourceType {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_id(&self) -> ResourceTypeId {
        self.type_id
    }

    fn loader_id(&self) -> u32 {
        self.loader_id
    }

    fn is_folder(&self) -> bool {
        self.folder
    }

    fn is_direct_editable(&self) -> bool {
        self.direct_editable
    }

    fn default_cache_property(&self) -> Option<&str> {
        self.cache_property.as_deref()
    }

    fn default_properties(&self) -> &[Property] {
        &self.default_properties
    }

    fn create(&self, request: CreateRequest) -> ResourceTypeResult<NewResource> {
        assemble_resource(self, request, Timestamp::now())
    }
}

// ---------------------------------------------------------------------------
// DeprecatedResourceType
// ---------------------------------------------------------------------------

/// A retired type. Existing resources keep dispatching to it, but creating
/// new ones always fails.
#[derive(Clone, Debug)]
pub struct DeprecatedResourceType {
    name: String,
    type_id: ResourceTypeId,
    loader_id: u32,
    folder: bool,
}

impl DeprecatedResourceType {
    pub fn new(name: impl Into<String>, type_id: u32, loader_id: u32, folder: bool) -> Self {
        Self {
            name: name.into(),
            type_id: ResourceTypeId(type_id),
            loader_id,
            folder,
        }
    }
}

impl ResourceTypeHandler for DeprecatedResourceType {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_id(&self) -> ResourceTypeId {
        self.type_id
    }

    fn loader_id(&self) -> u32 {
        self.loader_id
    }

    fn is_folder(&self) -> bool {
        self.folder
    }

    fn is_deprecated(&self) -> bool {
        true
    }

    fn create(&self, request: CreateRequest) -> ResourceTypeResult<NewResource> {
        error!(
            type_name = %self.name,
            type_id = %self.type_id,
            target = %request.target_path,
            "create called on deprecated resource type"
        );
        Err(ResourceTypeError::unsupported(&self.name, "create"))
    }
}

/// The built-in types every registry starts with.
pub fn default_types() -> Vec<Arc<dyn ResourceTypeHandler>> {
    vec![
        Arc::new(GenericResourceType::folder("folder", 0, LOADER_DUMP)),
        Arc::new(GenericResourceType::file("plain", 1, LOADER_DUMP).with_direct_editable(true)),
        Arc::new(GenericResourceType::file("binary", 2, LOADER_DUMP)),
        Arc::new(GenericResourceType::file("image", 3, LOADER_IMAGE)),
        Arc::new(
            GenericResourceType::file("jsp", 4, LOADER_JSP)
                .with_direct_editable(true)
                .with_cache_property("cache"),
        ),
        Arc::new(GenericResourceType::file("pointer", 9, LOADER_POINTER).with_direct_editable(true)),
    ]
}
