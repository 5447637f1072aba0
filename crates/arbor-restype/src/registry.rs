use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use arbor_model::Resource;
use arbor_types::ResourceTypeId;

use crate::error::{ResourceTypeError, ResourceTypeResult};
use crate::generic::default_types;
use crate::handler::{CreateRequest, NewResource, ResourceTypeHandler};

/// A reference to a resource type by id or by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Id(ResourceTypeId),
    Name(String),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<ResourceTypeId> for TypeRef {
    fn from(id: ResourceTypeId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Maps type ids and names to their handlers.
///
/// Both indexes always hold the same set of handlers. Registration is open:
/// configuration can add types at any time before the registry is shared.
#[derive(Default)]
pub struct ResourceTypeRegistry {
    by_id: BTreeMap<ResourceTypeId, Arc<dyn ResourceTypeHandler>>,
    by_name: HashMap<String, Arc<dyn ResourceTypeHandler>>,
}

impl ResourceTypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in types.
    pub fn with_default_types() -> Self {
        let mut registry = Self::new();
        for handler in default_types() {
            registry
                .register_type(handler)
                .expect("built-in resource types are distinct");
        }
        registry
    }

    /// Register a handler under its id and name.
    ///
    /// Fails without changing the registry if either is already taken.
    pub fn register_type(&mut self, handler: Arc<dyn ResourceTypeHandler>) -> ResourceTypeResult<()> {
        let id = handler.type_id();
        let name = handler.name().to_string();
        if self.by_id.contains_key(&id) {
            return Err(ResourceTypeError::DuplicateResourceType(format!("id {id}")));
        }
        if self.by_name.contains_key(&name) {
            return Err(ResourceTypeError::DuplicateResourceType(format!("name {name}")));
        }
        debug!(type_id = %id, type_name = %name, loader_id = handler.loader_id(), "registered resource type");
        self.by_id.insert(id, Arc::clone(&handler));
        self.by_name.insert(name, handler);
        Ok(())
    }

    /// Look up a handler by id or name.
    pub fn handler_for(&self, type_ref: impl Into<TypeRef>) -> ResourceTypeResult<Arc<dyn ResourceTypeHandler>> {
        match type_ref.into() {
            TypeRef::Id(id) => self.handler_by_id(id),
            TypeRef::Name(name) => self.handler_by_name(&name),
        }
    }

    pub fn handler_by_id(&self, id: ResourceTypeId) -> ResourceTypeResult<Arc<dyn ResourceTypeHandler>> {
        self.by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| ResourceTypeError::UnknownResourceType(id.to_string()))
    }

    pub fn handler_by_name(&self, name: &str) -> ResourceTypeResult<Arc<dyn ResourceTypeHandler>> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceTypeError::UnknownResourceType(name.to_string()))
    }

    /// The handler responsible for an existing resource.
    pub fn handler_for_resource(&self, resource: &Resource) -> ResourceTypeResult<Arc<dyn ResourceTypeHandler>> {
        self.handler_by_id(resource.type_id())
    }

    /// Dispatch a create to the handler for `type_ref`.
    pub fn create(
        &self,
        type_ref: impl Into<TypeRef>,
        request: CreateRequest,
    ) -> ResourceTypeResult<NewResource> {
        self.handler_for(type_ref)?.create(request)
    }

    /// Registered type names, ordered by type id.
    pub fn type_names(&self) -> Vec<String> {
        self.by_id.values().map(|h| h.name().to_string()).collect()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl fmt::Debug for ResourceTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceTypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
