use arbor_model::{PropertyDefinition, Resource};

use crate::error::TreeResult;
use crate::filter::ResourceFilter;

/// Read boundary of the resource tree.
///
/// Implementations must be thread-safe and treat every call as atomic: a call
/// either returns a complete answer or fails. Returned resources are owned
/// copies; callers may mutate them freely.
pub trait TreeReader: Send + Sync {
    /// Read the resources below `folder_path` that pass `filter`.
    ///
    /// With `recursive == false` only direct children are returned, otherwise
    /// the whole subtree. The folder itself is never included. Fails with
    /// `NotFound` if the folder does not exist.
    fn read_resources(
        &self,
        folder_path: &str,
        filter: &ResourceFilter,
        recursive: bool,
    ) -> TreeResult<Vec<Resource>>;

    /// Read exactly one resource. Fails with `NotFound` if the path is absent.
    fn read_single(&self, path: &str) -> TreeResult<Resource>;

    /// All property definitions registered for a resource type.
    fn read_all_property_definitions(&self, type_name: &str) -> TreeResult<Vec<PropertyDefinition>>;

    /// Look up one property definition by name.
    ///
    /// Returns a copy of the null definition if none is registered under
    /// `name` for `type_name`.
    fn read_property_definition(
        &self,
        type_name: &str,
        name: &str,
    ) -> TreeResult<PropertyDefinition> {
        let found = self
            .read_all_property_definitions(type_name)?
            .into_iter()
            .find(|def| def.name() == name);
        Ok(found.unwrap_or_else(|| PropertyDefinition::null().clone()))
    }
}
