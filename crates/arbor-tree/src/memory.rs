use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use tracing::debug;

use arbor_model::{path, ContentSource, File, PropertyDefinition, Resource};
use arbor_types::{ResourceId, StructureId};

use crate::error::{TreeError, TreeResult};
use crate::filter::ResourceFilter;
use crate::traits::TreeReader;

#[derive(Default)]
struct TreeState {
    /// Resources keyed by structure id.
    resources: HashMap<StructureId, Resource>,
    /// Root path index, kept sorted so listings come out in path order.
    paths: BTreeMap<String, StructureId>,
    /// Content buffers keyed by resource id, shared by siblings.
    contents: HashMap<ResourceId, Vec<u8>>,
    /// Property definitions keyed by resource type name.
    definitions: HashMap<String, Vec<PropertyDefinition>>,
}

/// In-memory resource tree.
///
/// Intended for tests and embedding. All state is held behind a `RwLock`;
/// resources and buffers are cloned on read and write, so callers never
/// alias stored data. Every [`TreeReader`] call increments a read counter.
pub struct InMemoryTree {
    state: RwLock<TreeState>,
    reads: AtomicUsize,
}

impl InMemoryTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TreeState::default()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Add a resource. Fails if its path or structure id is already taken.
    pub fn insert(&self, resource: Resource) -> TreeResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        if state.paths.contains_key(resource.root_path()) {
            return Err(TreeError::AlreadyExists(resource.root_path().to_string()));
        }
        if state.resources.contains_key(&resource.structure_id()) {
            return Err(TreeError::AlreadyExists(resource.structure_id().to_string()));
        }
        state
            .paths
            .insert(resource.root_path().to_string(), resource.structure_id());
        state.resources.insert(resource.structure_id(), resource);
        Ok(())
    }

    /// Add a file resource together with its content.
    pub fn insert_file(&self, file: &File) -> TreeResult<()> {
        self.insert(file.resource().clone())?;
        self.write_content(file.resource().resource_id(), file.contents().to_vec());
        Ok(())
    }

    /// Store the content buffer of a resource record.
    pub fn write_content(&self, resource_id: ResourceId, contents: Vec<u8>) {
        let mut state = self.state.write().expect("lock poisoned");
        state.contents.insert(resource_id, contents);
    }

    /// Remove the resource at `path`. Returns `true` if it existed.
    ///
    /// The content record is dropped once the last sibling is gone.
    pub fn remove(&self, path: &str) -> bool {
        let mut state = self.state.write().expect("lock poisoned");
        let Some(structure_id) = state.paths.remove(path) else {
            return false;
        };
        if let Some(removed) = state.resources.remove(&structure_id) {
            let resource_id = removed.resource_id();
            if !state.resources.values().any(|r| r.resource_id() == resource_id) {
                state.contents.remove(&resource_id);
            }
        }
        true
    }

    /// Register a property definition for a resource type. Names are unique
    /// per type.
    pub fn add_property_definition(
        &self,
        type_name: &str,
        definition: PropertyDefinition,
    ) -> TreeResult<()> {
        let mut state = self.state.write().expect("lock poisoned");
        let scope = state.definitions.entry(type_name.to_string()).or_default();
        if scope.iter().any(|d| d.name() == definition.name()) {
            return Err(TreeError::AlreadyExists(format!(
                "property definition {} for type {type_name}",
                definition.name()
            )));
        }
        scope.push(definition);
        Ok(())
    }

    /// Read the resource with the given structure id.
    pub fn read_by_structure_id(&self, id: &StructureId) -> Option<Resource> {
        let state = self.state.read().expect("lock poisoned");
        state.resources.get(id).cloned()
    }

    /// All resources sharing the content record `resource_id`, in path order.
    pub fn siblings(&self, resource_id: &ResourceId) -> Vec<Resource> {
        let state = self.state.read().expect("lock poisoned");
        state
            .paths
            .values()
            .filter_map(|id| state.resources.get(id))
            .filter(|r| r.resource_id() == *resource_id)
            .cloned()
            .collect()
    }

    /// Number of resources in the tree.
    pub fn len(&self) -> usize {
        self.state.read().expect("lock poisoned").resources.len()
    }

    /// Returns `true` if the tree holds no resources.
    pub fn is_empty(&self) -> bool {
        self.state.read().expect("lock poisoned").resources.is_empty()
    }

    /// Sorted list of every root path.
    pub fn all_paths(&self) -> Vec<String> {
        let state = self.state.read().expect("lock poisoned");
        state.paths.keys().cloned().collect()
    }

    /// Number of [`TreeReader`] calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Remove everything.
    pub fn clear(&self) {
        let mut state = self.state.write().expect("lock poisoned");
        *state = TreeState::default();
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for InMemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeReader for InMemoryTree {
    fn read_resources(
        &self,
        folder_path: &str,
        filter: &ResourceFilter,
        recursive: bool,
    ) -> TreeResult<Vec<Resource>> {
        self.count_read();
        if !folder_path.starts_with('/') {
            return Err(TreeError::InvalidPath(folder_path.to_string()));
        }
        let folder = path::as_folder_path(folder_path);
        let state = self.state.read().expect("lock poisoned");
        if folder != "/" && !state.paths.contains_key(&folder) {
            return Err(TreeError::NotFound(folder));
        }

        let result: Vec<Resource> = state
            .paths
            .range(folder.clone()..)
            .take_while(|(p, _)| p.starts_with(&folder))
            .filter(|(p, _)| {
                if recursive {
                    path::is_below(p, &folder)
                } else {
                    path::is_direct_child(p, &folder)
                }
            })
            .filter_map(|(_, id)| state.resources.get(id))
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        debug!(folder = %folder, recursive, count = result.len(), "read resources");
        Ok(result)
    }

    fn read_single(&self, path: &str) -> TreeResult<Resource> {
        self.count_read();
        let state = self.state.read().expect("lock poisoned");
        state
            .paths
            .get(path)
            .and_then(|id| state.resources.get(id))
            .cloned()
            .ok_or_else(|| TreeError::NotFound(path.to_string()))
    }

    fn read_all_property_definitions(&self, type_name: &str) -> TreeResult<Vec<PropertyDefinition>> {
        self.count_read();
        let state = self.state.read().expect("lock poisoned");
        Ok(state.definitions.get(type_name).cloned().unwrap_or_default())
    }
}

impl ContentSource for InMemoryTree {
    type Error = TreeError;

    fn read_content(&self, resource_id: &ResourceId) -> TreeResult<Option<Vec<u8>>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.contents.get(resource_id).cloned())
    }
}

impl std::fmt::Debug for InMemoryTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTree")
            .field("resource_count", &self.len())
            .field("reads", &self.read_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{
        BackupResource, BackupStamp, MappingType, ModelError, PrincipalNames, ResourceBuilder,
        ResourceKind,
    };
    use arbor_types::{PropertyDefinitionId, ResourceState, ResourceTypeId};

    fn folder(path: &str) -> Resource {
        ResourceBuilder::new()
            .root_path(path)
            .kind(ResourceKind::Folder)
            .build()
            .unwrap()
    }

    fn file(path: &str, type_id: u32) -> Resource {
        ResourceBuilder::new()
            .root_path(path)
            .type_id(ResourceTypeId(type_id))
            .build()
            .unwrap()
    }

    fn sample_tree() -> InMemoryTree {
        let tree = InMemoryTree::new();
        tree.insert(folder("/sites/")).unwrap();
        tree.insert(folder("/sites/default/")).unwrap();
        tree.insert(file("/sites/default/a.html", 4)).unwrap();
        tree.insert(file("/sites/default/b.html", 4)).unwrap();
        tree.insert(file("/sites/default/c.txt", 1)).unwrap();
        tree.insert(folder("/sites/default/news/")).unwrap();
        tree.insert(file("/sites/default/news/d.html", 4)).unwrap();
        tree.insert(file("/sites/defaultish.html", 4)).unwrap();
        tree
    }

    fn paths(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.root_path()).collect()
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[test]
    fn direct_children_in_path_order() {
        let tree = sample_tree();
        let result = tree
            .read_resources("/sites/default/", &ResourceFilter::default(), false)
            .unwrap();
        assert_eq!(
            paths(&result),
            [
                "/sites/default/a.html",
                "/sites/default/b.html",
                "/sites/default/c.txt",
                "/sites/default/news/",
            ]
        );
    }

    #[test]
    fn subtree_with_type_filter() {
        let tree = sample_tree();
        let filter = ResourceFilter::default().with_type(ResourceTypeId(4));
        let result = tree.read_resources("/sites/default", &filter, true).unwrap();
        assert_eq!(
            paths(&result),
            [
                "/sites/default/a.html",
                "/sites/default/b.html",
                "/sites/default/news/d.html",
            ]
        );
    }

    #[test]
    fn root_folder_listing() {
        let tree = sample_tree();
        let result = tree
            .read_resources("/", &ResourceFilter::default(), false)
            .unwrap();
        assert_eq!(paths(&result), ["/sites/"]);
    }

    #[test]
    fn missing_folder_is_not_found() {
        let tree = sample_tree();
        let err = tree
            .read_resources("/nowhere/", &ResourceFilter::default(), false)
            .unwrap_err();
        assert!(matches!(err, TreeError::NotFound(_)));
    }

    #[test]
    fn relative_folder_is_invalid() {
        let tree = sample_tree();
        let err = tree
            .read_resources("sites/", &ResourceFilter::default(), false)
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath(_)));
    }

    #[test]
    fn deleted_resources_hidden_by_default() {
        let tree = InMemoryTree::new();
        tree.insert(folder("/f/")).unwrap();
        let mut gone = file("/f/gone.html", 1);
        gone.set_state(ResourceState::Deleted);
        tree.insert(gone).unwrap();

        let visible = tree.read_resources("/f/", &ResourceFilter::default(), false).unwrap();
        assert!(visible.is_empty());
        let all = tree.read_resources("/f/", &ResourceFilter::all(), false).unwrap();
        assert_eq!(all.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Single reads and mutation
    // -----------------------------------------------------------------------

    #[test]
    fn read_single_and_not_found() {
        let tree = sample_tree();
        assert_eq!(tree.read_single("/sites/default/a.html").unwrap().name(), "a.html");
        assert!(matches!(
            tree.read_single("/sites/default/zzz.html"),
            Err(TreeError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_path_rejected() {
        let tree = sample_tree();
        let err = tree.insert(file("/sites/default/a.html", 4)).unwrap_err();
        assert!(matches!(err, TreeError::AlreadyExists(_)));
    }

    #[test]
    fn reads_return_owned_copies() {
        let tree = sample_tree();
        let mut copy = tree.read_single("/sites/default/a.html").unwrap();
        copy.set_state(ResourceState::Deleted);
        let again = tree.read_single("/sites/default/a.html").unwrap();
        assert_eq!(again.state(), ResourceState::New);
    }

    #[test]
    fn read_counter_tracks_reader_calls() {
        let tree = sample_tree();
        assert_eq!(tree.read_count(), 0);
        let _ = tree.read_single("/sites/");
        let _ = tree.read_resources("/sites/", &ResourceFilter::default(), true);
        assert_eq!(tree.read_count(), 2);
    }

    #[test]
    fn siblings_share_content_until_last_removed() {
        let tree = InMemoryTree::new();
        tree.insert(folder("/f/")).unwrap();
        let original = File::with_contents(file("/f/a.html", 1), b"shared".to_vec()).unwrap();
        tree.insert_file(&original).unwrap();
        let sibling = ResourceBuilder::from_resource(original.resource())
            .structure_id(StructureId::new())
            .root_path("/f/b.html")
            .sibling_count(2)
            .build()
            .unwrap();
        tree.insert(sibling).unwrap();

        let resource_id = original.resource().resource_id();
        assert_eq!(tree.siblings(&resource_id).len(), 2);

        assert!(tree.remove("/f/a.html"));
        assert_eq!(tree.read_content(&resource_id).unwrap(), Some(b"shared".to_vec()));
        assert!(tree.remove("/f/b.html"));
        assert_eq!(tree.read_content(&resource_id).unwrap(), None);
        assert!(!tree.remove("/f/b.html"));
    }

    // -----------------------------------------------------------------------
    // Property definitions
    // -----------------------------------------------------------------------

    #[test]
    fn property_definitions_by_type() {
        let tree = InMemoryTree::new();
        let title = PropertyDefinition::new(PropertyDefinitionId::new(), "Title", MappingType::Structure);
        tree.add_property_definition("plain", title.clone()).unwrap();

        assert_eq!(tree.read_all_property_definitions("plain").unwrap(), vec![title.clone()]);
        assert!(tree.read_all_property_definitions("image").unwrap().is_empty());
        assert_eq!(tree.read_property_definition("plain", "Title").unwrap(), title);
        assert!(tree.read_property_definition("plain", "Keywords").unwrap().is_null());
    }

    #[test]
    fn property_definition_names_unique_per_type() {
        let tree = InMemoryTree::new();
        let first = PropertyDefinition::new(PropertyDefinitionId::new(), "Title", MappingType::Structure);
        let second = PropertyDefinition::new(PropertyDefinitionId::new(), "Title", MappingType::Resource);
        tree.add_property_definition("plain", first).unwrap();
        assert!(tree.add_property_definition("plain", second.clone()).is_err());
        tree.add_property_definition("image", second).unwrap();
    }

    // -----------------------------------------------------------------------
    // Snapshot integration
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_reads_content_from_tree() {
        let tree = InMemoryTree::new();
        tree.insert(folder("/f/")).unwrap();
        let live = File::with_contents(file("/f/a.html", 1), b"v1".to_vec()).unwrap();
        tree.insert_file(&live).unwrap();

        let resource = tree.read_single("/f/a.html").unwrap();
        let backup = BackupResource::snapshot(
            &resource,
            &tree,
            PrincipalNames::default(),
            BackupStamp::new(1, 1),
        )
        .unwrap();

        tree.write_content(resource.resource_id(), b"v2".to_vec());
        assert_eq!(backup.contents(), Some(&b"v1"[..]));
    }

    #[test]
    fn snapshot_without_stored_content_is_not_found() {
        let tree = InMemoryTree::new();
        tree.insert(folder("/f/")).unwrap();
        tree.insert(file("/f/a.html", 1)).unwrap();
        let resource = tree.read_single("/f/a.html").unwrap();
        let err = BackupResource::snapshot(
            &resource,
            &tree,
            PrincipalNames::default(),
            BackupStamp::new(1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::ContentNotFound { .. }));
    }

    #[test]
    fn debug_format() {
        let tree = sample_tree();
        let debug = format!("{tree:?}");
        assert!(debug.contains("InMemoryTree"));
        assert!(debug.contains("resource_count"));
    }
}
