use serde::{Deserialize, Serialize};

use arbor_types::{
    PrincipalId, ProjectId, ResourceFlags, ResourceId, ResourceState, ResourceTypeId,
    StructureId, Timestamp,
};

use crate::error::ModelResult;
use crate::resource::{Resource, ResourceKind};

/// Staging area for a [`Resource`].
///
/// Setters store values without checking them. [`ResourceBuilder::build`]
/// runs every invariant check at once and either returns a complete resource
/// or a single error; it never mutates the builder, so it can be called again
/// to produce independent resources.
///
/// Defaults: fresh structure and resource ids, a file of type 0 in state
/// `New`, one sibling, an open release window, version 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBuilder {
    pub(crate) structure_id: StructureId,
    pub(crate) resource_id: ResourceId,
    #[serde(default = "StructureId::nil")]
    pub(crate) parent_structure_id: StructureId,
    pub(crate) root_path: String,
    #[serde(default = "default_type_id")]
    pub(crate) type_id: ResourceTypeId,
    #[serde(default)]
    pub(crate) flags: ResourceFlags,
    pub(crate) kind: ResourceKind,
    #[serde(default = "ProjectId::nil")]
    pub(crate) project_last_modified: ProjectId,
    #[serde(default)]
    pub(crate) state: ResourceState,
    #[serde(default)]
    pub(crate) date_created: Timestamp,
    #[serde(default = "PrincipalId::nil")]
    pub(crate) user_created: PrincipalId,
    #[serde(default)]
    pub(crate) date_last_modified: Timestamp,
    #[serde(default = "PrincipalId::nil")]
    pub(crate) user_last_modified: PrincipalId,
    #[serde(default)]
    pub(crate) date_released: Timestamp,
    #[serde(default = "default_date_expired")]
    pub(crate) date_expired: Timestamp,
    #[serde(default = "default_sibling_count")]
    pub(crate) sibling_count: u32,
    #[serde(default)]
    pub(crate) length: u64,
    #[serde(default)]
    pub(crate) date_content: Timestamp,
    #[serde(default)]
    pub(crate) version: u32,
}

// Serialized records must carry both ids, the path and the kind. Missing
// optional fields fall back to nil principals and an open release window.
fn default_type_id() -> ResourceTypeId {
    ResourceTypeId(0)
}

fn default_date_expired() -> Timestamp {
    Timestamp::MAX
}

fn default_sibling_count() -> u32 {
    1
}

impl ResourceBuilder {
    pub fn new() -> Self {
        Self {
            structure_id: StructureId::new(),
            resource_id: ResourceId::new(),
            parent_structure_id: StructureId::nil(),
            root_path: String::new(),
            type_id: ResourceTypeId(0),
            flags: ResourceFlags::empty(),
            kind: ResourceKind::File,
            project_last_modified: ProjectId::nil(),
            state: ResourceState::New,
            date_created: Timestamp::UNSET,
            user_created: PrincipalId::nil(),
            date_last_modified: Timestamp::UNSET,
            user_last_modified: PrincipalId::nil(),
            date_released: Timestamp::UNSET,
            date_expired: Timestamp::MAX,
            sibling_count: 1,
            length: 0,
            date_content: Timestamp::UNSET,
            version: 0,
        }
    }

    /// Seed a builder with every field of an existing resource.
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            structure_id: resource.structure_id,
            resource_id: resource.resource_id,
            parent_structure_id: resource.parent_structure_id,
            root_path: resource.root_path.clone(),
            type_id: resource.type_id,
            flags: resource.flags,
            kind: resource.kind,
            project_last_modified: resource.project_last_modified,
            state: resource.state,
            date_created: resource.date_created,
            user_created: resource.user_created,
            date_last_modified: resource.date_last_modified,
            user_last_modified: resource.user_last_modified,
            date_released: resource.release.released,
            date_expired: resource.release.expired,
            sibling_count: resource.sibling_count,
            length: resource.length,
            date_content: resource.date_content,
            version: resource.version,
        }
    }

    pub fn structure_id(&mut self, id: StructureId) -> &mut Self {
        self.structure_id = id;
        self
    }

    pub fn resource_id(&mut self, id: ResourceId) -> &mut Self {
        self.resource_id = id;
        self
    }

    pub fn parent_structure_id(&mut self, id: StructureId) -> &mut Self {
        self.parent_structure_id = id;
        self
    }

    pub fn root_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.root_path = path.into();
        self
    }

    pub fn type_id(&mut self, type_id: ResourceTypeId) -> &mut Self {
        self.type_id = type_id;
        self
    }

    pub fn flags(&mut self, flags: ResourceFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn kind(&mut self, kind: ResourceKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn project_last_modified(&mut self, project: ProjectId) -> &mut Self {
        self.project_last_modified = project;
        self
    }

    pub fn state(&mut self, state: ResourceState) -> &mut Self {
        self.state = state;
        self
    }

    pub fn date_created(&mut self, date: Timestamp) -> &mut Self {
        self.date_created = date;
        self
    }

    pub fn user_created(&mut self, user: PrincipalId) -> &mut Self {
        self.user_created = user;
        self
    }

    pub fn date_last_modified(&mut self, date: Timestamp) -> &mut Self {
        self.date_last_modified = date;
        self
    }

    pub fn user_last_modified(&mut self, user: PrincipalId) -> &mut Self {
        self.user_last_modified = user;
        self
    }

    pub fn date_released(&mut self, date: Timestamp) -> &mut Self {
        self.date_released = date;
        self
    }

    pub fn date_expired(&mut self, date: Timestamp) -> &mut Self {
        self.date_expired = date;
        self
    }

    pub fn sibling_count(&mut self, count: u32) -> &mut Self {
        self.sibling_count = count;
        self
    }

    pub fn length(&mut self, length: u64) -> &mut Self {
        self.length = length;
        self
    }

    pub fn date_content(&mut self, date: Timestamp) -> &mut Self {
        self.date_content = date;
        self
    }

    pub fn version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    /// Assemble a resource from the staged values.
    pub fn build(&self) -> ModelResult<Resource> {
        Resource::from_builder(self)
    }
}

impl Default for ResourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Resource> for ResourceBuilder {
    fn from(resource: Resource) -> Self {
        Self::from_resource(&resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use proptest::prelude::*;

    #[test]
    fn build_does_not_consume_or_mutate() {
        let mut builder = ResourceBuilder::new();
        builder.root_path("/a.html").length(3);
        let snapshot = builder.clone();

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(builder, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_builds_are_independent() {
        let mut builder = ResourceBuilder::new();
        builder.root_path("/a.html");
        let mut first = builder.build().unwrap();
        let second = builder.build().unwrap();
        first.set_state(ResourceState::Deleted);
        assert_eq!(second.state(), ResourceState::New);
    }

    #[test]
    fn setters_do_not_validate() {
        let mut builder = ResourceBuilder::new();
        builder.root_path("relative").sibling_count(0);
        // Only build() rejects.
        let err = builder.build().unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter(_)));
    }

    #[test]
    fn from_resource_roundtrip() {
        let original = ResourceBuilder::new()
            .root_path("/docs/")
            .kind(ResourceKind::Folder)
            .state(ResourceState::Unchanged)
            .version(3)
            .build()
            .unwrap();
        let rebuilt = ResourceBuilder::from_resource(&original).build().unwrap();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn deserializing_requires_identity_and_kind() {
        let original = ResourceBuilder::new()
            .root_path("/docs/")
            .kind(ResourceKind::Folder)
            .build()
            .unwrap();
        let full = serde_json::to_value(&original).unwrap();

        for required in ["resource_id", "structure_id", "root_path", "kind"] {
            let mut value = full.clone();
            value.as_object_mut().unwrap().remove(required);
            assert!(
                serde_json::from_value::<Resource>(value).is_err(),
                "record without {required} must be rejected"
            );
        }
    }

    #[test]
    fn deserializing_fills_optional_fields() {
        let id = ResourceId::new();
        let structure = StructureId::new();
        let value = serde_json::json!({
            "structure_id": structure,
            "resource_id": id,
            "root_path": "/a.html",
            "kind": "File",
        });
        let parsed: Resource = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.resource_id(), id);
        assert_eq!(parsed.structure_id(), structure);
        assert!(parsed.user_created().is_nil());
        assert!(parsed.project_last_modified().is_nil());
        assert_eq!(parsed.date_expired(), Timestamp::MAX);
        assert_eq!(parsed.sibling_count(), 1);
    }

    #[test]
    fn missing_path_rejected() {
        assert!(ResourceBuilder::new().build().is_err());
    }

    proptest! {
        #[test]
        fn built_folders_always_have_zero_length(name in "[a-z]{1,12}") {
            let folder = ResourceBuilder::new()
                .root_path(format!("/{name}"))
                .kind(ResourceKind::Folder)
                .build()
                .unwrap();
            prop_assert_eq!(folder.length(), 0);
            prop_assert!(folder.root_path().ends_with('/'));
            prop_assert_eq!(folder.name(), name.as_str());
        }

        #[test]
        fn bump_is_monotonic(start in 0u32..1000, bumps in 0usize..20) {
            let mut r = ResourceBuilder::new()
                .root_path("/a.html")
                .version(start)
                .build()
                .unwrap();
            let mut last = r.version();
            for _ in 0..bumps {
                let next = r.bump_version();
                prop_assert!(next > last);
                last = next;
            }
        }
    }
}
