use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use arbor_types::{
    PrincipalId, ProjectId, ReleaseWindow, ResourceFlags, ResourceId, ResourceState,
    ResourceTypeId, StructureId, Timestamp,
};

use crate::builder::ResourceBuilder;
use crate::error::{ModelError, ModelResult};
use crate::path;

/// Whether a resource is a folder or a file. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceKind {
    Folder,
    #[default]
    File,
}

impl ResourceKind {
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// A resource in the tree: structural and content metadata, without content
/// bytes.
///
/// A `Resource` is only obtained through [`ResourceBuilder::build`] (or by
/// deserializing, which runs the same checks), so every instance satisfies:
///
/// - the root path is absolute; folder paths end with `/`, file paths do not
/// - a folder has length 0
/// - `sibling_count >= 1`
/// - the release window is well formed
/// - `version` never decreases
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ResourceBuilder", try_from = "ResourceBuilder")]
pub struct Resource {
    pub(crate) structure_id: StructureId,
    pub(crate) resource_id: ResourceId,
    pub(crate) parent_structure_id: StructureId,
    pub(crate) root_path: String,
    pub(crate) name: String,
    pub(crate) type_id: ResourceTypeId,
    pub(crate) flags: ResourceFlags,
    pub(crate) kind: ResourceKind,
    pub(crate) project_last_modified: ProjectId,
    pub(crate) state: ResourceState,
    pub(crate) date_created: Timestamp,
    pub(crate) user_created: PrincipalId,
    pub(crate) date_last_modified: Timestamp,
    pub(crate) user_last_modified: PrincipalId,
    pub(crate) release: ReleaseWindow,
    pub(crate) sibling_count: u32,
    pub(crate) length: u64,
    pub(crate) date_content: Timestamp,
    pub(crate) version: u32,
}

impl Resource {
    /// Validate builder values and assemble a resource.
    pub(crate) fn from_builder(b: &ResourceBuilder) -> ModelResult<Self> {
        let root_path = normalize_root_path(&b.root_path, b.kind)?;
        if b.kind.is_folder() && b.length != 0 {
            return Err(ModelError::invalid(format!(
                "folder {root_path} cannot have length {}",
                b.length
            )));
        }
        if b.sibling_count == 0 {
            return Err(ModelError::invalid(format!(
                "sibling count of {root_path} must be at least 1"
            )));
        }
        let release = ReleaseWindow::new(b.date_released, b.date_expired);
        check_release_window(&root_path, &release)?;

        Ok(Self {
            structure_id: b.structure_id,
            resource_id: b.resource_id,
            parent_structure_id: b.parent_structure_id,
            name: path::name_of(&root_path).to_string(),
            root_path,
            type_id: b.type_id,
            flags: b.flags,
            kind: b.kind,
            project_last_modified: b.project_last_modified,
            state: b.state,
            date_created: b.date_created,
            user_created: b.user_created,
            date_last_modified: b.date_last_modified,
            user_last_modified: b.user_last_modified,
            release,
            sibling_count: b.sibling_count,
            length: b.length,
            date_content: b.date_content,
            version: b.version,
        })
    }

    // -----------------------------------------------------------------------
    // Identity and structure
    // -----------------------------------------------------------------------

    pub fn structure_id(&self) -> StructureId {
        self.structure_id
    }

    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    pub fn parent_structure_id(&self) -> StructureId {
        self.parent_structure_id
    }

    /// Full path of this resource in the tree.
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Last segment of the root path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the folder containing this resource, or `None` for the root.
    pub fn parent_folder_path(&self) -> Option<&str> {
        path::parent_folder(&self.root_path)
    }

    pub fn type_id(&self) -> ResourceTypeId {
        self.type_id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    pub fn is_file(&self) -> bool {
        !self.is_folder()
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    pub fn flags(&self) -> ResourceFlags {
        self.flags
    }

    pub fn is_labeled(&self) -> bool {
        self.flags.contains(ResourceFlags::LABELED)
    }

    pub fn is_internal(&self) -> bool {
        self.flags.contains(ResourceFlags::INTERNAL)
    }

    /// Temporary if the temp-file flag is set or the name follows the default
    /// `~` prefix convention.
    pub fn is_temporary_file(&self) -> bool {
        self.is_temporary_file_with(path::is_temporary_file_name)
    }

    /// Temporary if the temp-file flag is set or `naming` accepts the name.
    pub fn is_temporary_file_with(&self, naming: impl Fn(&str) -> bool) -> bool {
        self.flags.contains(ResourceFlags::TEMPFILE) || naming(&self.name)
    }

    // -----------------------------------------------------------------------
    // State, dates, principals
    // -----------------------------------------------------------------------

    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn project_last_modified(&self) -> ProjectId {
        self.project_last_modified
    }

    pub fn date_created(&self) -> Timestamp {
        self.date_created
    }

    pub fn user_created(&self) -> PrincipalId {
        self.user_created
    }

    pub fn date_last_modified(&self) -> Timestamp {
        self.date_last_modified
    }

    pub fn user_last_modified(&self) -> PrincipalId {
        self.user_last_modified
    }

    pub fn date_released(&self) -> Timestamp {
        self.release.released
    }

    pub fn date_expired(&self) -> Timestamp {
        self.release.expired
    }

    pub fn release_window(&self) -> ReleaseWindow {
        self.release
    }

    pub fn is_released(&self, now: Timestamp) -> bool {
        self.release.is_released(now)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.release.is_expired(now)
    }

    pub fn is_released_and_not_expired(&self, now: Timestamp) -> bool {
        self.release.contains(now)
    }

    /// Last modification of the content bytes, distinct from metadata changes.
    pub fn date_content(&self) -> Timestamp {
        self.date_content
    }

    // -----------------------------------------------------------------------
    // Siblings, length, version
    // -----------------------------------------------------------------------

    pub fn sibling_count(&self) -> u32 {
        self.sibling_count
    }

    /// Returns `true` if other links share this resource's content record.
    pub fn has_siblings(&self) -> bool {
        self.sibling_count > 1
    }

    /// Returns `true` if `other` is a link to the same content record.
    pub fn is_sibling_of(&self, other: &Resource) -> bool {
        self.resource_id == other.resource_id && self.structure_id != other.structure_id
    }

    /// Content length in bytes. Always 0 for folders.
    pub fn length(&self) -> u64 {
        if self.is_folder() {
            0
        } else {
            self.length
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    // -----------------------------------------------------------------------
    // Caller-driven mutation
    // -----------------------------------------------------------------------

    pub fn set_state(&mut self, state: ResourceState) {
        self.state = state;
    }

    pub fn set_flags(&mut self, flags: ResourceFlags) {
        self.flags = flags;
    }

    pub fn set_type_id(&mut self, type_id: ResourceTypeId) {
        self.type_id = type_id;
    }

    pub fn set_project_last_modified(&mut self, project: ProjectId) {
        self.project_last_modified = project;
    }

    pub fn set_date_last_modified(&mut self, date: Timestamp) {
        self.date_last_modified = date;
    }

    pub fn set_user_last_modified(&mut self, user: PrincipalId) {
        self.user_last_modified = user;
    }

    /// Replace the release window. Rejected if the window is out of order.
    pub fn set_release_window(&mut self, release: ReleaseWindow) -> ModelResult<()> {
        check_release_window(&self.root_path, &release)?;
        self.release = release;
        Ok(())
    }

    pub fn set_date_released(&mut self, date: Timestamp) -> ModelResult<()> {
        self.set_release_window(ReleaseWindow::new(date, self.release.expired))
    }

    pub fn set_date_expired(&mut self, date: Timestamp) -> ModelResult<()> {
        self.set_release_window(ReleaseWindow::new(self.release.released, date))
    }

    pub fn set_sibling_count(&mut self, count: u32) -> ModelResult<()> {
        if count == 0 {
            return Err(ModelError::invalid(format!(
                "sibling count of {} must be at least 1",
                self.root_path
            )));
        }
        self.sibling_count = count;
        Ok(())
    }

    /// Increment the version after a structural write.
    pub fn bump_version(&mut self) -> u32 {
        self.version = self.version.saturating_add(1);
        self.version
    }

    /// Set the version explicitly. A lower value than the current one is rejected.
    pub fn set_version(&mut self, version: u32) -> ModelResult<()> {
        if version < self.version {
            return Err(ModelError::invalid(format!(
                "version of {} cannot decrease from {} to {version}",
                self.root_path, self.version
            )));
        }
        self.version = version;
        Ok(())
    }

    /// Move this link to a new path below a new parent. The folder/file kind
    /// is kept, and the path is checked against it.
    pub fn move_to(
        &mut self,
        new_root_path: &str,
        new_parent: StructureId,
    ) -> ModelResult<()> {
        let root_path = normalize_root_path(new_root_path, self.kind)?;
        self.name = path::name_of(&root_path).to_string();
        self.root_path = root_path;
        self.parent_structure_id = new_parent;
        Ok(())
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("root_path", &self.root_path)
            .field("structure_id", &self.structure_id)
            .field("resource_id", &self.resource_id)
            .field("type_id", &self.type_id)
            .field("state", &self.state)
            .field("version", &self.version)
            .finish()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.root_path, self.structure_id.short_id())
    }
}

impl TryFrom<ResourceBuilder> for Resource {
    type Error = ModelError;

    fn try_from(builder: ResourceBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Order by root path, ascending.
pub fn compare_root_path(a: &Resource, b: &Resource) -> Ordering {
    a.root_path.cmp(&b.root_path)
}

/// Order by release date, ascending. Unset release dates sort first.
pub fn compare_date_released(a: &Resource, b: &Resource) -> Ordering {
    a.release.released.cmp(&b.release.released)
}

/// Order by last modification date, ascending.
pub fn compare_date_last_modified(a: &Resource, b: &Resource) -> Ordering {
    a.date_last_modified.cmp(&b.date_last_modified)
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn normalize_root_path(raw: &str, kind: ResourceKind) -> ModelResult<String> {
    if !raw.starts_with('/') {
        return Err(ModelError::invalid(format!(
            "root path must be absolute: {raw:?}"
        )));
    }
    if raw.contains("//") {
        return Err(ModelError::invalid(format!(
            "root path contains an empty segment: {raw:?}"
        )));
    }
    match kind {
        ResourceKind::Folder => Ok(path::as_folder_path(raw)),
        ResourceKind::File if raw.ends_with('/') => Err(ModelError::invalid(format!(
            "file path cannot end with '/': {raw:?}"
        ))),
        ResourceKind::File => Ok(raw.to_string()),
    }
}

fn check_release_window(root_path: &str, release: &ReleaseWindow) -> ModelResult<()> {
    if release.is_well_formed() {
        Ok(())
    } else {
        Err(ModelError::invalid(format!(
            "release date {} of {root_path} is after expiry date {}",
            release.released, release.expired
        )))
    }
}
