//! Point-in-time snapshots of resources.
//!
//! A [`BackupResource`] freezes a resource, a private copy of its content,
//! and the display names of the principals it references. Principals may be
//! deleted later; the names captured here are never refreshed, so a backup
//! stays readable forever.

use serde::{Deserialize, Serialize};
use tracing::debug;

use arbor_types::{BackupId, ContentDigest, PrincipalId, ResourceId};

use crate::error::{ModelError, ModelResult};
use crate::file::File;
use crate::resource::Resource;

/// Resolves principal ids to display names.
///
/// Never fails: deleted principals resolve to a stable placeholder chosen by
/// the implementation.
pub trait PrincipalResolver {
    fn resolve_display_name(&self, principal: &PrincipalId) -> String;
}

/// Reads the content buffer of a resource record.
pub trait ContentSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `Ok(None)` if no content is stored for `resource_id`.
    fn read_content(&self, resource_id: &ResourceId) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// Display names captured for the principals a resource references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalNames {
    pub created_by: String,
    pub last_modified_by: String,
}

impl PrincipalNames {
    /// Look up the names of the creating and last modifying users.
    pub fn resolve<R>(resource: &Resource, resolver: &R) -> Self
    where
        R: PrincipalResolver + ?Sized,
    {
        Self {
            created_by: resolver.resolve_display_name(&resource.user_created()),
            last_modified_by: resolver.resolve_display_name(&resource.user_last_modified()),
        }
    }
}

/// Identity of a backup record, supplied by the publish orchestrator.
///
/// Uniqueness and monotonicity of the tag and version are the caller's
/// responsibility; they are stored as given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackupStamp {
    pub backup_id: BackupId,
    /// Groups every resource frozen by the same publish operation.
    pub tag_id: u32,
    /// The project version counter this backup belongs to.
    pub version_id: u32,
}

impl BackupStamp {
    /// A stamp with a fresh backup id.
    pub fn new(tag_id: u32, version_id: u32) -> Self {
        Self {
            backup_id: BackupId::new(),
            tag_id,
            version_id,
        }
    }
}

/// An immutable snapshot of a resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupResource {
    resource: Resource,
    contents: Option<Vec<u8>>,
    digest: ContentDigest,
    stamp: BackupStamp,
    names: PrincipalNames,
}

impl BackupResource {
    /// Freeze `resource`, reading a file's content from `source`.
    ///
    /// Folders never touch `source`. For a file, missing content fails with
    /// [`ModelError::ContentNotFound`] and a source failure is wrapped with
    /// the resource path; in both cases no snapshot is produced.
    pub fn snapshot<S>(
        resource: &Resource,
        source: &S,
        names: PrincipalNames,
        stamp: BackupStamp,
    ) -> ModelResult<Self>
    where
        S: ContentSource + ?Sized,
    {
        let contents = if resource.is_folder() {
            None
        } else {
            let bytes = source
                .read_content(&resource.resource_id())
                .map_err(|e| ModelError::collaborator("read content", resource.root_path(), e))?
                .ok_or_else(|| ModelError::ContentNotFound {
                    resource_id: resource.resource_id(),
                    path: resource.root_path().to_string(),
                })?;
            Some(bytes)
        };
        Ok(Self::assemble(resource.clone(), contents, names, stamp))
    }

    /// Freeze a file whose content is already in hand.
    pub fn from_file(file: &File, names: PrincipalNames, stamp: BackupStamp) -> Self {
        Self::assemble(
            file.resource().clone(),
            Some(file.contents().to_vec()),
            names,
            stamp,
        )
    }

    fn assemble(
        resource: Resource,
        contents: Option<Vec<u8>>,
        names: PrincipalNames,
        stamp: BackupStamp,
    ) -> Self {
        let digest = contents
            .as_deref()
            .map(ContentDigest::of)
            .unwrap_or_else(ContentDigest::none);
        debug!(
            path = resource.root_path(),
            backup = %stamp.backup_id.short_id(),
            tag = stamp.tag_id,
            version = stamp.version_id,
            digest = %digest.short_hex(),
            "resource frozen"
        );
        Self {
            resource,
            contents,
            digest,
            stamp,
            names,
        }
    }

    /// The frozen resource. Every scalar field is as it was at snapshot time.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// The frozen content. `None` for folders.
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Returns `true` if the stored buffer still matches the recorded digest.
    pub fn verify_contents(&self) -> bool {
        match &self.contents {
            Some(bytes) => ContentDigest::of(bytes) == self.digest,
            None => self.digest.is_none(),
        }
    }

    pub fn stamp(&self) -> BackupStamp {
        self.stamp
    }

    pub fn backup_id(&self) -> BackupId {
        self.stamp.backup_id
    }

    pub fn tag_id(&self) -> u32 {
        self.stamp.tag_id
    }

    pub fn version_id(&self) -> u32 {
        self.stamp.version_id
    }

    pub fn created_by_name(&self) -> &str {
        &self.names.created_by
    }

    pub fn last_modified_by_name(&self) -> &str {
        &self.names.last_modified_by
    }

    /// A fresh live copy of the frozen resource.
    pub fn restore_resource(&self) -> Resource {
        self.resource.clone()
    }

    /// A fresh live file with its own copy of the frozen content. `None` for
    /// folders.
    pub fn restore_file(&self) -> Option<File> {
        let contents = self.contents.clone()?;
        File::with_contents(self.resource.clone(), contents).ok()
    }
}

/// A resource as seen by readers that handle both live and historical views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VersionedResource {
    Live(Resource),
    Backup(BackupResource),
}

impl VersionedResource {
    pub fn resource(&self) -> &Resource {
        match self {
            Self::Live(resource) => resource,
            Self::Backup(backup) => backup.resource(),
        }
    }

    pub fn is_backup(&self) -> bool {
        matches!(self, Self::Backup(_))
    }

    /// The backup id, for snapshots.
    pub fn backup_id(&self) -> Option<BackupId> {
        match self {
            Self::Live(_) => None,
            Self::Backup(backup) => Some(backup.backup_id()),
        }
    }
}
