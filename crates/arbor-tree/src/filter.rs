use serde::{Deserialize, Serialize};

use arbor_model::Resource;
use arbor_types::{ResourceTypeId, Timestamp};

/// Selects which resources a tree read returns.
///
/// The default filter returns every resource that is not deleted, regardless
/// of type or release window. Restricting by type also excludes folders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    /// Only content resources of this type.
    pub type_id: Option<ResourceTypeId>,
    /// Return resources in state `Deleted`.
    pub include_deleted: bool,
    /// Only resources released and not expired at this instant.
    pub valid_at: Option<Timestamp>,
}

impl ResourceFilter {
    /// Everything, including deleted resources.
    pub fn all() -> Self {
        Self {
            type_id: None,
            include_deleted: true,
            valid_at: None,
        }
    }

    /// Restrict to content resources of `type_id`.
    pub fn with_type(mut self, type_id: ResourceTypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    /// Restrict to resources whose release window contains `now`.
    pub fn valid_at(mut self, now: Timestamp) -> Self {
        self.valid_at = Some(now);
        self
    }

    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }

    /// Returns `true` if `resource` passes every active criterion.
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(type_id) = self.type_id {
            if resource.is_folder() || resource.type_id() != type_id {
                return false;
            }
        }
        if !self.include_deleted && resource.state().is_deleted() {
            return false;
        }
        if let Some(now) = self.valid_at {
            if !resource.is_released_and_not_expired(now) {
                return false;
            }
        }
        true
    }
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self {
            type_id: None,
            include_deleted: false,
            valid_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{ResourceBuilder, ResourceKind};
    use arbor_types::ResourceState;

    fn file(type_id: u32) -> Resource {
        ResourceBuilder::new()
            .root_path("/a/b.html")
            .type_id(ResourceTypeId(type_id))
            .build()
            .unwrap()
    }

    #[test]
    fn type_filter_excludes_folders() {
        let folder = ResourceBuilder::new()
            .root_path("/a/")
            .kind(ResourceKind::Folder)
            .type_id(ResourceTypeId(4))
            .build()
            .unwrap();
        let filter = ResourceFilter::default().with_type(ResourceTypeId(4));
        assert!(!filter.matches(&folder));
        assert!(filter.matches(&file(4)));
        assert!(!filter.matches(&file(1)));
    }

    #[test]
    fn deleted_excluded_by_default() {
        let mut r = file(1);
        r.set_state(ResourceState::Deleted);
        assert!(!ResourceFilter::default().matches(&r));
        assert!(ResourceFilter::all().matches(&r));
    }

    #[test]
    fn validity_window() {
        let mut r = file(1);
        r.set_date_released(Timestamp::from_millis(100)).unwrap();
        let filter = ResourceFilter::default().valid_at(Timestamp::from_millis(50));
        assert!(!filter.matches(&r));
        let filter = ResourceFilter::default().valid_at(Timestamp::from_millis(150));
        assert!(filter.matches(&r));
    }

    #[test]
    fn deserializes_with_defaults() {
        let filter: ResourceFilter = serde_json::from_str(r#"{"type_id": 4}"#).unwrap();
        assert_eq!(filter.type_id, Some(ResourceTypeId(4)));
        assert!(!filter.include_deleted);
    }
}
