use serde::{Deserialize, Serialize};

use arbor_tree::ResourceFilter;
use arbor_types::{ResourceTypeId, Timestamp};

/// Collector configuration.
///
/// Defaults match the tree's default filter: expired resources are listed,
/// deleted ones are not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// List resources outside their release window.
    pub include_expired: bool,
    /// List resources in state `Deleted`.
    pub include_deleted: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            include_expired: true,
            include_deleted: false,
        }
    }
}

impl CollectorConfig {
    /// Only resources that are released and not expired.
    pub fn online() -> Self {
        Self {
            include_expired: false,
            ..Default::default()
        }
    }

    /// The tree filter for a listing of `type_id` evaluated at `now`.
    pub fn filter(&self, type_id: ResourceTypeId, now: Timestamp) -> ResourceFilter {
        let filter = ResourceFilter::default()
            .with_type(type_id)
            .include_deleted(self.include_deleted);
        if self.include_expired {
            filter
        } else {
            filter.valid_at(now)
        }
    }
}
