use arbor_model::path;
use arbor_types::ResourceTypeId;

use crate::error::{CollectorError, CollectorResult};

/// Placeholder replaced by the probe number in create-target templates.
pub const NUMBER_MACRO: &str = "${number}";

/// A parsed `path|typeId[|count]` parameter string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectorParams {
    target_path: String,
    type_id: ResourceTypeId,
    count: Option<usize>,
}

impl CollectorParams {
    /// Parse a parameter string. A count of `0` means unbounded.
    ///
    /// Pure string processing; never touches the tree.
    pub fn parse(param: &str) -> CollectorResult<Self> {
        let mut parts = param.split('|');
        let target_path = parts.next().unwrap_or_default().trim();
        let type_part = parts
            .next()
            .ok_or_else(|| CollectorError::invalid(param, "missing '|' separator"))?;
        let count_part = parts.next();
        if parts.next().is_some() {
            return Err(CollectorError::invalid(param, "too many '|' separated segments"));
        }

        if !target_path.starts_with('/') {
            return Err(CollectorError::invalid(param, "target path must be absolute"));
        }
        let type_id = type_part
            .trim()
            .parse::<ResourceTypeId>()
            .map_err(|_| CollectorError::invalid(param, format!("type id '{type_part}' is not numeric")))?;
        let count = match count_part {
            None => None,
            Some(raw) => {
                let count = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| CollectorError::invalid(param, format!("count '{raw}' is not numeric")))?;
                (count > 0).then_some(count)
            }
        };

        Ok(Self {
            target_path: target_path.to_string(),
            type_id,
            count,
        })
    }

    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn type_id(&self) -> ResourceTypeId {
        self.type_id
    }

    /// The result cap, `None` if unbounded.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// The folder the target path lives in.
    pub fn folder(&self) -> &str {
        path::containing_folder(&self.target_path)
    }

    /// Whether the target path is a create-target template.
    pub fn has_number_macro(&self) -> bool {
        self.target_path.contains(NUMBER_MACRO)
    }
}

/// Substitute `number`, zero padded to four digits, for every placeholder in
/// `template`.
pub fn expand_number_macro(template: &str, number: u64) -> String {
    template.replace(NUMBER_MACRO, &format!("{number:04}"))
}
