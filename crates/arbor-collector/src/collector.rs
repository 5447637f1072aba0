use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use arbor_model::{compare_date_released, compare_root_path, path, Resource};
use arbor_tree::{ResourceFilter, TreeReader};
use arbor_types::Timestamp;

use crate::config::CollectorConfig;
use crate::error::{CollectorError, CollectorResult};
use crate::params::{expand_number_macro, CollectorParams};
use crate::strategy::{Scope, SortKey, Strategy};

/// Runs named listing strategies against a resource tree.
///
/// Parameters are validated before the tree is read. Tree failures are
/// returned unchanged.
pub struct ResourceCollector {
    tree: Arc<dyn TreeReader>,
    config: CollectorConfig,
}

impl ResourceCollector {
    /// A collector with the default configuration.
    pub fn new(tree: Arc<dyn TreeReader>) -> Self {
        Self::with_config(tree, CollectorConfig::default())
    }

    pub fn with_config(tree: Arc<dyn TreeReader>, config: CollectorConfig) -> Self {
        Self { tree, config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Run `strategy_name` with `param`.
    pub fn collect(&self, strategy_name: &str, param: &str) -> CollectorResult<Vec<Resource>> {
        self.collect_at(strategy_name, param, Timestamp::now())
    }

    /// Run `strategy_name` with `param`, evaluating release windows at `now`.
    pub fn collect_at(
        &self,
        strategy_name: &str,
        param: &str,
        now: Timestamp,
    ) -> CollectorResult<Vec<Resource>> {
        let strategy: Strategy = strategy_name.parse()?;
        debug!(strategy = %strategy, param, "collect");

        if strategy.scope() == Scope::Single {
            return self.single_file(param).map(|resource| vec![resource]);
        }

        let params = CollectorParams::parse(param)?;
        let folder = params.folder();
        let filter = self.config.filter(params.type_id(), now);
        let recursive = strategy.scope() == Scope::SubTree;
        let mut result = self.read_below(folder, &filter, recursive)?;

        match strategy.sort_key() {
            Some(SortKey::DateReleased) => result.sort_by(compare_date_released),
            Some(SortKey::RootPath) | None => result.sort_by(compare_root_path),
        }
        if strategy.is_descending() {
            result.reverse();
        }
        if let Some(count) = params.count() {
            result.truncate(count);
        }

        debug!(strategy = %strategy, folder, count = result.len(), "collected");
        Ok(result)
    }

    /// The path at which an editor should create the next resource.
    ///
    /// Returns `None` for strategies that do not support creation. For folder
    /// strategies the target path is a template: the first `${number}`
    /// substitution, counting up from 1, that names no existing resource in
    /// the folder is returned. A target without the placeholder fails with
    /// `InvalidParameter` before the tree is read.
    pub fn create_target(&self, strategy_name: &str, param: &str) -> CollectorResult<Option<String>> {
        let strategy: Strategy = strategy_name.parse()?;
        if !strategy.supports_create() {
            return Ok(None);
        }
        let params = CollectorParams::parse(param)?;
        if !params.has_number_macro() {
            return Err(CollectorError::invalid(param, "target path has no ${number} placeholder"));
        }

        let existing: HashSet<String> = self
            .read_below(params.folder(), &ResourceFilter::all(), false)?
            .into_iter()
            .map(|r| r.root_path().to_string())
            .collect();
        let target = first_free_target(params.target_path(), |candidate| existing.contains(candidate));

        debug!(strategy = %strategy, target = %target, "create target");
        Ok(Some(target))
    }

    /// The parameter to pass back for a follow-up create, or `None` for
    /// strategies that do not support creation.
    pub fn create_param(&self, strategy_name: &str, param: &str) -> CollectorResult<Option<String>> {
        let strategy: Strategy = strategy_name.parse()?;
        if !strategy.supports_create() {
            return Ok(None);
        }
        CollectorParams::parse(param)?;
        Ok(Some(param.to_string()))
    }

    fn single_file(&self, param: &str) -> CollectorResult<Resource> {
        let target = param.split('|').next().unwrap_or_default().trim();
        if !target.starts_with('/') {
            return Err(CollectorError::invalid(param, "target path must be absolute"));
        }
        Ok(self.tree.read_single(target)?)
    }

    fn read_below(
        &self,
        folder: &str,
        filter: &ResourceFilter,
        recursive: bool,
    ) -> CollectorResult<Vec<Resource>> {
        let mut resources = self.tree.read_resources(folder, filter, recursive)?;
        resources.retain(|r| {
            let inside = if recursive {
                path::is_below(r.root_path(), folder)
            } else {
                path::is_direct_child(r.root_path(), folder)
            };
            if !inside {
                warn!(folder, path = %r.root_path(), "skipping resource outside requested folder");
            }
            inside
        });
        Ok(resources)
    }
}

impl std::fmt::Debug for ResourceCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCollector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Probe `template` with 1, 2, 3, ... until `is_taken` rejects a candidate.
///
/// Stops at the first free slot. There is no upper bound.
pub fn first_free_target(template: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut number: u64 = 1;
    loop {
        let candidate = expand_number_macro(template, number);
        if !is_taken(&candidate) {
            return candidate;
        }
        number += 1;
    }
}
