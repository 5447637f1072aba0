//! Named listing strategies over the Arbor resource tree.
//!
//! A caller picks a strategy by name and passes one parameter string of the
//! form `path|typeId[|count]`. The [`ResourceCollector`] parses it, reads the
//! containing folder (or its subtree) through a [`arbor_tree::TreeReader`],
//! sorts, optionally reverses, and truncates.
//!
//! ```text
//! allInFolderDesc  "/sites/default/page.html|4|2"
//!   -> direct children of /sites/default/ with type 4,
//!      by path descending, at most 2
//! ```
//!
//! Folder strategies can also propose the path for a new resource by probing
//! a `${number}` placeholder in the target path, see
//! [`ResourceCollector::create_target`].

pub mod collector;
pub mod config;
pub mod error;
pub mod params;
pub mod strategy;

pub use collector::{first_free_target, ResourceCollector};
pub use config::CollectorConfig;
pub use error::{CollectorError, CollectorResult};
pub use params::{expand_number_macro, CollectorParams, NUMBER_MACRO};
pub use strategy::{list_strategy_names, Scope, SortKey, Strategy};
