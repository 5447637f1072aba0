//! Tree-read service for Arbor.
//!
//! Persistence drivers live outside this workspace. This crate defines the
//! boundary they implement and an in-memory backend that satisfies it.
//!
//! # Interfaces
//!
//! - [`TreeReader`] -- folder listings, single-path reads, property
//!   definitions
//! - [`arbor_model::ContentSource`] -- content buffers by resource id, used by
//!   snapshots
//!
//! # Backends
//!
//! - [`InMemoryTree`] -- `RwLock`-guarded maps for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every read returns owned copies; nothing handed out aliases stored data.
//! 2. Listings come back in root path order.
//! 3. A read either answers completely or fails; there are no partial results.

pub mod error;
pub mod filter;
pub mod memory;
pub mod traits;

pub use error::{TreeError, TreeResult};
pub use filter::ResourceFilter;
pub use memory::InMemoryTree;
pub use traits::TreeReader;
