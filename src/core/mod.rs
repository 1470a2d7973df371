//! Search result processing for fhir-fetch.
//!
//! - [`collect`] - follows Bundle `next` links and gathers raw entries
//! - [`mapper`] - turns raw entries into typed resources
//!
//! Together they sit between the HTTP layer and the typed domain:
//!
//! ```text
//! first Bundle -> BundleCollector -> Vec<RawEntry> -> mapper::map::<T> -> Vec<T>
//! ```

pub mod collect;
pub mod mapper;

pub use collect::{BundleCollector, Collection, DEFAULT_MAX_PAGES};
pub use mapper::{map, map_any, map_with};
