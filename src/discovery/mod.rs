//! Locating per-backend metric files
//!
//! The evaluation engine writes one JSON file per backend into a result
//! directory, named `<backend><suffix>`. This module lists that directory,
//! keeps the files whose names end in one of the configured suffixes, and
//! derives each backend's identifier by stripping the suffix.
//!
//! Discovery order is lexicographic by filename so repeated runs over the same
//! directory produce rows in the same order.

mod backend_id;
mod locator;
mod source_pattern;

pub use backend_id::BackendId;
pub use locator::{Discovery, MetricFileLocator, MetricSource, NoDataReason};
pub use source_pattern::SourcePattern;
