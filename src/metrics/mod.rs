//! Metric decoding and normalization
//!
//! This module turns the nested JSON metric trees written by the evaluation engine
//! into flat, uniformly shaped records suitable for reporting.
//!
//! # Implementation Model
//!
//! Every reportable metric is statically declared in `metric_def.rs` as a
//! [`MetricDef`]: a display label, the category it lives under, the key path to
//! follow inside that category, and whether higher or lower values are better.
//!
//! The [`MetricDecoder`] walks each definition's [`MetricPath`] through a parsed
//! tree. A missing key or an unexpected value type at any depth produces
//! [`MetricValue::NotAvailable`] for that one label and decoding moves on, so a
//! [`MetricRecord`] always carries the full label set no matter how sparse its
//! source file was. Only a file that cannot be read or whose top level is not a
//! JSON object is rejected as a whole ([`DecodeError`]).

mod decoder;
mod metric_def;
mod metric_path;
mod metric_record;
mod metric_value;

pub use decoder::{DecodeError, MetricDecoder};
pub use metric_def::{METRIC_DEFINITIONS, MetricDef, Polarity, charted_metrics, labels};
pub use metric_path::{MetricPath, PathError};
pub use metric_record::{FieldGap, MetricRecord};
pub use metric_value::{MetricValue, NOT_AVAILABLE};
