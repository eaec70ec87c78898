use super::metric_path::json_type_name;
use super::{METRIC_DEFINITIONS, MetricRecord};
use camino::{Utf8Path, Utf8PathBuf};
use core::fmt;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io;

const LOG_TARGET: &str = "   decoder";

/// A metric file that could not be turned into a record at all.
#[derive(Debug)]
pub enum DecodeError {
    /// The file could not be read.
    Unreadable { path: Utf8PathBuf, source: io::Error },

    /// The file is not valid JSON.
    InvalidJson { path: Utf8PathBuf, source: serde_json::Error },

    /// The file is valid JSON but its top level is not an object.
    UnusableShape { path: Utf8PathBuf, found: &'static str },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, source } => write!(f, "unable to read '{path}': {source}"),
            Self::InvalidJson { path, source } => write!(f, "'{path}' is not valid JSON: {source}"),
            Self::UnusableShape { path, found } => write!(f, "'{path}' holds {found} at the top level, expected an object"),
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::InvalidJson { source, .. } => Some(source),
            Self::UnusableShape { .. } => None,
        }
    }
}

/// Turns raw metric trees into [`MetricRecord`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricDecoder;

impl MetricDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read and decode one metric file.
    pub fn decode_file(&self, path: &Utf8Path) -> Result<MetricRecord, DecodeError> {
        let text = fs::read_to_string(path).map_err(|source| DecodeError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        self.decode_str(path, &text)
    }

    /// Decode metric JSON text; `path` only labels diagnostics.
    pub fn decode_str(&self, path: &Utf8Path, text: &str) -> Result<MetricRecord, DecodeError> {
        let tree: Value = serde_json::from_str(text).map_err(|source| DecodeError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

        self.decode_tree(path, &tree)
    }

    /// Normalize an already parsed tree.
    ///
    /// Never fails once the top level is an object: every label that cannot be
    /// resolved falls back to the sentinel and the rest are still decoded.
    pub fn decode_tree(&self, path: &Utf8Path, tree: &Value) -> Result<MetricRecord, DecodeError> {
        let Value::Object(categories) = tree else {
            return Err(DecodeError::UnusableShape {
                path: path.to_path_buf(),
                found: json_type_name(tree),
            });
        };

        // A malformed category is reported once, not once per label under it
        let mut seen = HashSet::new();
        let mut malformed = Vec::new();
        for def in METRIC_DEFINITIONS {
            let category = def.category();
            if let Some(value) = categories.get(category)
                && !value.is_object()
                && seen.insert(category)
            {
                log::debug!(target: LOG_TARGET, "Category '{category}' in '{path}' is {}, expected an object", json_type_name(value));
                malformed.push(category);
            }
        }

        let record = MetricRecord::from_fn(|def| def.path.resolve(tree)).with_malformed_categories(malformed);

        for gap in record.gaps() {
            if !seen.contains(gap.category) {
                log::debug!(target: LOG_TARGET, "'{path}': {} ({}) not available: {}", gap.label, gap.category, gap.reason);
            }
        }

        let available = record.values().iter().filter(|value| value.is_available()).count();
        log::info!(target: LOG_TARGET, "Decoded '{path}': {available} of {} metrics available", METRIC_DEFINITIONS.len());

        Ok(record)
    }
}
