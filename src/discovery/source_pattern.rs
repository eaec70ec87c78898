use super::BackendId;
use serde::{Deserialize, Serialize};

/// A filename suffix that marks a metric file, with an optional label that
/// distinguishes backends discovered through different suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcePattern {
    pub suffix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SourcePattern {
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(suffix: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            label: Some(label.into()),
        }
    }

    /// Derive the backend identifier from `file_name`, if it matches this pattern.
    ///
    /// A bare suffix with nothing in front of it does not name a backend.
    #[must_use]
    pub fn backend_for(&self, file_name: &str) -> Option<BackendId> {
        let stem = file_name.strip_suffix(self.suffix.as_str())?;
        if stem.is_empty() {
            return None;
        }

        Some(match &self.label {
            Some(label) => BackendId::new(format!("{stem} ({label})")),
            None => BackendId::new(stem),
        })
    }
}
