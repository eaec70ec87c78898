use core::fmt;
use serde_json::Value;

/// Where a metric lives inside a raw metric tree.
///
/// The path starts at a top-level category and descends through `keys`; the
/// final key must hold a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricPath {
    pub category: &'static str,
    pub keys: &'static [&'static str],
}

/// Why a [`MetricPath`] did not resolve to a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A key along the path is absent.
    MissingKey { key: &'static str },

    /// The value holding `key` is not a JSON object.
    NotAnObject { key: &'static str },

    /// The leaf exists but holds something other than a number.
    NotANumber { found: &'static str },
}

impl MetricPath {
    #[must_use]
    pub const fn new(category: &'static str, keys: &'static [&'static str]) -> Self {
        Self { category, keys }
    }

    /// Walk `tree` along this path.
    pub fn resolve(&self, tree: &Value) -> Result<f64, PathError> {
        let mut current = tree;
        for key in core::iter::once(self.category).chain(self.keys.iter().copied()) {
            let Value::Object(map) = current else {
                return Err(PathError::NotAnObject { key });
            };

            current = map.get(key).ok_or(PathError::MissingKey { key })?;
        }

        current.as_f64().ok_or(PathError::NotANumber { found: json_type_name(current) })
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category)?;
        for key in self.keys {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "key '{key}' is missing"),
            Self::NotAnObject { key } => write!(f, "parent of '{key}' is not an object"),
            Self::NotANumber { found } => write!(f, "expected a number, found {found}"),
        }
    }
}

pub(super) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
