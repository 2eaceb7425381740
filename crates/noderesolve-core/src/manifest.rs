//! Package manifest (`package.json`) view.

use serde_json::{Map, Value};

/// Parsed package manifest.
///
/// Only the fields the resolver reads are exposed. Parsed fresh on every
/// resolve call and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Parse manifest bytes. Returns None for invalid JSON or a non-object root.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice(bytes).ok()? {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// The `exports` declaration. `null` counts as absent.
    #[must_use]
    pub fn exports(&self) -> Option<&Value> {
        self.fields.get("exports").filter(|v| !v.is_null())
    }

    /// The `imports` declaration. `null` counts as absent.
    #[must_use]
    pub fn imports(&self) -> Option<&Value> {
        self.fields.get("imports").filter(|v| !v.is_null())
    }

    /// A non-empty string field such as `main` or `module`.
    #[must_use]
    pub fn entry_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.entry_field("name")
    }
}
