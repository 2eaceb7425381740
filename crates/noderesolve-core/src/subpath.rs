//! Package.json `exports` / `imports` evaluation.
//!
//! Implements Node.js-compatible subpath resolution:
//! - String, array and object declarations, normalized to a [`Mapping`]
//! - Exact subpath keys (`"./feature"`, `"#internal"`)
//! - Pattern keys with one `*` wildcard (`"./features/*"`, `"#src/*.js"`)
//! - Legacy folder keys ending in `/` (`"./lib/"`)
//! - Conditional targets, selected by the caller's ordered condition list

use indexmap::IndexMap;
use serde_json::Value;

/// Wildcard marker in pattern keys and targets.
pub const WILDCARD: char = '*';

const SUBPATH_PREFIX: &str = "./";

/// A single value in an exports/imports mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingValue {
    /// `"./dist/index.js"`
    Target(String),
    /// `["./a.js", "./b.js"]`, tried in order
    List(Vec<MappingValue>),
    /// `{ "import": ..., "require": ..., "default": ... }`
    Conditional(IndexMap<String, MappingValue>),
    /// `null` (explicitly excluded) or a JSON shape that cannot name a target.
    Excluded,
}

impl From<&Value> for MappingValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Target(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(obj) => Self::Conditional(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
            _ => Self::Excluded,
        }
    }
}

impl MappingValue {
    /// Resolve this value to its ordered list of targets.
    ///
    /// A conditional table picks the first entry of `conditions` that is
    /// present as a key; later conditions never merge in.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, conditions: &[S]) -> Vec<String> {
        match self {
            Self::Target(target) => vec![target.clone()],
            Self::List(items) => items
                .iter()
                .flat_map(|item| item.resolve(conditions))
                .collect(),
            Self::Conditional(table) => conditions
                .iter()
                .find_map(|condition| table.get(condition.as_ref()))
                .map(|value| value.resolve(conditions))
                .unwrap_or_default(),
            Self::Excluded => Vec::new(),
        }
    }
}

/// How a wildcard key matched the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Key with exactly one `*`.
    Pattern,
    /// Legacy key ending in `/`; the rest of the input is appended.
    Folder,
}

/// The winning non-exact key for an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardMatch<'a> {
    pub key: &'a str,
    pub captured: String,
    /// Length of the key's literal prefix plus suffix.
    pub specificity: usize,
    pub kind: MatchKind,
}

impl WildcardMatch<'_> {
    /// Substitute the captured text into a resolved target.
    #[must_use]
    pub fn apply(&self, target: &str) -> String {
        match self.kind {
            MatchKind::Pattern if target.contains(WILDCARD) => {
                target.replace(WILDCARD, &self.captured)
            }
            MatchKind::Folder if target.ends_with('/') => format!("{target}{}", self.captured),
            _ => target.to_string(),
        }
    }
}

/// Normalized exports or imports declaration, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: IndexMap<String, MappingValue>,
}

impl Mapping {
    /// Normalize a raw declaration.
    ///
    /// - `"./index.js"` and `[...]` become `{ ".": declaration }`
    /// - objects pass through unchanged
    /// - anything else is an empty mapping
    #[must_use]
    pub fn normalize(declaration: &Value) -> Self {
        match declaration {
            Value::String(_) | Value::Array(_) => {
                Self::from_entries([(".".to_string(), MappingValue::from(declaration))])
            }
            Value::Object(obj) => Self::from_entries(
                obj.iter()
                    .map(|(k, v)| (k.clone(), MappingValue::from(v))),
            ),
            _ => Self::default(),
        }
    }

    /// Build a mapping from entries, keeping their order.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, MappingValue)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MappingValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the most specific wildcard or folder key matching `input`.
    ///
    /// Specificity ties go to the key declared first.
    #[must_use]
    pub fn find_wildcard_match(&self, input: &str) -> Option<WildcardMatch<'_>> {
        let mut best: Option<WildcardMatch<'_>> = None;

        for key in self.entries.keys() {
            let Some(candidate) = match_key(key, input) else {
                continue;
            };
            if best
                .as_ref()
                .map_or(true, |b| candidate.specificity > b.specificity)
            {
                best = Some(candidate);
            }
        }

        best
    }

    /// Resolve `input` to its ordered candidate targets.
    ///
    /// An exact key always wins over wildcard keys. Returns an empty list when
    /// nothing matches or no configured condition applies.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, input: &str, conditions: &[S]) -> Vec<String> {
        if let Some(value) = self.entries.get(input) {
            return value.resolve(conditions);
        }

        let Some(matched) = self.find_wildcard_match(input) else {
            return Vec::new();
        };
        let Some(value) = self.entries.get(matched.key) else {
            return Vec::new();
        };

        value
            .resolve(conditions)
            .iter()
            .map(|target| matched.apply(target))
            .collect()
    }
}

/// Match a single key against an input.
///
/// Pattern `"./features/*"` with input `"./features/foo"` captures `"foo"`.
/// The capture may be empty, but prefix and suffix must not overlap.
fn match_key<'a>(key: &'a str, input: &str) -> Option<WildcardMatch<'a>> {
    match key.matches(WILDCARD).count() {
        1 => {
            let (prefix, suffix) = key.split_once(WILDCARD)?;
            if input.len() < prefix.len() + suffix.len()
                || !input.starts_with(prefix)
                || !input.ends_with(suffix)
            {
                return None;
            }
            Some(WildcardMatch {
                key,
                captured: input[prefix.len()..input.len() - suffix.len()].to_string(),
                specificity: prefix.len() + suffix.len(),
                kind: MatchKind::Pattern,
            })
        }
        0 if key.ends_with('/') && input.len() > key.len() && input.starts_with(key) => {
            Some(WildcardMatch {
                key,
                captured: input[key.len()..].to_string(),
                specificity: key.len(),
                kind: MatchKind::Folder,
            })
        }
        _ => None,
    }
}

/// Normalize an exports entry to `"."` or a `"./"`-prefixed subpath.
#[must_use]
pub fn normalize_entry(entry: &str) -> String {
    if entry.is_empty() || entry == "." || entry == SUBPATH_PREFIX {
        return ".".to_string();
    }
    if entry.starts_with(SUBPATH_PREFIX) {
        return entry.to_string();
    }
    format!("{SUBPATH_PREFIX}{entry}")
}

/// Whether an exports object is a root conditions object rather than a
/// subpath map: `{ "import": ..., "default": ... }`.
fn is_root_conditions(declaration: &Value) -> bool {
    declaration
        .as_object()
        .is_some_and(|obj| !obj.is_empty() && obj.keys().all(|k| !k.starts_with('.')))
}

/// Resolves exports and imports declarations of one manifest.
#[derive(Debug, Clone)]
pub struct SubpathResolver {
    conditions: Vec<String>,
    exports: Mapping,
    imports: Option<Mapping>,
}

impl Default for SubpathResolver {
    fn default() -> Self {
        Self::new(vec!["default".to_string()])
    }
}

impl SubpathResolver {
    /// Create a resolver with the given condition priority order.
    #[must_use]
    pub fn new(conditions: Vec<String>) -> Self {
        Self {
            conditions,
            exports: Mapping::default(),
            imports: None,
        }
    }

    /// Set the exports declaration.
    ///
    /// A root conditions object is treated as the `"."` entry.
    #[must_use]
    pub fn with_exports(mut self, exports: &Value) -> Self {
        self.exports = if is_root_conditions(exports) {
            Mapping::from_entries([(".".to_string(), MappingValue::from(exports))])
        } else {
            Mapping::normalize(exports)
        };
        self
    }

    /// Set the imports declaration.
    #[must_use]
    pub fn with_imports(mut self, imports: &Value) -> Self {
        self.imports = Some(Mapping::normalize(imports));
        self
    }

    /// Resolve a package subpath (`""`, `"feature"`, `"./feature"`) through
    /// the exports mapping.
    #[must_use]
    pub fn resolve_exports(&self, entry: &str) -> Vec<String> {
        self.exports
            .resolve(&normalize_entry(entry), &self.conditions)
    }

    /// Resolve a `#`-prefixed specifier through the imports mapping.
    #[must_use]
    pub fn resolve_imports(&self, entry: &str) -> Vec<String> {
        match &self.imports {
            Some(imports) => imports.resolve(entry, &self.conditions),
            None => Vec::new(),
        }
    }
}
