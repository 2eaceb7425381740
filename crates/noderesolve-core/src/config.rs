use crate::error::Error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Condition that every condition list ends up containing.
pub const DEFAULT_CONDITION: &str = "default";

/// Resolver configuration.
///
/// Built once and shared read-only by every resolve call. Loadable from JSON
/// with camelCase keys; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Extensions appended to a path when probing (in order), e.g. `.js`.
    pub extensions: Vec<String>,

    /// Replacement extensions for an existing extension, e.g. `.js -> [.ts, .tsx]`.
    pub extension_alias: IndexMap<String, Vec<String>>,

    /// Directory searched in every ancestor for packages.
    pub modules_directory: String,

    /// Package manifest file name.
    pub manifest_file: String,

    /// Manifest fields naming the package entry point, in priority order.
    pub main_fields: Vec<String>,

    /// Base name probed when a directory has no usable manifest.
    pub index_name: String,

    /// Export/import conditions in priority order.
    pub conditions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            extension_alias: IndexMap::new(),
            modules_directory: "node_modules".to_string(),
            manifest_file: "package.json".to_string(),
            main_fields: vec!["main".to_string()],
            index_name: "index".to_string(),
            conditions: vec![DEFAULT_CONDITION.to_string()],
        }
    }
}

impl ResolverConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON text. Conditions get the same `default`
    /// handling as [`ResolverConfig::with_conditions`].
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, Error> {
        let mut config: Self = serde_json::from_str(text).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.ensure_default_condition();
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    /// Set probed extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Add an extension alias, e.g. `.js -> [.ts, .js]`.
    pub fn with_extension_alias<I, S>(mut self, extension: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extension_alias.insert(
            extension.into(),
            aliases.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Set main fields.
    pub fn with_main_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set conditions, keeping their order. `default` is appended when missing.
    pub fn with_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = conditions.into_iter().map(Into::into).collect();
        self.ensure_default_condition();
        self
    }

    fn ensure_default_condition(&mut self) {
        if !self.conditions.iter().any(|c| c == DEFAULT_CONDITION) {
            self.conditions.push(DEFAULT_CONDITION.to_string());
        }
    }

    /// Set the index base name.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Set the modules directory name.
    pub fn with_modules_directory(mut self, name: impl Into<String>) -> Self {
        self.modules_directory = name.into();
        self
    }

    /// Set the manifest file name.
    pub fn with_manifest_file(mut self, name: impl Into<String>) -> Self {
        self.manifest_file = name.into();
        self
    }

    /// Check the config for values the resolver cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        for (label, value) in [
            ("modulesDirectory", &self.modules_directory),
            ("manifestFile", &self.manifest_file),
            ("indexName", &self.index_name),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_config(format!("{label} must not be empty")));
            }
        }

        let alias_exts = self
            .extension_alias
            .iter()
            .flat_map(|(ext, aliases)| std::iter::once(ext).chain(aliases));
        if let Some(bad) = self
            .extensions
            .iter()
            .chain(alias_exts)
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(Error::invalid_config(format!(
                "extension {bad:?} must start with '.'"
            )));
        }

        if self.conditions.is_empty() {
            return Err(Error::invalid_config("conditions must not be empty"));
        }

        Ok(())
    }
}
