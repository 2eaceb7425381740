use std::path::PathBuf;
use thiserror::Error;

/// Core error type for noderesolve operations.
///
/// None of these escape [`crate::resolve`]; the resolver absorbs them into an
/// unresolved result. They surface from the parser, the upward search and the
/// configuration loader when those are called directly.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid specifier: {input:?}")]
    InvalidSpecifier { input: String },

    #[error("{target} not found in {start} or any parent directory")]
    NotFoundUpward { start: String, target: String },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid resolver config: {0}")]
    InvalidConfig(String),
}

impl Error {
    #[must_use]
    pub fn invalid_specifier(input: impl Into<String>) -> Self {
        Self::InvalidSpecifier {
            input: input.into(),
        }
    }

    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
