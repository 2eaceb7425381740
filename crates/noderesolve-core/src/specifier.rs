//! Bare specifier parsing.
//!
//! Grammar: `[protocol ":"] ["@" scope "/"] package ["/" subpath]`, e.g.
//! `lodash`, `lodash/fp`, `@babel/core`, `npm:@scope/pkg/sub/path`.

use crate::error::Error;
use regex_lite::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Parsed bare specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Text before the first `:`, e.g. `npm` in `npm:lodash` or `git+ssh`.
    pub protocol: Option<String>,
    /// Scope without the leading `@`, e.g. `babel` in `@babel/core`.
    pub scope: Option<String>,
    /// Package token, e.g. `core` in `@babel/core`.
    pub package: String,
    /// Directory name under `node_modules`: `@scope/package` or `package`.
    pub name: String,
    /// Everything after the package's trailing `/`. May be empty.
    pub subpath: String,
}

fn specifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:([^:/@]+):)?(?:@([\w~-][\w.~-]*)/)?([\w-][\w.-]*)(?:/(.*))?$")
            .expect("specifier grammar is a valid regex")
    })
}

impl Specifier {
    /// Parse a bare specifier.
    ///
    /// Relative (`./x`), absolute (`/x`) and empty inputs are rejected with
    /// [`Error::InvalidSpecifier`].
    pub fn parse(input: &str) -> Result<Self, Error> {
        if input.is_empty() {
            return Err(Error::invalid_specifier(input));
        }

        let caps = specifier_regex()
            .captures(input)
            .ok_or_else(|| Error::invalid_specifier(input))?;

        let package = caps
            .get(3)
            .map(|m| m.as_str())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::invalid_specifier(input))?
            .to_string();
        let protocol = caps.get(1).map(|m| m.as_str().to_string());
        let scope = caps.get(2).map(|m| m.as_str().to_string());
        let subpath = caps
            .get(4)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        let name = match &scope {
            Some(scope) => format!("@{scope}/{package}"),
            None => package.clone(),
        };

        Ok(Self {
            protocol,
            scope,
            package,
            name,
            subpath,
        })
    }

    /// Whether the specifier names a scoped package.
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }
}

impl FromStr for Specifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(protocol) = &self.protocol {
            write!(f, "{protocol}:")?;
        }
        f.write_str(&self.name)?;
        if !self.subpath.is_empty() {
            write!(f, "/{}", self.subpath)?;
        }
        Ok(())
    }
}
