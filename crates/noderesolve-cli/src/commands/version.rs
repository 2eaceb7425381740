use miette::{IntoDiagnostic, Result};
use noderesolve_core::ResolverConfig;
use serde::Serialize;

/// Version information for `noderesolve version`.
#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    git_hash: Option<&'static str>,
    /// Resolver settings used when no config file or flags are given.
    defaults: ResolverConfig,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            name: "noderesolve",
            version: env!("CARGO_PKG_VERSION"),
            git_hash: option_env!("NODERESOLVE_BUILD_GIT_HASH"),
            defaults: ResolverConfig::default(),
        }
    }

    fn line(&self) -> String {
        match self.git_hash {
            Some(hash) => format!("{} {} ({hash})", self.name, self.version),
            None => format!("{} {}", self.name, self.version),
        }
    }
}

pub fn run(json: bool) -> Result<()> {
    let info = VersionInfo::current();
    if json {
        println!("{}", serde_json::to_string_pretty(&info).into_diagnostic()?);
    } else {
        println!("{}", info.line());
    }
    Ok(())
}
