use super::EXIT_NOT_FOUND;
use miette::{IntoDiagnostic, Result};
use noderesolve_core::{
    resolve, NoCoreModules, NodeBuiltins, OsFs, OsPath, ResolveContext, ResolverConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Specifier to resolve (`lodash/fp`, `./util`, `#internal/db`, `fs`)
    pub specifier: String,

    /// Directory the import comes from (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// JSON resolver config file (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extension to probe, in order (repeatable or comma-separated)
    #[arg(short = 'e', long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Extension alias as EXT=ALIAS, in order (e.g. `.js=.ts`)
    #[arg(long = "alias", value_name = "EXT=ALIAS")]
    pub aliases: Vec<String>,

    /// Export/import condition, in priority order
    #[arg(short = 'c', long = "condition", value_delimiter = ',')]
    pub conditions: Vec<String>,

    /// Manifest field naming the entry point, in priority order
    #[arg(long = "main-field", value_delimiter = ',')]
    pub main_fields: Vec<String>,

    /// Index file base name
    #[arg(long = "index", value_name = "NAME")]
    pub index_name: Option<String>,

    /// Package directory name searched in every ancestor
    #[arg(long = "modules-dir", value_name = "NAME")]
    pub modules_directory: Option<String>,

    /// Treat Node.js built-ins as ordinary packages
    #[arg(long)]
    pub no_core: bool,
}

/// JSON output for `noderesolve resolve`.
#[derive(Serialize)]
struct ResolveResult<'a> {
    ok: bool,
    specifier: &'a str,
    base: &'a str,
    resolved: Option<String>,
}

pub fn run(cwd: &Path, args: &ResolveArgs, json: bool) -> Result<()> {
    let config = build_config(cwd, args)?;
    config.validate().into_diagnostic()?;

    let base_dir = match &args.base {
        Some(base) if base.is_absolute() => base.clone(),
        Some(base) => cwd.join(base),
        None => cwd.to_path_buf(),
    };
    let base = base_dir.to_string_lossy();

    let ctx = if args.no_core {
        ResolveContext::new(&config, &OsFs, &OsPath, &NoCoreModules)
    } else {
        ResolveContext::new(&config, &OsFs, &OsPath, &NodeBuiltins)
    };
    debug!(specifier = %args.specifier, base = %base, ?config, "Resolving");

    let resolved = resolve(&ctx, &args.specifier, &base);
    let ok = resolved.is_some();

    if json {
        let result = ResolveResult {
            ok,
            specifier: &args.specifier,
            base: &base,
            resolved,
        };
        println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    } else if let Some(path) = &resolved {
        println!("{path}");
    } else {
        eprintln!("error: cannot resolve '{}' from {base}", args.specifier);
    }

    if !ok {
        std::process::exit(EXIT_NOT_FOUND);
    }
    Ok(())
}

/// Load the config file (if any) and apply command-line overrides on top.
fn build_config(cwd: &Path, args: &ResolveArgs) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => ResolverConfig::from_json_file(&cwd.join(path)).into_diagnostic()?,
        None => ResolverConfig::new(),
    };

    if !args.extensions.is_empty() {
        config = config.with_extensions(args.extensions.iter().cloned());
    }
    if !args.conditions.is_empty() {
        config = config.with_conditions(args.conditions.iter().cloned());
    }
    if !args.main_fields.is_empty() {
        config = config.with_main_fields(args.main_fields.iter().cloned());
    }
    if let Some(name) = &args.index_name {
        config = config.with_index_name(name.clone());
    }
    if let Some(name) = &args.modules_directory {
        config = config.with_modules_directory(name.clone());
    }

    // --alias flags for one extension replace that extension's configured list
    let mut overridden: Vec<&str> = Vec::new();
    for raw in &args.aliases {
        let Some((ext, alias)) = parse_alias(raw) else {
            return Err(miette::miette!("Invalid --alias {raw:?}, expected EXT=ALIAS"));
        };
        if !overridden.contains(&ext) {
            overridden.push(ext);
            config.extension_alias.insert(ext.to_string(), Vec::new());
        }
        if let Some(list) = config.extension_alias.get_mut(ext) {
            list.push(alias.to_string());
        }
    }

    Ok(config)
}

/// Split `EXT=ALIAS` into its parts.
fn parse_alias(raw: &str) -> Option<(&str, &str)> {
    let (ext, alias) = raw.split_once('=')?;
    (!ext.is_empty() && !alias.is_empty()).then_some((ext, alias))
}
