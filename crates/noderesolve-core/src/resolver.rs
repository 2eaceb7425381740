//! Module resolver.
//!
//! Supports:
//! - `#`-prefixed specifiers through the nearest manifest's `imports` field
//! - Core modules, returned unchanged for the host to load
//! - Bare specifiers with ancestor `node_modules` lookup
//! - Package `exports` (subpaths, patterns, conditions), main fields, index files
//! - Relative and absolute file/directory paths
//! - Extension probing and extension aliases
//!
//! Every step reports "not found" as `None`; nothing is raised to the caller.

use crate::config::ResolverConfig;
use crate::core_modules::{CoreModules, NodeBuiltins, NODE_SCHEME};
use crate::error::Error;
use crate::fs::{FileSystem, OsFs, OsPath, PathOps};
use crate::manifest::Manifest;
use crate::specifier::Specifier;
use crate::subpath::SubpathResolver;
use indexmap::IndexSet;
use std::fmt;
use tracing::{debug, trace};

/// Everything a resolve call needs: configuration plus host capabilities.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Resolver configuration.
    pub config: &'a ResolverConfig,
    /// Filesystem queries.
    pub fs: &'a dyn FileSystem,
    /// Path joining and parent lookup.
    pub path: &'a dyn PathOps,
    /// Core module predicate.
    pub core_modules: &'a dyn CoreModules,
}

impl<'a> ResolveContext<'a> {
    #[must_use]
    pub fn new(
        config: &'a ResolverConfig,
        fs: &'a dyn FileSystem,
        path: &'a dyn PathOps,
        core_modules: &'a dyn CoreModules,
    ) -> Self {
        Self {
            config,
            fs,
            path,
            core_modules,
        }
    }

    /// Context over the real filesystem with Node.js built-ins as core modules.
    #[must_use]
    pub fn os(config: &'a ResolverConfig) -> Self {
        Self::new(config, &OsFs, &OsPath, &NodeBuiltins)
    }

    fn join(&self, parts: &[&str]) -> String {
        self.path.join(parts)
    }

    fn is_file(&self, path: &str) -> bool {
        self.fs.stat(path).is_ok_and(|meta| meta.is_file())
    }

    fn is_dir(&self, path: &str) -> bool {
        self.fs.stat(path).is_ok_and(|meta| meta.is_dir)
    }

    fn exists(&self, path: &str) -> bool {
        self.fs.stat(path).is_ok()
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext")
            .field("config", self.config)
            .field("fs", &self.fs)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Resolve `specifier` relative to the directory `base`.
///
/// Returns the resolved file path, the specifier itself for core modules, or
/// None when nothing matches.
#[must_use]
pub fn resolve(ctx: &ResolveContext<'_>, specifier: &str, base: &str) -> Option<String> {
    if specifier.starts_with('#') {
        return resolve_hash_import(ctx, specifier, base);
    }

    match Specifier::parse(specifier) {
        Ok(spec) if !spec.name.is_empty() => {
            if is_core_module(ctx, &spec) {
                debug!(specifier, name = %spec.name, "Core module, deferring to host");
                return Some(specifier.to_string());
            }
            resolve_package(ctx, &spec, base)
        }
        _ => {
            let target = ctx.join(&[base, specifier]);
            trace!(specifier, target = %target, "Resolving as file path");
            resolve_file(ctx, &target).or_else(|| resolve_dir(ctx, &target, ""))
        }
    }
}

/// Core check on the package name, then on the `node:`-qualified name so
/// scheme-only built-ins (`node:test`) are recognised.
fn is_core_module(ctx: &ResolveContext<'_>, spec: &Specifier) -> bool {
    if ctx.core_modules.is_core_module(&spec.name) {
        return true;
    }
    spec.protocol.as_deref() == Some("node")
        && ctx
            .core_modules
            .is_core_module(&format!("{NODE_SCHEME}{}", spec.name))
}

/// Resolve a #-prefixed import using the nearest manifest's imports field.
fn resolve_hash_import(ctx: &ResolveContext<'_>, specifier: &str, base: &str) -> Option<String> {
    let Some((manifest_dir, manifest)) = find_manifest(ctx, base) else {
        debug!(specifier, base, "No manifest found for hash import");
        return None;
    };
    let imports = manifest.imports()?;

    let resolver = SubpathResolver::new(ctx.config.conditions.clone()).with_imports(imports);
    let candidates = resolver.resolve_imports(specifier);
    debug!(specifier, dir = %manifest_dir, ?candidates, "Matched imports");

    first_existing_file(ctx, &manifest_dir, &candidates)
}

/// Resolve a bare specifier through ancestor `node_modules` directories.
fn resolve_package(ctx: &ResolveContext<'_>, spec: &Specifier, base: &str) -> Option<String> {
    for pkg_dir in modules_paths(ctx, base, &spec.name) {
        if !ctx.is_dir(&pkg_dir) {
            continue;
        }
        debug!(name = %spec.name, dir = %pkg_dir, subpath = %spec.subpath, "Found package directory");
        if let Some(resolved) = resolve_dir(ctx, &pkg_dir, &spec.subpath) {
            return Some(resolved);
        }
    }
    debug!(name = %spec.name, base, "Package not resolved in any node_modules");
    None
}

/// Resolve a file path, probing extension aliases and extra extensions.
///
/// Candidates, in order and without duplicates: the path itself, the path with
/// each alias of its extension, the path with each configured extension
/// appended. The first existing non-directory wins.
#[must_use]
pub fn resolve_file(ctx: &ResolveContext<'_>, file_path: &str) -> Option<String> {
    let mut candidates: IndexSet<String> = IndexSet::new();
    candidates.insert(file_path.to_string());

    if let Some((stem, ext)) = split_extension(file_path) {
        if let Some(aliases) = ctx.config.extension_alias.get(ext) {
            for alias in aliases {
                candidates.insert(format!("{stem}{alias}"));
            }
        }
    }

    for ext in &ctx.config.extensions {
        candidates.insert(format!("{file_path}{ext}"));
    }

    candidates.into_iter().find(|candidate| {
        let found = ctx.is_file(candidate);
        trace!(candidate = %candidate, found, "Probe file");
        found
    })
}

/// Resolve a directory (exports > main fields > index), with `entry` being
/// the requested subpath inside it (empty for the directory itself).
#[must_use]
pub fn resolve_dir(ctx: &ResolveContext<'_>, dir: &str, entry: &str) -> Option<String> {
    let manifest_path = ctx.join(&[dir, &ctx.config.manifest_file]);
    let manifest = if ctx.is_file(&manifest_path) {
        read_manifest(ctx, &manifest_path)
    } else {
        None
    };

    let Some(manifest) = manifest else {
        return resolve_index(ctx, dir);
    };

    if let Some(exports) = manifest.exports() {
        let resolver = SubpathResolver::new(ctx.config.conditions.clone()).with_exports(exports);
        let candidates = resolver.resolve_exports(entry);
        debug!(dir, entry, ?candidates, "Matched exports");
        // exports is authoritative: no main or index fallback
        return first_existing_file(ctx, dir, &candidates);
    }

    if entry.is_empty() {
        return resolve_main(ctx, dir, &manifest).or_else(|| resolve_index(ctx, dir));
    }

    let sub_path = ctx.join(&[dir, entry]);
    resolve_file(ctx, &sub_path).or_else(|| resolve_dir(ctx, &sub_path, ""))
}

/// Try each configured main field in priority order.
fn resolve_main(ctx: &ResolveContext<'_>, dir: &str, manifest: &Manifest) -> Option<String> {
    ctx.config.main_fields.iter().find_map(|field| {
        let main = manifest.entry_field(field)?;
        let main_path = ctx.join(&[dir, main]);
        debug!(field = %field, main, "Trying main field");
        resolve_file(ctx, &main_path)
            .or_else(|| resolve_file(ctx, &ctx.join(&[&main_path, &ctx.config.index_name])))
    })
}

fn resolve_index(ctx: &ResolveContext<'_>, dir: &str) -> Option<String> {
    resolve_file(ctx, &ctx.join(&[dir, &ctx.config.index_name]))
}

/// Join each candidate onto `dir`; return the first existing non-directory.
fn first_existing_file(
    ctx: &ResolveContext<'_>,
    dir: &str,
    candidates: &[String],
) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| ctx.join(&[dir, candidate]))
        .find(|path| {
            let found = ctx.is_file(path);
            trace!(candidate = %path, found, "Probe mapped target");
            found
        })
}

fn read_manifest(ctx: &ResolveContext<'_>, path: &str) -> Option<Manifest> {
    let bytes = ctx.fs.read_file(path).ok()?;
    let manifest = Manifest::parse(&bytes);
    if manifest.is_none() {
        debug!(path, "Manifest unreadable or invalid, ignoring");
    }
    manifest
}

/// Split `path` into stem and extension (`.js`) on its last component.
fn split_extension(path: &str) -> Option<(&str, &str)> {
    let file_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let dot = path[file_start..].rfind('.')? + file_start;
    Some((&path[..dot], &path[dot..]))
}

/// Candidate package directories: `<dir>/<modules_directory>/<name>` for
/// `start` and each of its ancestors, nearest first.
#[must_use]
pub fn modules_paths(ctx: &ResolveContext<'_>, start: &str, name: &str) -> Vec<String> {
    let mut paths = Vec::new();
    if start.is_empty() {
        return paths;
    }

    let mut current = start.to_string();
    loop {
        paths.push(ctx.join(&[&current, &ctx.config.modules_directory, name]));
        let parent = ctx.path.dir(&current);
        if parent == current {
            break;
        }
        current = parent;
    }
    paths
}

/// Find `target` in `start_dir` or the nearest ancestor containing it.
pub fn find_up(ctx: &ResolveContext<'_>, start_dir: &str, target: &str) -> Result<String, Error> {
    let mut dir = start_dir.to_string();
    loop {
        let candidate = ctx.join(&[&dir, target]);
        if ctx.exists(&candidate) {
            return Ok(candidate);
        }

        let parent = ctx.path.dir(&dir);
        if parent == dir {
            return Err(Error::NotFoundUpward {
                start: start_dir.to_string(),
                target: target.to_string(),
            });
        }
        dir = parent;
    }
}

/// Nearest ancestor manifest of `base`, with the directory containing it.
#[must_use]
pub fn find_manifest(ctx: &ResolveContext<'_>, base: &str) -> Option<(String, Manifest)> {
    let manifest_path = match find_up(ctx, base, &ctx.config.manifest_file) {
        Ok(path) => path,
        Err(err) => {
            trace!(%err, "Manifest lookup failed");
            return None;
        }
    };
    let manifest = read_manifest(ctx, &manifest_path)?;
    Some((ctx.path.dir(&manifest_path), manifest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::NoCoreModules;
    use crate::fs::{MemoryFs, PosixPath};

    fn ctx<'a>(config: &'a ResolverConfig, fs: &'a MemoryFs) -> ResolveContext<'a> {
        ResolveContext::new(config, fs, &PosixPath, &NodeBuiltins)
    }

    fn js_config() -> ResolverConfig {
        ResolverConfig::new().with_extensions([".js"])
    }

    #[test]
    fn test_modules_paths() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new();
        assert_eq!(
            modules_paths(&ctx(&config, &fs), "/a/b", "pkg"),
            vec!["/a/b/node_modules/pkg", "/a/node_modules/pkg", "/node_modules/pkg"]
        );
    }

    #[test]
    fn test_modules_paths_custom_dir_and_scope() {
        let config = ResolverConfig::new().with_modules_directory("web_modules");
        let fs = MemoryFs::new();
        assert_eq!(
            modules_paths(&ctx(&config, &fs), "/a", "@s/p"),
            vec!["/a/web_modules/@s/p", "/web_modules/@s/p"]
        );
    }

    #[test]
    fn test_modules_paths_empty_start() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new();
        assert!(modules_paths(&ctx(&config, &fs), "", "pkg").is_empty());
    }

    #[test]
    fn test_find_up() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file("/repo/package.json", "{}")
            .with_dir("/repo/src/deep");
        let ctx = ctx(&config, &fs);

        assert_eq!(
            find_up(&ctx, "/repo/src/deep", "package.json").unwrap(),
            "/repo/package.json"
        );
        assert!(matches!(
            find_up(&ctx, "/repo/src/deep", "missing.json"),
            Err(Error::NotFoundUpward { .. })
        ));
    }

    #[test]
    fn test_exports_root() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"exports": {".": "./index.js"}}"#,
            )
            .with_file("/app/node_modules/foo/index.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/index.js")
        );
    }

    #[test]
    fn test_exports_subpath_pattern() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/lib/package.json",
                r#"{"exports": {".": "./index.js", "./features/*": "./dist/features/*.js"}}"#,
            )
            .with_file("/app/node_modules/lib/dist/features/auth.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "lib/features/auth", "/app").as_deref(),
            Some("/app/node_modules/lib/dist/features/auth.js")
        );
        assert_eq!(resolve(&ctx, "lib/features/user", "/app"), None);
    }

    #[test]
    fn test_exports_conditions_from_config() {
        let config = ResolverConfig::new().with_conditions(["require"]);
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/dual/package.json",
                r#"{"exports": {".": {"import": "./esm.mjs", "require": "./cjs.cjs", "default": "./d.js"}}}"#,
            )
            .with_file("/app/node_modules/dual/esm.mjs", "")
            .with_file("/app/node_modules/dual/cjs.cjs", "")
            .with_file("/app/node_modules/dual/d.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "dual", "/app").as_deref(),
            Some("/app/node_modules/dual/cjs.cjs")
        );
    }

    #[test]
    fn test_exports_missing_target_has_no_fallback() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"exports": "./missing.js", "main": "index.js"}"#,
            )
            .with_file("/app/node_modules/foo/index.js", "");
        assert_eq!(resolve(&ctx(&config, &fs), "foo", "/app"), None);
    }

    #[test]
    fn test_exports_list_skips_missing_and_directories() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"exports": ["./nope.js", "./dir", "./real.js"]}"#,
            )
            .with_dir("/app/node_modules/foo/dir")
            .with_file("/app/node_modules/foo/real.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/real.js")
        );
    }

    #[test]
    fn test_main_field() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"main": "lib/entry.js"}"#,
            )
            .with_file("/app/node_modules/foo/lib/entry.js", "")
            .with_file("/app/node_modules/foo/index.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/lib/entry.js")
        );
    }

    #[test]
    fn test_main_field_missing_falls_back_to_index() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"main": "lib/entry.js"}"#,
            )
            .with_file("/app/node_modules/foo/index.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/index.js")
        );
    }

    #[test]
    fn test_main_field_probes_extensions_and_index() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file("/app/node_modules/a/package.json", r#"{"main": "lib/entry"}"#)
            .with_file("/app/node_modules/a/lib/entry.js", "")
            .with_file("/app/node_modules/b/package.json", r#"{"main": "lib"}"#)
            .with_file("/app/node_modules/b/lib/index.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "a", "/app").as_deref(),
            Some("/app/node_modules/a/lib/entry.js")
        );
        assert_eq!(
            resolve(&ctx, "b", "/app").as_deref(),
            Some("/app/node_modules/b/lib/index.js")
        );
    }

    #[test]
    fn test_main_fields_priority() {
        let config = ResolverConfig::new().with_main_fields(["module", "main"]);
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/foo/package.json",
                r#"{"main": "cjs.js", "module": "esm.js"}"#,
            )
            .with_file("/app/node_modules/foo/cjs.js", "")
            .with_file("/app/node_modules/foo/esm.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/esm.js")
        );
    }

    #[test]
    fn test_invalid_manifest_falls_back_to_index() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file("/app/node_modules/foo/package.json", "{ broken")
            .with_file("/app/node_modules/foo/index.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app").as_deref(),
            Some("/app/node_modules/foo/index.js")
        );
    }

    #[test]
    fn test_package_subpath_without_exports() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file("/app/node_modules/lodash/package.json", r#"{"main": "lodash.js"}"#)
            .with_file("/app/node_modules/lodash/fp.js", "")
            .with_file("/app/node_modules/lodash/util/index.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "lodash/fp", "/app").as_deref(),
            Some("/app/node_modules/lodash/fp.js")
        );
        assert_eq!(
            resolve(&ctx, "lodash/util", "/app").as_deref(),
            Some("/app/node_modules/lodash/util/index.js")
        );
    }

    #[test]
    fn test_scoped_package() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file("/app/node_modules/@babel/core/package.json", r#"{"main": "lib/index.js"}"#)
            .with_file("/app/node_modules/@babel/core/lib/index.js", "")
            .with_file("/app/node_modules/@babel/core/lib/parse.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "@babel/core", "/app/src").as_deref(),
            Some("/app/node_modules/@babel/core/lib/index.js")
        );
        assert_eq!(
            resolve(&ctx, "@babel/core/lib/parse", "/app/src").as_deref(),
            Some("/app/node_modules/@babel/core/lib/parse.js")
        );
    }

    #[test]
    fn test_ancestor_search_continues_past_broken_package() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file(
                "/app/packages/web/node_modules/foo/package.json",
                r#"{"exports": "./gone.js"}"#,
            )
            .with_file("/app/node_modules/foo/package.json", r#"{"exports": "./ok.js"}"#)
            .with_file("/app/node_modules/foo/ok.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "foo", "/app/packages/web").as_deref(),
            Some("/app/node_modules/foo/ok.js")
        );
    }

    #[test]
    fn test_package_not_installed() {
        let config = js_config();
        let fs = MemoryFs::new().with_file("/app/foo.js", "");
        assert_eq!(resolve(&ctx(&config, &fs), "foo", "/app"), None);
    }

    #[test]
    fn test_core_modules() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new();
        let ctx = ctx(&config, &fs);
        assert_eq!(resolve(&ctx, "fs", "/app").as_deref(), Some("fs"));
        assert_eq!(resolve(&ctx, "node:fs", "/app").as_deref(), Some("node:fs"));
        assert_eq!(
            resolve(&ctx, "fs/promises", "/app").as_deref(),
            Some("fs/promises")
        );
    }

    #[test]
    fn test_node_scheme_only_builtins() {
        let config = js_config();
        let fs = MemoryFs::new().with_file("/app/node_modules/test/index.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(resolve(&ctx, "node:test", "/app").as_deref(), Some("node:test"));
        assert_eq!(
            resolve(&ctx, "node:sqlite", "/app").as_deref(),
            Some("node:sqlite")
        );
        assert_eq!(
            resolve(&ctx, "node:test/reporters", "/app").as_deref(),
            Some("node:test/reporters")
        );
        // without the scheme `test` is an ordinary package
        assert_eq!(
            resolve(&ctx, "test", "/app").as_deref(),
            Some("/app/node_modules/test/index.js")
        );
    }

    #[test]
    fn test_json_config_conditions_fall_back_to_default() {
        let config = ResolverConfig::from_json_str(
            r#"{"conditions": ["node"]}"#,
            std::path::Path::new("resolve.json"),
        )
        .unwrap();
        let fs = MemoryFs::new()
            .with_file(
                "/app/node_modules/p/package.json",
                r#"{"exports": {".": {"browser": "./b.js", "default": "./d.js"}}}"#,
            )
            .with_file("/app/node_modules/p/b.js", "")
            .with_file("/app/node_modules/p/d.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "p", "/app").as_deref(),
            Some("/app/node_modules/p/d.js")
        );
    }

    #[test]
    fn test_core_module_predicate_disabled() {
        let config = js_config();
        let fs = MemoryFs::new().with_file("/app/node_modules/fs/index.js", "");
        let ctx = ResolveContext::new(&config, &fs, &PosixPath, &NoCoreModules);
        assert_eq!(
            resolve(&ctx, "fs", "/app").as_deref(),
            Some("/app/node_modules/fs/index.js")
        );
    }

    #[test]
    fn test_hash_import() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file(
                "/repo/package.json",
                r##"{"imports": {"#internal/*": "./src/*.js"}}"##,
            )
            .with_file("/repo/src/x.js", "")
            .with_dir("/repo/src/nested");
        assert_eq!(
            resolve(&ctx(&config, &fs), "#internal/x", "/repo/src/nested").as_deref(),
            Some("/repo/src/x.js")
        );
    }

    #[test]
    fn test_hash_import_nearest_manifest_only() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file("/repo/package.json", r##"{"imports": {"#a": "./a.js"}}"##)
            .with_file("/repo/a.js", "")
            .with_file("/repo/sub/package.json", r#"{"name": "sub"}"#);
        let ctx = ctx(&config, &fs);
        assert_eq!(resolve(&ctx, "#a", "/repo/sub"), None);
        assert_eq!(resolve(&ctx, "#a", "/repo").as_deref(), Some("/repo/a.js"));
    }

    #[test]
    fn test_hash_import_without_manifest() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new().with_file("/repo/src/x.js", "");
        assert_eq!(resolve(&ctx(&config, &fs), "#x", "/repo/src"), None);
    }

    #[test]
    fn test_hash_import_conditions() {
        let config = ResolverConfig::new().with_conditions(["browser"]);
        let fs = MemoryFs::new()
            .with_file(
                "/repo/package.json",
                r##"{"imports": {"#env": {"node": "./env-node.js", "browser": "./env-web.js"}}}"##,
            )
            .with_file("/repo/env-node.js", "")
            .with_file("/repo/env-web.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "#env", "/repo").as_deref(),
            Some("/repo/env-web.js")
        );
    }

    #[test]
    fn test_relative_file_and_extension_probing() {
        let config = ResolverConfig::new().with_extensions([".ts", ".js"]);
        let fs = MemoryFs::new()
            .with_file("/app/src/dep.js", "")
            .with_file("/app/src/exact", "")
            .with_file("/app/lib.ts", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "./dep", "/app/src").as_deref(),
            Some("/app/src/dep.js")
        );
        assert_eq!(
            resolve(&ctx, "./exact", "/app/src").as_deref(),
            Some("/app/src/exact")
        );
        assert_eq!(
            resolve(&ctx, "../lib", "/app/src").as_deref(),
            Some("/app/lib.ts")
        );
        assert_eq!(resolve(&ctx, "./missing", "/app/src"), None);
    }

    #[test]
    fn test_absolute_path() {
        let config = js_config();
        let fs = MemoryFs::new().with_file("/elsewhere/mod.js", "");
        assert_eq!(
            resolve(&ctx(&config, &fs), "/elsewhere/mod", "/app").as_deref(),
            Some("/elsewhere/mod.js")
        );
    }

    #[test]
    fn test_relative_directory() {
        let config = js_config();
        let fs = MemoryFs::new()
            .with_file("/app/utils/index.js", "")
            .with_file("/app/my-pkg/package.json", r#"{"main": "lib/main.js"}"#)
            .with_file("/app/my-pkg/lib/main.js", "");
        let ctx = ctx(&config, &fs);
        assert_eq!(
            resolve(&ctx, "./utils", "/app").as_deref(),
            Some("/app/utils/index.js")
        );
        assert_eq!(
            resolve(&ctx, "./my-pkg", "/app").as_deref(),
            Some("/app/my-pkg/lib/main.js")
        );
    }

    #[test]
    fn test_directory_is_never_a_file_match() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new().with_dir("/app/thing");
        assert_eq!(resolve(&ctx(&config, &fs), "./thing", "/app"), None);
    }

    #[test]
    fn test_extension_alias_order() {
        let config = ResolverConfig::new()
            .with_extension_alias(".js", [".ts", ".js"])
            .with_extensions([".js"]);
        let fs = MemoryFs::new()
            .with_file("/app/a.ts", "")
            .with_file("/app/b.js.js", "")
            .with_file("/app/c.js", "")
            .with_file("/app/c.ts", "");
        let ctx = ctx(&config, &fs);
        // literal path first
        assert_eq!(resolve_file(&ctx, "/app/c.js").as_deref(), Some("/app/c.js"));
        // then aliases
        assert_eq!(resolve_file(&ctx, "/app/a.js").as_deref(), Some("/app/a.ts"));
        // then appended extensions
        assert_eq!(
            resolve_file(&ctx, "/app/b.js").as_deref(),
            Some("/app/b.js.js")
        );
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("/a/b.js"), Some(("/a/b", ".js")));
        assert_eq!(split_extension("/a/b.test.ts"), Some(("/a/b.test", ".ts")));
        assert_eq!(split_extension("/a.d/b"), None);
        assert_eq!(split_extension("b"), None);
    }

    #[test]
    fn test_find_manifest() {
        let config = ResolverConfig::default();
        let fs = MemoryFs::new()
            .with_file("/repo/package.json", r#"{"name": "repo"}"#)
            .with_dir("/repo/a/b");
        let (dir, manifest) = find_manifest(&ctx(&config, &fs), "/repo/a/b").unwrap();
        assert_eq!(dir, "/repo");
        assert_eq!(manifest.name(), Some("repo"));
    }
}
