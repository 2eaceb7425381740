//! Core module predicates.
//!
//! A core module is left for the host runtime to load: the resolver returns
//! the specifier unchanged instead of searching the filesystem.

/// Decides whether a package name is a host-provided core module.
pub trait CoreModules: Send + Sync {
    fn is_core_module(&self, name: &str) -> bool;
}

impl<F> CoreModules for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_core_module(&self, name: &str) -> bool {
        self(name)
    }
}

/// Node.js built-in modules (sorted, top-level names only).
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Built-ins that only load through the `node:` scheme (`node:test`).
pub const NODE_PREFIX_ONLY_MODULES: &[&str] = &["sea", "sqlite", "test"];

/// URL scheme Node.js reserves for its built-ins.
pub const NODE_SCHEME: &str = "node:";

/// Treats Node.js built-ins (`fs`, `path`, `node:test`, ...) as core modules.
///
/// `fs/promises` style names match on their first segment. Names under the
/// `node:` scheme also match the scheme-only built-ins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeBuiltins;

impl CoreModules for NodeBuiltins {
    fn is_core_module(&self, name: &str) -> bool {
        let (name, scheme) = match name.strip_prefix(NODE_SCHEME) {
            Some(rest) => (rest, true),
            None => (name, false),
        };
        let top = name.split('/').next().unwrap_or(name);
        NODE_BUILTIN_MODULES.binary_search(&top).is_ok()
            || (scheme && NODE_PREFIX_ONLY_MODULES.contains(&top))
    }
}

/// No core modules; every package is looked up on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCoreModules;

impl CoreModules for NoCoreModules {
    fn is_core_module(&self, _name: &str) -> bool {
        false
    }
}
