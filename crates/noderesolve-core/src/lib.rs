#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Node-style module resolution.
//!
//! Turns an import/require specifier plus a base directory into a file path,
//! following `package.json` `exports`/`imports` maps, main fields, ancestor
//! `node_modules` directories and extension probing. Filesystem and path
//! access go through the capability traits in [`fs`], so hosts can plug in
//! their own backends.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod resolver;
pub mod specifier;
pub mod subpath;

pub use config::ResolverConfig;
pub use core_modules::{CoreModules, NoCoreModules, NodeBuiltins};
pub use error::Error;
pub use fs::{FileSystem, MemoryFs, Metadata, OsFs, OsPath, PathOps, PosixPath};
pub use manifest::Manifest;
pub use resolver::{find_manifest, find_up, modules_paths, resolve, ResolveContext};
pub use specifier::Specifier;
pub use subpath::{
    normalize_entry, MatchKind, Mapping, MappingValue, SubpathResolver, WildcardMatch, WILDCARD,
};
