//! Filesystem and path capabilities used by the resolver.
//!
//! The resolver never touches `std::fs` directly. Production code passes
//! [`OsFs`] and [`OsPath`]; tests and embedders can pass [`MemoryFs`] and
//! [`PosixPath`] for a deterministic, platform-independent tree.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// Subset of file metadata the resolver looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Metadata {
    #[must_use]
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

/// Read-only filesystem access.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Metadata for `path`, or an error if it does not exist or cannot be read.
    fn stat(&self, path: &str) -> io::Result<Metadata>;

    /// Full contents of the file at `path`.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// String path manipulation following the host's conventions.
pub trait PathOps: Send + Sync + std::fmt::Debug {
    /// Parent directory. The root is its own parent.
    fn dir(&self, path: &str) -> String;

    /// Join parts and lexically clean the result (`.` and `..` folded).
    /// An absolute part restarts the path.
    fn join(&self, parts: &[&str]) -> String;
}

// =============================================================================
// OS backend
// =============================================================================

/// Filesystem backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn stat(&self, path: &str) -> io::Result<Metadata> {
        let meta = std::fs::metadata(path)?;
        Ok(Metadata {
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Path operations backed by `std::path` (platform separators).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPath;

impl PathOps for OsPath {
    fn dir(&self, path: &str) -> String {
        match Path::new(path).parent() {
            Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
            Some(parent) => parent.to_string_lossy().into_owned(),
            None if path.is_empty() => ".".to_string(),
            None => path.to_string(),
        }
    }

    fn join(&self, parts: &[&str]) -> String {
        let mut joined = PathBuf::new();
        for part in parts.iter().filter(|p| !p.is_empty()) {
            joined.push(part);
        }
        clean_os_path(&joined).to_string_lossy().into_owned()
    }
}

/// Lexically normalize a path without touching the filesystem.
fn clean_os_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut normal_depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_depth > 0 {
                    out.pop();
                    normal_depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(segment) => {
                out.push(segment);
                normal_depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

// =============================================================================
// POSIX string paths
// =============================================================================

/// `/`-separated path operations, independent of the host platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixPath;

impl PathOps for PosixPath {
    fn dir(&self, path: &str) -> String {
        let cleaned = clean_posix_path(path);
        match cleaned.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => cleaned[..idx].to_string(),
            None => ".".to_string(),
        }
    }

    fn join(&self, parts: &[&str]) -> String {
        let mut joined = String::new();
        for part in parts.iter().filter(|p| !p.is_empty()) {
            if part.starts_with('/') {
                joined.clear();
            } else if !joined.is_empty() && !joined.ends_with('/') {
                joined.push('/');
            }
            joined.push_str(part);
        }
        clean_posix_path(&joined)
    }
}

/// Lexically clean a `/`-separated path.
fn clean_posix_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

// =============================================================================
// In-memory backend
// =============================================================================

#[derive(Debug, Clone)]
enum MemoryNode {
    File(Vec<u8>),
    Dir,
}

/// In-memory directory tree with `/`-separated paths.
///
/// Built up front with [`MemoryFs::with_file`] and [`MemoryFs::with_dir`];
/// parent directories are created implicitly. Pair it with [`PosixPath`].
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<String, MemoryNode>,
}

impl MemoryFs {
    #[must_use]
    pub fn new() -> Self {
        let mut fs = Self::default();
        fs.nodes.insert("/".to_string(), MemoryNode::Dir);
        fs
    }

    /// Add a file (and its parent directories).
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        let path = clean_posix_path(path);
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::File(contents.into()));
        self
    }

    /// Add a directory (and its parents).
    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        let path = clean_posix_path(path);
        self.add_parents(&path);
        self.nodes.insert(path, MemoryNode::Dir);
        self
    }

    fn add_parents(&mut self, path: &str) {
        let mut current = PosixPath.dir(path);
        loop {
            self.nodes
                .entry(current.clone())
                .or_insert(MemoryNode::Dir);
            let parent = PosixPath.dir(&current);
            if parent == current {
                break;
            }
            current = parent;
        }
    }

    fn node(&self, path: &str) -> io::Result<&MemoryNode> {
        self.nodes
            .get(&clean_posix_path(path))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{path}: not found")))
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &str) -> io::Result<Metadata> {
        Ok(match self.node(path)? {
            MemoryNode::File(contents) => Metadata {
                is_dir: false,
                size: contents.len() as u64,
                modified: None,
            },
            MemoryNode::Dir => Metadata {
                is_dir: true,
                size: 0,
                modified: None,
            },
        })
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        match self.node(path)? {
            MemoryNode::File(contents) => Ok(contents.clone()),
            MemoryNode::Dir => Err(io::Error::other(format!("{path}: is a directory"))),
        }
    }
}
