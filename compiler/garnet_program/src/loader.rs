//! Source loaders: how a resolved require path becomes a syntax tree.
//!
//! Parsing is not this crate's concern. [`FsLoader`] reads files from disk
//! and hands the text to a caller-supplied parse function; [`MemoryLoader`]
//! serves trees the caller already built.

use std::path::{Path, PathBuf};

use garnet_ir::{Node, SharedInterner};
use rustc_hash::FxHashMap;

/// Produces the syntax tree for a required file.
pub trait SourceLoader {
    /// Whether `path` names a loadable file.
    fn exists(&self, path: &Path) -> bool;

    /// Load and parse `path`. Names must be interned in `interner`.
    fn load(&self, path: &Path, interner: &SharedInterner) -> Result<Node, String>;
}

/// Loader over pre-built trees, keyed by path.
#[derive(Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, Node>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `root` as the tree of `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, root: Node) {
        self.files.insert(path.into(), root);
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, root: Node) -> Self {
        self.insert(path, root);
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn load(&self, path: &Path, _interner: &SharedInterner) -> Result<Node, String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no tree registered for '{}'", path.display()))
    }
}

/// Loader that reads files from disk and parses them with `parse`.
pub struct FsLoader<F> {
    parse: F,
}

impl<F> FsLoader<F>
where
    F: Fn(&str, &Path, &SharedInterner) -> Result<Node, String>,
{
    pub fn new(parse: F) -> Self {
        FsLoader { parse }
    }
}

impl<F> SourceLoader for FsLoader<F>
where
    F: Fn(&str, &Path, &SharedInterner) -> Result<Node, String>,
{
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path, interner: &SharedInterner) -> Result<Node, String> {
        let source = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        (self.parse)(&source, path, interner)
    }
}
