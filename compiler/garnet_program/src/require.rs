//! Require path resolution and load tracking.
//!
//! - Relative: `require "./util"` resolves from the requiring file's directory
//! - Parent: `require "../lib/util"` likewise
//! - Search path: `require "collections"` tries each configured directory in order
//!
//! A missing extension defaults to [`SOURCE_EXTENSION`].

use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::RequireError;

/// Extension appended to require paths that have none.
pub const SOURCE_EXTENSION: &str = "gar";

/// Tracks which files are in flight and which are finished.
///
/// A file is in flight from the moment its require resolves until its
/// normalization completes. Requiring an in-flight file is a cycle.
#[derive(Debug, Default)]
pub(crate) struct RequireTracker {
    loading_stack: Vec<PathBuf>,
    loading_set: FxHashSet<PathBuf>,
    loaded: FxHashSet<PathBuf>,
}

impl RequireTracker {
    pub(crate) fn is_loading(&self, path: &Path) -> bool {
        self.loading_set.contains(path)
    }

    pub(crate) fn is_loaded(&self, path: &Path) -> bool {
        self.loaded.contains(path)
    }

    pub(crate) fn start_loading(&mut self, path: PathBuf) -> Result<(), RequireError> {
        if self.is_loading(&path) {
            let chain = self
                .loading_stack
                .iter()
                .cloned()
                .chain(std::iter::once(path))
                .collect();
            return Err(RequireError::Circular { chain });
        }
        self.loading_set.insert(path.clone());
        self.loading_stack.push(path);
        Ok(())
    }

    /// Move `path` from in flight to loaded.
    pub(crate) fn finish_loading(&mut self, path: &Path) {
        if let Some(pos) = self.loading_stack.iter().rposition(|p| p == path) {
            self.loading_stack.remove(pos);
        }
        self.loading_set.remove(path);
        self.loaded.insert(path.to_path_buf());
    }

    /// Drop `path` from in flight without marking it loaded.
    pub(crate) fn abort_loading(&mut self, path: &Path) {
        if let Some(pos) = self.loading_stack.iter().rposition(|p| p == path) {
            self.loading_stack.remove(pos);
        }
        self.loading_set.remove(path);
    }
}

/// Candidate files for `requested`, in lookup order.
pub(crate) fn candidates(
    requested: &str,
    requesting_file: Option<&Path>,
    search_paths: &[PathBuf],
) -> Vec<PathBuf> {
    if is_relative(requested) {
        let base = requesting_file
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new(""));
        vec![with_source_extension(&normalize_path(&base.join(requested)))]
    } else {
        search_paths
            .iter()
            .map(|dir| with_source_extension(&normalize_path(&dir.join(requested))))
            .collect()
    }
}

fn is_relative(requested: &str) -> bool {
    requested.starts_with("./") || requested.starts_with("../")
}

fn with_source_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(SOURCE_EXTENSION)
    }
}

/// Lexically resolve `.` and `..` so one file has one key.
///
/// A `..` with no preceding normal component is kept.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relative_requires_resolve_from_requesting_directory() {
        let found = candidates("./util", Some(Path::new("src/main.gar")), &[]);
        assert_eq!(found, vec![PathBuf::from("src/util.gar")]);

        let found = candidates("../lib/util", Some(Path::new("src/app/main.gar")), &[]);
        assert_eq!(found, vec![PathBuf::from("src/lib/util.gar")]);
    }

    #[test]
    fn explicit_extension_is_kept() {
        let found = candidates("./data.cr", Some(Path::new("main.gar")), &[]);
        assert_eq!(found, vec![PathBuf::from("data.cr")]);
    }

    #[test]
    fn search_paths_are_tried_in_order() {
        let search = vec![PathBuf::from("/std"), PathBuf::from("/vendor")];
        let found = candidates("json", None, &search);
        assert_eq!(
            found,
            vec![PathBuf::from("/std/json.gar"), PathBuf::from("/vendor/json.gar")]
        );
    }

    #[test]
    fn normalize_path_resolves_dots() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c.gar")),
            PathBuf::from("/a/c.gar")
        );
        assert_eq!(normalize_path(Path::new("../x.gar")), PathBuf::from("../x.gar"));
        assert_eq!(normalize_path(Path::new("/../x.gar")), PathBuf::from("/x.gar"));
    }

    #[test]
    fn tracker_detects_cycles() {
        let mut tracker = RequireTracker::default();
        let a = PathBuf::from("/a.gar");
        let b = PathBuf::from("/b.gar");

        assert!(tracker.start_loading(a.clone()).is_ok());
        assert!(tracker.start_loading(b.clone()).is_ok());
        assert_eq!(
            tracker.start_loading(a.clone()),
            Err(RequireError::Circular {
                chain: vec![a.clone(), b.clone(), a.clone()]
            })
        );

        tracker.finish_loading(&b);
        assert!(!tracker.is_loading(&b));
        assert!(tracker.is_loaded(&b));
        assert!(tracker.is_loading(&a));
    }

    #[test]
    fn aborted_file_is_neither_loading_nor_loaded() {
        let mut tracker = RequireTracker::default();
        let a = PathBuf::from("/a.gar");
        assert!(tracker.start_loading(a.clone()).is_ok());
        tracker.abort_loading(&a);
        assert!(!tracker.is_loading(&a));
        assert!(!tracker.is_loaded(&a));
    }
}
