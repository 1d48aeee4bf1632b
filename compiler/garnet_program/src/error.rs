//! Require resolution errors.

use std::path::PathBuf;

use thiserror::Error;

/// A `require` that cannot be satisfied. Always a fatal compilation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequireError {
    /// No candidate path exists.
    #[error("can't find file '{path}'{}", requested_from_suffix(.requested_from.as_ref()))]
    NotFound {
        path: String,
        requested_from: Option<PathBuf>,
    },
    /// The file is already being normalized further up the require chain.
    #[error("circular require detected: {}", format_chain(.chain))]
    Circular { chain: Vec<PathBuf> },
    /// The loader found the file but could not produce a tree for it.
    #[error("failed to load '{}': {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

fn requested_from_suffix(from: Option<&PathBuf>) -> String {
    from.map(|p| format!(" (required from '{}')", p.display()))
        .unwrap_or_default()
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
