//! Normalization errors.

use garnet_ir::Span;
use garnet_program::RequireError;
use thiserror::Error;

/// Result of a normalization step.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// A failure that aborts normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A variable was read where no version of it is visible.
    ///
    /// Binding validation runs before normalization, so this is a compiler
    /// bug rather than a user error.
    #[error("internal compiler error: read of '{name}' at {span} has no visible version")]
    UnboundVariable { name: String, span: Span },
    /// A `require` could not be satisfied.
    #[error(transparent)]
    Require(#[from] RequireError),
}

impl NormalizeError {
    /// Whether this error indicates a bug in an earlier compiler stage
    /// rather than a problem with the user's program.
    pub fn is_internal(&self) -> bool {
        matches!(self, NormalizeError::UnboundVariable { .. })
    }
}
