//! Garnet IR - syntax tree types shared by the front end and the normalizer.
//!
//! This crate contains the core data structures the normalization pass
//! consumes and produces:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The owned syntax tree (`Node`, `NodeKind`)
//! - The pool of interned generic collection types
//! - A pretty printer for diagnostics and tests
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and literal text are `Name(u32)`
//! - **Own Everything**: every node owns its children; there is no sharing
//!   between the tree a pass receives and the tree it returns
//! - **Closed Variants**: passes match exhaustively on `NodeKind`

pub mod ast;
mod interner;
mod name;
pub mod printer;
mod span;
pub mod stack;
mod types;

pub use ast::{
    Block, Call, Case, Def, HashEntry, HashOf, If, Node, NodeKind, Param, Path, Var, When, While,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use printer::Printer;
pub use span::Span;
pub use types::{GenericType, GenericTypeId, TypeArg, TypePool};
