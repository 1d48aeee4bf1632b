//! Desugaring rules.
//!
//! Control-flow sugar (`&&`, `||`, `case`) is rewritten before its children
//! are normalized, so the rewritten `if` goes through the ordinary branch
//! merge. Literal sugar is rewritten after its children are normalized and
//! its output is not normalized again.
//!
//! `unless` needs no rule of its own: the transformer swaps its branches and
//! treats it as an `if`.

mod case;
mod defaults;
mod literals;
mod logical;
mod strings;
