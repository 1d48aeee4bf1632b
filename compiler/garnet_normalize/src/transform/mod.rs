//! The normalizing transformer.
//!
//! A single depth-first traversal that consumes each node and returns its
//! normalized replacement. The traversal is split by concern:
//! - `sequences`: statement lists, dead-code truncation, bridge insertion
//! - `control`: `if` and `while` with their scope merges
//! - `variables`: reads, assignments, multi-assignments
//! - `calls`: calls and their blocks
//! - `defs`: method and macro definitions
//! - `require`: splicing in required files
//!
//! The desugaring rules live in [`crate::desugar`] as further
//! `impl Normalizer` blocks.

mod calls;
mod control;
mod defs;
mod require;
mod scope_guard;
mod sequences;
mod variables;

use std::path::PathBuf;

use garnet_ir::stack::ensure_sufficient_stack;
use garnet_ir::{HashEntry, If, Name, Node, NodeKind};
use garnet_program::Program;

use crate::scope::Scope;
use crate::NormalizeResult;

pub(crate) use defs::DefKind;

/// How a node affects reachability of the statements after it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    /// `return`, `break`, `next`: nothing after it runs.
    Terminates,
    /// Keeps whatever its last transformed child decided.
    Transparent,
    /// Execution always continues.
    Continues,
}

impl Flow {
    fn of(kind: &NodeKind) -> Flow {
        match kind {
            NodeKind::Return(_) | NodeKind::Break(_) | NodeKind::Next(_) => Flow::Terminates,
            NodeKind::If(_)
            | NodeKind::Unless(_)
            | NodeKind::Case(_)
            | NodeKind::And(..)
            | NodeKind::Or(..)
            | NodeKind::Seq(_) => Flow::Transparent,
            _ => Flow::Continues,
        }
    }
}

/// State of one normalization run.
///
/// Holds the program registry, the active variable scope, and the dead-code
/// flag read by the enclosing statement sequence.
pub(crate) struct Normalizer<'p> {
    /// Temporaries, constants, generic types, requires.
    /// Accessed by: transform, desugar
    pub(crate) program: &'p mut Program,
    /// Versions of the variables visible at the current point.
    pub(crate) scope: Scope,
    /// Set when the last transformed node ends its statement sequence.
    pub(crate) dead: bool,
    /// File whose tree is being normalized; relative requires resolve
    /// against it.
    pub(crate) current_file: Option<PathBuf>,

    // Pre-interned names for desugaring.
    // Accessed by: desugar
    pub(crate) name_new: Name,
    pub(crate) name_to_s: Name,
    pub(crate) name_append: Name,
    pub(crate) name_case_eq: Name,
    pub(crate) name_index_set: Name,
    pub(crate) name_buffer: Name,
    pub(crate) name_set_length: Name,

    // Pre-interned type names.
    pub(crate) name_array: Name,
    pub(crate) name_hash: Name,
    pub(crate) name_range: Name,
    pub(crate) name_string_builder: Name,
}

impl<'p> Normalizer<'p> {
    pub(crate) fn new(program: &'p mut Program, current_file: Option<PathBuf>) -> Self {
        let interner = program.interner();
        let name_new = interner.intern("new");
        let name_to_s = interner.intern("to_s");
        let name_append = interner.intern("<<");
        let name_case_eq = interner.intern("===");
        let name_index_set = interner.intern("[]=");
        let name_buffer = interner.intern("buffer");
        let name_set_length = interner.intern("length=");
        let name_array = interner.intern("Array");
        let name_hash = interner.intern("Hash");
        let name_range = interner.intern("Range");
        let name_string_builder = interner.intern("StringBuilder");

        Normalizer {
            program,
            scope: Scope::new(),
            dead: false,
            current_file,
            name_new,
            name_to_s,
            name_append,
            name_case_eq,
            name_index_set,
            name_buffer,
            name_set_length,
            name_array,
            name_hash,
            name_range,
            name_string_builder,
        }
    }

    /// Normalize `node`, then update the dead-code flag from its kind.
    pub(crate) fn transform(&mut self, node: Node) -> NormalizeResult<Node> {
        ensure_sufficient_stack(|| {
            let flow = Flow::of(&node.kind);
            self.dead = false;
            let node = self.transform_kind(node)?;
            match flow {
                Flow::Terminates => self.dead = true,
                Flow::Transparent => {}
                Flow::Continues => self.dead = false,
            }
            Ok(node)
        })
    }

    pub(crate) fn transform_opt(&mut self, node: Option<Node>) -> NormalizeResult<Option<Node>> {
        node.map(|node| self.transform(node)).transpose()
    }

    pub(crate) fn transform_all(&mut self, nodes: Vec<Node>) -> NormalizeResult<Vec<Node>> {
        nodes.into_iter().map(|node| self.transform(node)).collect()
    }

    fn transform_boxed(&mut self, node: Option<Box<Node>>) -> NormalizeResult<Option<Box<Node>>> {
        node.map(|node| self.transform(*node).map(Box::new))
            .transpose()
    }

    fn transform_kind(&mut self, node: Node) -> NormalizeResult<Node> {
        let Node { kind, span } = node;
        match kind {
            NodeKind::Nop
            | NodeKind::Nil
            | NodeKind::Bool(_)
            | NodeKind::Int(_)
            | NodeKind::Str(_)
            | NodeKind::Temp(_)
            | NodeKind::InstanceVar(_)
            | NodeKind::SelfRef
            | NodeKind::Const(_)
            | NodeKind::Generic(_) => Ok(Node::new(kind, span)),
            NodeKind::Var(var) => self.transform_var(var, span),

            NodeKind::Seq(stmts) => self.transform_seq(stmts, span),
            NodeKind::If(if_) => self.transform_if(*if_, span),
            NodeKind::Unless(unless) => {
                let If {
                    cond,
                    then_branch,
                    else_branch,
                } = *unless;
                self.transform_if(
                    If {
                        cond,
                        then_branch: else_branch,
                        else_branch: then_branch,
                    },
                    span,
                )
            }
            NodeKind::While(while_) => self.transform_while(*while_, span),
            NodeKind::Case(case) => {
                let node = self.desugar_case(*case, span);
                self.transform(node)
            }
            NodeKind::And(left, right) => {
                let node = self.desugar_and(*left, *right, span);
                self.transform(node)
            }
            NodeKind::Or(left, right) => {
                let node = self.desugar_or(*left, *right, span);
                self.transform(node)
            }
            NodeKind::Return(value) => Ok(Node::new(
                NodeKind::Return(self.transform_boxed(value)?),
                span,
            )),
            NodeKind::Break(value) => Ok(Node::new(
                NodeKind::Break(self.transform_boxed(value)?),
                span,
            )),
            NodeKind::Next(value) => Ok(Node::new(
                NodeKind::Next(self.transform_boxed(value)?),
                span,
            )),

            NodeKind::Assign { target, value } => self.transform_assign(*target, *value, span),
            NodeKind::MultiAssign { targets, values } => {
                self.transform_multi_assign(targets, values, span)
            }

            NodeKind::Call(call) => self.transform_call(*call, span),
            NodeKind::IsA { obj, ty } => Ok(Node::new(
                NodeKind::IsA {
                    obj: Box::new(self.transform(*obj)?),
                    ty,
                },
                span,
            )),
            NodeKind::Def(def) => self.transform_def(*def, DefKind::Def, span),
            NodeKind::Macro(def) => self.transform_def(*def, DefKind::Macro, span),

            NodeKind::Interpolation(pieces) => {
                let pieces = self.transform_all(pieces)?;
                Ok(self.desugar_interpolation(pieces, span))
            }
            NodeKind::Range {
                from,
                to,
                exclusive,
            } => {
                let from = self.transform(*from)?;
                let to = self.transform(*to)?;
                Ok(self.desugar_range(from, to, exclusive, span))
            }
            NodeKind::Regex(text) => Ok(self.desugar_regex(text, span)),
            NodeKind::Array { elements, of } => {
                let elements = self.transform_all(elements)?;
                Ok(self.desugar_array(elements, of, span))
            }
            NodeKind::Hash { entries, of } => {
                let entries = entries
                    .into_iter()
                    .map(|HashEntry { key, value }| {
                        Ok(HashEntry {
                            key: self.transform(key)?,
                            value: self.transform(value)?,
                        })
                    })
                    .collect::<NormalizeResult<Vec<_>>>()?;
                Ok(self.desugar_hash(entries, of, span))
            }
            NodeKind::Require(path) => self.transform_require(path, span),
        }
    }
}

#[cfg(test)]
mod tests;
