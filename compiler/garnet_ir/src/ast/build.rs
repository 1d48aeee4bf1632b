//! Node constructors and shape queries.
//!
//! Used by the parser, by desugaring rules to synthesize replacement nodes,
//! and by tests to spell out trees.

use super::{Block, Call, If, Node, NodeKind, Path, Var, While};
use crate::{Name, Span};

impl Node {
    #[inline]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    pub const fn nop(span: Span) -> Self {
        Node::new(NodeKind::Nop, span)
    }

    pub const fn nil(span: Span) -> Self {
        Node::new(NodeKind::Nil, span)
    }

    pub const fn int(value: i64, span: Span) -> Self {
        Node::new(NodeKind::Int(value), span)
    }

    pub const fn bool(value: bool, span: Span) -> Self {
        Node::new(NodeKind::Bool(value), span)
    }

    pub const fn str(text: Name, span: Span) -> Self {
        Node::new(NodeKind::Str(text), span)
    }

    /// Unversioned read of a local variable.
    pub const fn var(name: Name, span: Span) -> Self {
        Node::new(NodeKind::Var(Var::new(name)), span)
    }

    pub const fn temp(name: Name, span: Span) -> Self {
        Node::new(NodeKind::Temp(name), span)
    }

    /// `::Name`
    pub fn global_const(name: Name, span: Span) -> Self {
        Node::new(NodeKind::Const(Path::global(name)), span)
    }

    pub fn seq(stmts: Vec<Node>, span: Span) -> Self {
        Node::new(NodeKind::Seq(stmts), span)
    }

    pub fn if_(cond: Node, then_branch: Option<Node>, else_branch: Option<Node>, span: Span) -> Self {
        Node::new(
            NodeKind::If(Box::new(If {
                cond,
                then_branch,
                else_branch,
            })),
            span,
        )
    }

    pub fn while_(cond: Node, body: Option<Node>, span: Span) -> Self {
        Node::new(NodeKind::While(Box::new(While { cond, body })), span)
    }

    pub fn call(receiver: Option<Node>, name: Name, args: Vec<Node>, span: Span) -> Self {
        Node::new(
            NodeKind::Call(Box::new(Call {
                receiver,
                name,
                args,
                block: None,
            })),
            span,
        )
    }

    pub fn call_with_block(
        receiver: Option<Node>,
        name: Name,
        args: Vec<Node>,
        block: Block,
        span: Span,
    ) -> Self {
        Node::new(
            NodeKind::Call(Box::new(Call {
                receiver,
                name,
                args,
                block: Some(block),
            })),
            span,
        )
    }

    pub fn assign(target: Node, value: Node, span: Span) -> Self {
        Node::new(
            NodeKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        )
    }

    pub fn ret(value: Option<Node>, span: Span) -> Self {
        Node::new(NodeKind::Return(value.map(Box::new)), span)
    }

    // Queries

    pub fn is_nop(&self) -> bool {
        matches!(self.kind, NodeKind::Nop)
    }

    /// `return`, `break` or `next`.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Return(_) | NodeKind::Break(_) | NodeKind::Next(_)
        )
    }

    /// The variable if this node is a plain (non-out) variable read.
    pub fn as_plain_var(&self) -> Option<&Var> {
        match &self.kind {
            NodeKind::Var(var) if !var.out => Some(var),
            _ => None,
        }
    }

    /// Evaluating this node has no effect and reads no mutable state other
    /// than an already-versioned variable, so it can be reordered after
    /// assignments to other versions.
    pub fn is_pure(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Nil
                | NodeKind::Bool(_)
                | NodeKind::Int(_)
                | NodeKind::Str(_)
                | NodeKind::Var(_)
                | NodeKind::Temp(_)
                | NodeKind::SelfRef
                | NodeKind::Const(_)
                | NodeKind::Generic(_)
        )
    }

    /// Convert an empty result into `None`.
    pub fn into_option(self) -> Option<Node> {
        if self.is_nop() {
            None
        } else {
            Some(self)
        }
    }
}
