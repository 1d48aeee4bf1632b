//! Owned syntax tree.
//!
//! The parser produces a tree of [`Node`]s; the normalizer consumes it and
//! returns a new tree restricted to the core vocabulary. Every node owns its
//! children exclusively, so a pass can take a subtree by value, rewrite it,
//! and hand the result back without aliasing the input.
//!
//! # Vocabulary
//!
//! Variants fall into two groups:
//! - **Core**: literals, variable reads, assignments, calls, `If`, `While`,
//!   `Seq`, definitions and terminators. These survive normalization.
//! - **Sugar**: `And`, `Or`, `Unless`, `Case`, `Interpolation`, `Range`,
//!   `Regex`, `Array`, `Hash`, `Require`, and definitions with default
//!   values. Normalization rewrites all of them away.

mod build;

use crate::{GenericTypeId, Name, Span};

/// A syntax tree node with its source location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

/// Node variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Empty result: a sequence with no statements, a resolved `require`.
    Nop,
    Nil,
    Bool(bool),
    Int(i64),
    Str(Name),
    /// Local variable reference. `version` is 0 until normalization.
    Var(Var),
    /// Compiler-synthesized temporary. Never versioned.
    Temp(Name),
    /// Instance variable (`@x`). Never versioned.
    InstanceVar(Name),
    SelfRef,
    /// Constant or type path (`Foo::Bar`, `::Range`).
    Const(Path),
    /// Reference to an interned generic type (`Array(Int32)`).
    Generic(GenericTypeId),

    /// Statement sequence; the value is the last statement's value.
    Seq(Vec<Node>),
    If(Box<If>),
    /// `unless cond then_branch else else_branch`, same shape as `If`.
    Unless(Box<If>),
    While(Box<While>),
    Case(Box<Case>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Return(Option<Box<Node>>),
    Break(Option<Box<Node>>),
    Next(Option<Box<Node>>),

    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    MultiAssign {
        targets: Vec<Node>,
        values: Vec<Node>,
    },

    Call(Box<Call>),
    /// `obj.is_a?(Type)`
    IsA {
        obj: Box<Node>,
        ty: Path,
    },
    Def(Box<Def>),
    Macro(Box<Def>),

    /// `"a#{b}c"`: string pieces and embedded expressions in source order.
    Interpolation(Vec<Node>),
    Range {
        from: Box<Node>,
        to: Box<Node>,
        exclusive: bool,
    },
    /// Regex literal; the payload is the literal source text.
    Regex(Name),
    Array {
        elements: Vec<Node>,
        of: Option<Path>,
    },
    Hash {
        entries: Vec<HashEntry>,
        of: Option<HashOf>,
    },
    /// `require "path"`
    Require(Name),
}

/// Local variable reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Var {
    /// Base name as written in the source.
    pub name: Name,
    /// Version assigned by normalization; 0 prints unsuffixed.
    pub version: u32,
    /// Out-argument position: declares the variable instead of reading it.
    pub out: bool,
}

impl Var {
    pub const fn new(name: Name) -> Self {
        Var {
            name,
            version: 0,
            out: false,
        }
    }

    #[must_use]
    pub const fn with_version(self, version: u32) -> Self {
        Var { version, ..self }
    }
}

/// Constant path: `Foo::Bar` or, with `global`, `::Foo::Bar`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    pub names: Vec<Name>,
    pub global: bool,
}

impl Path {
    /// A single-segment path resolved from the top-level namespace.
    pub fn global(name: Name) -> Self {
        Path {
            names: vec![name],
            global: true,
        }
    }

    pub fn relative(names: Vec<Name>) -> Self {
        Path {
            names,
            global: false,
        }
    }
}

/// Conditional. Also the payload of `Unless`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct If {
    pub cond: Node,
    pub then_branch: Option<Node>,
    pub else_branch: Option<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct While {
    pub cond: Node,
    pub body: Option<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Case {
    pub subject: Node,
    pub whens: Vec<When>,
    pub else_branch: Option<Node>,
}

/// `when c1, c2 then body`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct When {
    pub conds: Vec<Node>,
    pub body: Option<Node>,
}

/// Method call. A missing receiver is an implicit `self` call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Call {
    pub receiver: Option<Node>,
    pub name: Name,
    pub args: Vec<Node>,
    pub block: Option<Block>,
}

/// Block literal passed to a call (`do |a, b| ... end`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub params: Vec<Name>,
    pub body: Option<Node>,
}

/// Method or macro definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Def {
    pub name: Name,
    pub params: Vec<Param>,
    pub body: Option<Node>,
}

impl Def {
    pub fn has_default_params(&self) -> bool {
        self.params.iter().any(|p| p.default.is_some())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: Name,
    pub default: Option<Node>,
}

impl Param {
    pub const fn new(name: Name) -> Self {
        Param {
            name,
            default: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashEntry {
    pub key: Node,
    pub value: Node,
}

/// Explicit `of K => V` annotation on a hash literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HashOf {
    pub key: Path,
    pub value: Path,
}

#[cfg(test)]
mod tests;
