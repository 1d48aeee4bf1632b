//! Variable reads and writes.

use std::collections::btree_map::Entry;

use garnet_ir::{Node, NodeKind, Span, Var};

use super::Normalizer;
use crate::scope::{Scope, Versions};
use crate::{NormalizeError, NormalizeResult};

impl Normalizer<'_> {
    /// Resolve a read to the version visible in the active scope.
    ///
    /// An `out` variable is a declaration rather than a read.
    pub(super) fn transform_var(&mut self, var: Var, span: Span) -> NormalizeResult<Node> {
        if var.out {
            let var = self.version_write(var);
            return Ok(Node::new(NodeKind::Var(var), span));
        }

        // A known variable with no version reaching this path reads the
        // unsuffixed version.
        match self.scope.get(&var.name) {
            Some(versions) => {
                let version = versions.read.unwrap_or(0);
                Ok(Node::new(NodeKind::Var(var.with_version(version)), span))
            }
            None => Err(NormalizeError::UnboundVariable {
                name: self.program.interner().lookup(var.name).to_owned(),
                span,
            }),
        }
    }

    /// Create the next version of `var` and return it as the write target.
    ///
    /// The first write of a variable is version 0.
    fn version_write(&mut self, var: Var) -> Var {
        let version = match self.scope.entry(var.name) {
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                entry.insert(current.advanced());
                current.write
            }
            Entry::Vacant(entry) => {
                entry.insert(Versions::FRESH);
                0
            }
        };
        var.with_version(version)
    }

    /// `target = value`. The value is normalized before the target is
    /// versioned, so `x = x + 1` reads the old version.
    ///
    /// A constant's initializer is normalized in an empty scope of its own.
    pub(super) fn transform_assign(
        &mut self,
        target: Node,
        value: Node,
        span: Span,
    ) -> NormalizeResult<Node> {
        let value = if matches!(target.kind, NodeKind::Const(_)) {
            self.with_scope(Scope::new(), |scoped| scoped.transform(value))?
        } else {
            self.transform(value)?
        };
        let target = self.transform_target(target)?;
        Ok(Node::assign(target, value, span))
    }

    /// `a, b = x, y`: every value first, then the targets in order.
    pub(super) fn transform_multi_assign(
        &mut self,
        targets: Vec<Node>,
        values: Vec<Node>,
        span: Span,
    ) -> NormalizeResult<Node> {
        let values = self.transform_all(values)?;
        let targets = targets
            .into_iter()
            .map(|target| self.transform_target(target))
            .collect::<NormalizeResult<Vec<_>>>()?;
        Ok(Node::new(NodeKind::MultiAssign { targets, values }, span))
    }

    fn transform_target(&mut self, target: Node) -> NormalizeResult<Node> {
        let Node { kind, span } = target;
        match kind {
            NodeKind::Var(var) => Ok(Node::new(NodeKind::Var(self.version_write(var)), span)),
            NodeKind::Temp(_) | NodeKind::InstanceVar(_) | NodeKind::Const(_) => {
                Ok(Node::new(kind, span))
            }
            // Attribute targets such as `a.b = c` only read their receiver.
            kind => self.transform(Node::new(kind, span)),
        }
    }
}
