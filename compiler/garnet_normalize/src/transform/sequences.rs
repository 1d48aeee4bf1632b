//! Statement sequences: flattening, dead-code truncation, and appending
//! bridging assignments to branch and loop bodies.

use garnet_ir::{Node, NodeKind, Span};
use tracing::trace;

use super::Normalizer;
use crate::merge::Bridge;
use crate::NormalizeResult;

impl Normalizer<'_> {
    /// Normalize each statement, splicing nested sequences and dropping empty
    /// results. Stops after the first statement that makes the rest
    /// unreachable.
    pub(super) fn transform_seq(&mut self, stmts: Vec<Node>, span: Span) -> NormalizeResult<Node> {
        let total = stmts.len();
        let mut out = Vec::with_capacity(total);

        for (i, stmt) in stmts.into_iter().enumerate() {
            let stmt = self.transform(stmt)?;
            match stmt.kind {
                NodeKind::Nop => {}
                NodeKind::Seq(inner) => out.extend(inner),
                _ => out.push(stmt),
            }
            if self.dead {
                let dropped = total - i - 1;
                if dropped > 0 {
                    trace!(dropped, "truncated unreachable statements");
                }
                break;
            }
        }

        Ok(collapse(out, span))
    }

    /// Append `bridges` to a branch whose value is used.
    ///
    /// The branch keeps its value: a pure final expression moves after the
    /// bridges, anything else is saved in a temporary first. An absent branch
    /// becomes `bridges; nil`.
    pub(crate) fn append_bridges(
        &mut self,
        branch: Option<Node>,
        bridges: &[Bridge],
        span: Span,
    ) -> Option<Node> {
        if bridges.is_empty() {
            return branch;
        }
        let assigns = self.bridge_nodes(bridges, span);

        let mut stmts = branch.map(into_statements).unwrap_or_default();
        let value = match stmts.pop() {
            Some(last) if last.is_pure() => last,
            Some(last) => {
                let temp = self.program.allocate_temp_name();
                let last_span = last.span;
                stmts.push(Node::assign(Node::temp(temp, last_span), last, last_span));
                Node::temp(temp, last_span)
            }
            None => Node::nil(span),
        };
        stmts.extend(assigns);
        stmts.push(value);
        Some(Node::seq(stmts, span))
    }

    /// Append `bridges` to a loop body, whose value is discarded.
    pub(crate) fn append_loop_bridges(
        &self,
        body: Option<Node>,
        bridges: &[Bridge],
        span: Span,
    ) -> Option<Node> {
        if bridges.is_empty() {
            return body;
        }
        let mut stmts = body.map(into_statements).unwrap_or_default();
        stmts.extend(self.bridge_nodes(bridges, span));
        Some(collapse(stmts, span))
    }

    fn bridge_nodes(&self, bridges: &[Bridge], span: Span) -> Vec<Node> {
        bridges
            .iter()
            .map(|bridge| {
                trace!(
                    var = self.program.interner().lookup(bridge.name),
                    to = bridge.to,
                    from = ?bridge.from,
                    "bridge"
                );
                bridge.to_node(span)
            })
            .collect()
    }
}

/// The statements of a normalized node: a sequence's children, or the
/// node itself.
fn into_statements(node: Node) -> Vec<Node> {
    match node.kind {
        NodeKind::Seq(stmts) => stmts,
        NodeKind::Nop => Vec::new(),
        kind => vec![Node::new(kind, node.span)],
    }
}

/// Zero statements are `Nop`, one is itself, more are a sequence.
fn collapse(stmts: Vec<Node>, span: Span) -> Node {
    match <[Node; 1]>::try_from(stmts) {
        Ok([only]) => only,
        Err(stmts) if stmts.is_empty() => Node::nop(span),
        Err(stmts) => Node::seq(stmts, span),
    }
}
