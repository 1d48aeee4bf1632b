//! `&&` and `||`.

use garnet_ir::{Node, NodeKind, Span};

use crate::transform::Normalizer;

impl Normalizer<'_> {
    /// `a && b` becomes `if a; b; else; a; end`.
    ///
    /// `a` is evaluated twice only when that is harmless: a variable read or
    /// a type test on one. Otherwise it is saved in a temporary.
    pub(crate) fn desugar_and(&mut self, left: Node, right: Node, span: Span) -> Node {
        let reusable = match &left.kind {
            NodeKind::IsA { obj, .. } => obj.as_plain_var().is_some(),
            _ => left.as_plain_var().is_some(),
        };

        if reusable {
            let otherwise = left.clone();
            return Node::if_(left, Some(right), Some(otherwise), span);
        }

        let (cond, temp) = self.save_in_temp(left);
        Node::if_(cond, Some(right), Some(temp), span)
    }

    /// `a || b` becomes `if a; a; else; b; end`, with a temporary unless `a`
    /// is a variable read.
    pub(crate) fn desugar_or(&mut self, left: Node, right: Node, span: Span) -> Node {
        if left.as_plain_var().is_some() {
            let value = left.clone();
            return Node::if_(left, Some(value), Some(right), span);
        }

        let (cond, temp) = self.save_in_temp(left);
        Node::if_(cond, Some(temp), Some(right), span)
    }

    /// `(#temp_n = value, #temp_n)`
    pub(crate) fn save_in_temp(&mut self, value: Node) -> (Node, Node) {
        let span = value.span;
        let temp = self.program.allocate_temp_name();
        (
            Node::assign(Node::temp(temp, span), value, span),
            Node::temp(temp, span),
        )
    }
}
