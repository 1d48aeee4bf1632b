//! String interpolation.

use garnet_ir::{Node, Span};

use crate::transform::Normalizer;

impl Normalizer<'_> {
    /// `"a#{b}c"` becomes `::StringBuilder.new << "a" << b << "c"` followed
    /// by `.to_s`.
    pub(crate) fn desugar_interpolation(&self, pieces: Vec<Node>, span: Span) -> Node {
        let builder = Node::global_const(self.name_string_builder, span);
        let mut call = Node::call(Some(builder), self.name_new, Vec::new(), span);
        for piece in pieces {
            call = Node::call(Some(call), self.name_append, vec![piece], span);
        }
        Node::call(Some(call), self.name_to_s, Vec::new(), span)
    }
}
