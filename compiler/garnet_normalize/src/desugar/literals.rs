//! Range, regex, array and hash literals.

use garnet_ir::{HashEntry, HashOf, Name, Node, NodeKind, Path, Span, TypeArg};

use crate::transform::Normalizer;

/// Smallest buffer an array literal allocates.
const MIN_ARRAY_CAPACITY: usize = 16;

/// Buffer capacity for an array literal of `len` elements.
fn array_capacity(len: usize) -> usize {
    if len < MIN_ARRAY_CAPACITY {
        MIN_ARRAY_CAPACITY
    } else {
        len.next_power_of_two()
    }
}

fn int_node(value: usize, span: Span) -> Node {
    Node::int(i64::try_from(value).unwrap_or(i64::MAX), span)
}

impl Normalizer<'_> {
    /// `a..b` becomes `::Range.new(a, b, false)`; `a...b` passes `true`.
    pub(crate) fn desugar_range(&self, from: Node, to: Node, exclusive: bool, span: Span) -> Node {
        Node::call(
            Some(Node::global_const(self.name_range, span)),
            self.name_new,
            vec![from, to, Node::bool(exclusive, span)],
            span,
        )
    }

    /// A regex literal becomes a reference to the program constant holding
    /// the compiled regex. Literals with the same text share a constant.
    pub(crate) fn desugar_regex(&mut self, text: Name, span: Span) -> Node {
        let constant = self.program.intern_regex_constant(text, span);
        Node::new(NodeKind::Const(Path::global(constant)), span)
    }

    /// `[a, b] of T` becomes
    ///
    /// ```text
    /// #temp_1 = Array(T).new(16)
    /// #temp_1.length = 2
    /// #temp_1.buffer[0] = a
    /// #temp_1.buffer[1] = b
    /// #temp_1
    /// ```
    ///
    /// Without `of` the element type is `typeof(a, b)`. `[] of T` is just
    /// `Array(T).new(0)`.
    pub(crate) fn desugar_array(&mut self, elements: Vec<Node>, of: Option<Path>, span: Span) -> Node {
        let arg = match of {
            Some(of) => TypeArg::Named(of),
            None => TypeArg::Merge(elements.clone()),
        };
        let explicit = matches!(arg, TypeArg::Named(_));
        let array = self.program.intern_generic_type(self.name_array, vec![arg]);
        let array = Node::new(NodeKind::Generic(array), span);

        if explicit && elements.is_empty() {
            return Node::call(Some(array), self.name_new, vec![Node::int(0, span)], span);
        }

        let len = elements.len();
        let constructor = Node::call(
            Some(array),
            self.name_new,
            vec![int_node(array_capacity(len), span)],
            span,
        );
        let temp = self.program.allocate_temp_name();

        let mut stmts = Vec::with_capacity(len + 3);
        stmts.push(Node::assign(Node::temp(temp, span), constructor, span));
        stmts.push(Node::call(
            Some(Node::temp(temp, span)),
            self.name_set_length,
            vec![int_node(len, span)],
            span,
        ));
        for (index, element) in elements.into_iter().enumerate() {
            let element_span = element.span;
            let buffer = Node::call(
                Some(Node::temp(temp, element_span)),
                self.name_buffer,
                Vec::new(),
                element_span,
            );
            stmts.push(Node::call(
                Some(buffer),
                self.name_index_set,
                vec![int_node(index, element_span), element],
                element_span,
            ));
        }
        stmts.push(Node::temp(temp, span));
        Node::seq(stmts, span)
    }

    /// `{k => v} of K => V` becomes
    ///
    /// ```text
    /// #temp_1 = Hash(K, V).new
    /// #temp_1[k] = v
    /// #temp_1
    /// ```
    ///
    /// Without `of` the types are `typeof(keys...)` and `typeof(values...)`.
    /// An empty literal is the constructor call alone.
    pub(crate) fn desugar_hash(
        &mut self,
        entries: Vec<HashEntry>,
        of: Option<HashOf>,
        span: Span,
    ) -> Node {
        let args = match of {
            Some(HashOf { key, value }) => vec![TypeArg::Named(key), TypeArg::Named(value)],
            None => {
                let (keys, values) = entries
                    .iter()
                    .map(|entry| (entry.key.clone(), entry.value.clone()))
                    .unzip();
                vec![TypeArg::Merge(keys), TypeArg::Merge(values)]
            }
        };
        let hash = self.program.intern_generic_type(self.name_hash, args);
        let constructor = Node::call(
            Some(Node::new(NodeKind::Generic(hash), span)),
            self.name_new,
            Vec::new(),
            span,
        );

        if entries.is_empty() {
            return constructor;
        }

        let temp = self.program.allocate_temp_name();
        let mut stmts = Vec::with_capacity(entries.len() + 2);
        stmts.push(Node::assign(Node::temp(temp, span), constructor, span));
        for HashEntry { key, value } in entries {
            let entry_span = key.span.merge(value.span);
            stmts.push(Node::call(
                Some(Node::temp(temp, entry_span)),
                self.name_index_set,
                vec![key, value],
                entry_span,
            ));
        }
        stmts.push(Node::temp(temp, span));
        Node::seq(stmts, span)
    }
}

#[cfg(test)]
mod tests {
    use super::array_capacity;

    #[test]
    fn capacity_is_at_least_sixteen() {
        assert_eq!(array_capacity(0), 16);
        assert_eq!(array_capacity(3), 16);
        assert_eq!(array_capacity(16), 16);
    }

    #[test]
    fn capacity_rounds_up_to_a_power_of_two() {
        assert_eq!(array_capacity(17), 32);
        assert_eq!(array_capacity(64), 64);
        assert_eq!(array_capacity(100), 128);
    }
}
