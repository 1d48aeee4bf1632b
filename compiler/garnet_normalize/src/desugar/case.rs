//! `case`/`when`.

use garnet_ir::{Case, Node, NodeKind, Span, When};

use crate::transform::Normalizer;

impl Normalizer<'_> {
    /// Rewrite a `case` into a chain of `if`s.
    ///
    /// ```text
    /// case v                     if (1 === v) || (2 === v)
    /// when 1, 2 then a     =>      a
    /// when 3 then b              else
    /// else c                       if 3 === v
    /// end                            b
    ///                              else
    ///                                c
    ///                              end
    ///                            end
    /// ```
    ///
    /// A subject that is not a variable or instance variable is evaluated
    /// once into a temporary ahead of the chain.
    pub(crate) fn desugar_case(&mut self, case: Case, span: Span) -> Node {
        let Case {
            subject,
            whens,
            else_branch,
        } = case;

        let (prelude, scrutinee) = match subject.kind {
            NodeKind::Var(var) if !var.out => (None, subject),
            NodeKind::InstanceVar(_) => (None, subject),
            _ => {
                let (assign, temp) = self.save_in_temp(subject);
                (Some(assign), temp)
            }
        };

        let mut chain = else_branch;
        for When { conds, body } in whens.into_iter().rev() {
            let cond = conds
                .into_iter()
                .map(|pattern| {
                    let pattern_span = pattern.span;
                    Node::call(
                        Some(pattern),
                        self.name_case_eq,
                        vec![scrutinee.clone()],
                        pattern_span,
                    )
                })
                .reduce(|acc, test| {
                    let or_span = acc.span.merge(test.span);
                    Node::new(NodeKind::Or(Box::new(acc), Box::new(test)), or_span)
                })
                .unwrap_or_else(|| Node::bool(false, span));
            chain = Some(Node::if_(cond, body, chain, span));
        }
        let chain = chain.unwrap_or_else(|| Node::nil(span));

        match prelude {
            Some(assign) => Node::seq(vec![assign, chain], span),
            None => chain,
        }
    }
}
