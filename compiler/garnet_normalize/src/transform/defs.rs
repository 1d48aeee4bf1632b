//! Method and macro definitions.

use garnet_ir::{Def, Node, NodeKind, Span};

use super::Normalizer;
use crate::scope::{Scope, Versions};
use crate::NormalizeResult;

/// Which definition form a [`Def`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DefKind {
    Def,
    Macro,
}

impl DefKind {
    pub(crate) fn wrap(self, def: Def, span: Span) -> Node {
        let def = Box::new(def);
        match self {
            DefKind::Def => Node::new(NodeKind::Def(def), span),
            DefKind::Macro => Node::new(NodeKind::Macro(def), span),
        }
    }
}

impl Normalizer<'_> {
    /// Normalize a definition body in a scope holding only the parameters.
    ///
    /// A definition with default-valued parameters first expands into one
    /// definition per arity.
    pub(super) fn transform_def(
        &mut self,
        def: Def,
        kind: DefKind,
        span: Span,
    ) -> NormalizeResult<Node> {
        if def.has_default_params() {
            let expanded = self.expand_default_params(def, kind, span);
            return self.transform(Node::seq(expanded, span));
        }

        let Def { name, params, body } = def;
        let scope: Scope = params
            .iter()
            .map(|param| (param.name, Versions::FRESH))
            .collect();
        let body = self
            .with_scope(scope, |scoped| scoped.transform_opt(body))?
            .and_then(Node::into_option);

        Ok(kind.wrap(Def { name, params, body }, span))
    }
}
