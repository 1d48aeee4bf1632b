//! Default parameter values.

use garnet_ir::{Def, Node, Param, Span};
use tracing::debug;

use crate::transform::{DefKind, Normalizer};

impl Normalizer<'_> {
    /// Expand a definition with default-valued parameters into one
    /// definition per accepted arity, shortest first.
    ///
    /// Each shorter form forwards to the next longer one, supplying the
    /// next parameter's default:
    ///
    /// ```text
    /// def f(a, b = 1, c = 2)        def f(a)       f(a, 1)       end
    ///   body                  =>    def f(a, b)    f(a, b, 2)    end
    /// end                           def f(a, b, c) body          end
    /// ```
    pub(crate) fn expand_default_params(&self, def: Def, kind: DefKind, span: Span) -> Vec<Node> {
        let Def { name, params, body } = def;
        let required = params
            .iter()
            .position(|param| param.default.is_some())
            .unwrap_or(params.len());
        let stripped: Vec<Param> = params.iter().map(|param| Param::new(param.name)).collect();

        let mut defs = Vec::with_capacity(params.len() - required + 1);
        for arity in required..params.len() {
            let mut args: Vec<Node> = params[..arity]
                .iter()
                .map(|param| Node::var(param.name, span))
                .collect();
            args.push(
                params[arity]
                    .default
                    .clone()
                    .unwrap_or_else(|| Node::nil(span)),
            );
            let forward = Node::call(None, name, args, span);
            defs.push(kind.wrap(
                Def {
                    name,
                    params: stripped[..arity].to_vec(),
                    body: Some(forward),
                },
                span,
            ));
        }
        defs.push(kind.wrap(
            Def {
                name,
                params: stripped,
                body,
            },
            span,
        ));

        debug!(
            name = self.program.interner().lookup(name),
            count = defs.len(),
            "expanded default parameters"
        );
        defs
    }
}
