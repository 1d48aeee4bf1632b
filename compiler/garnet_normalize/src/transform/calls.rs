//! Calls and blocks.

use garnet_ir::{Block, Call, Node, NodeKind, Span};

use super::Normalizer;
use crate::scope::Versions;
use crate::NormalizeResult;

impl Normalizer<'_> {
    pub(super) fn transform_call(&mut self, call: Call, span: Span) -> NormalizeResult<Node> {
        let Call {
            receiver,
            name,
            args,
            block,
        } = call;

        let receiver = self.transform_opt(receiver)?;
        let args = self.transform_all(args)?;
        let block = block
            .map(|block| self.transform_block(block, span))
            .transpose()?;

        Ok(Node::new(
            NodeKind::Call(Box::new(Call {
                receiver,
                name,
                args,
                block,
            })),
            span,
        ))
    }

    /// A block body may run any number of times, so outer variables it
    /// writes are bridged back to their entry versions at the end of the
    /// body. Parameters are bound fresh for the body only.
    ///
    /// As with loops, a body ending in `break` or `next` gets no bridges
    /// but its reads are still rewound to the entry versions.
    fn transform_block(&mut self, block: Block, span: Span) -> NormalizeResult<Block> {
        let Block { params, body } = block;
        let before = self.scope.clone();

        let shadowed: Vec<_> = params
            .iter()
            .map(|&param| (param, self.scope.insert(param, Versions::FRESH)))
            .collect();

        let has_body = body.is_some();
        let body = self.transform_opt(body);
        let body_dead = has_body && self.dead;

        for (param, outer) in shadowed.into_iter().rev() {
            match outer {
                Some(outer) => {
                    self.scope.insert(param, outer);
                }
                None => {
                    self.scope.remove(&param);
                }
            }
        }
        let body = body?.and_then(Node::into_option);

        let bridges = self.block_bridges(&before);
        let body = if body_dead {
            body
        } else {
            self.append_bridges(body, &bridges, span)
        };

        Ok(Block { params, body })
    }
}
