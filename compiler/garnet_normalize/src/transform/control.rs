//! Conditionals and loops.

use garnet_ir::{If, Node, Span, While};

use super::Normalizer;
use crate::merge::{self, Bridge};
use crate::scope::{self, Versions};
use crate::NormalizeResult;

impl Normalizer<'_> {
    /// Normalize both branches and join their scopes.
    ///
    /// The else branch starts from [`scope::else_start`] of the scope before
    /// the conditional and the scope after the then branch. Bridges go at the
    /// end of each live branch; a branch that always terminates gets none.
    pub(super) fn transform_if(&mut self, if_: If, span: Span) -> NormalizeResult<Node> {
        let If {
            cond,
            then_branch,
            else_branch,
        } = if_;

        let cond = self.transform(cond)?;
        let before = self.scope.clone();

        let (then_branch, then_scope, then_dead) = match then_branch {
            Some(branch) => {
                let branch = self.transform(branch)?;
                (branch.into_option(), Some(self.scope.clone()), self.dead)
            }
            None => (None, None, false),
        };

        let else_start = match &then_scope {
            Some(then_scope) => scope::else_start(&before, then_scope),
            None => before.clone(),
        };
        let (else_branch, else_scope, else_dead) = match else_branch {
            Some(branch) => {
                let (branch, scope, dead) = self.with_scope(else_start.clone(), |scoped| {
                    let branch = scoped.transform(branch)?;
                    NormalizeResult::Ok((branch, std::mem::take(&mut scoped.scope), scoped.dead))
                })?;
                (branch.into_option(), Some(scope), dead)
            }
            None => (None, None, false),
        };

        let merge = merge::merge_branches(
            &before,
            then_scope.as_ref(),
            &else_start,
            else_scope.as_ref(),
        );
        self.scope = merge.scope;

        let then_branch = if then_dead {
            then_branch
        } else {
            self.append_bridges(then_branch, &merge.then_bridges, span)
        };
        let else_branch = if else_dead {
            else_branch
        } else {
            self.append_bridges(else_branch, &merge.else_bridges, span)
        };

        self.dead = then_dead && else_dead;
        Ok(Node::if_(cond, then_branch, else_branch, span))
    }

    /// Normalize a loop, carrying versions written in the body back to the
    /// versions the condition reads.
    ///
    /// After the loop each variable reads the version visible after the
    /// condition, while its write index stays past everything the body
    /// created.
    ///
    /// A body that ends in `break` or `next` gets no bridges, yet reads are
    /// still rewound: after `while c; x = 1; break; end` a read of `x` names
    /// the version from before the loop, not the one the body wrote.
    pub(super) fn transform_while(&mut self, while_: While, span: Span) -> NormalizeResult<Node> {
        let While { cond, body } = while_;

        let before_cond = self.scope.clone();
        let cond = self.transform(cond)?;
        let after_cond = self.scope.clone();

        let (body, body_dead) = match body {
            Some(body) => {
                let body = self.transform(body)?;
                (body.into_option(), self.dead)
            }
            None => (None, false),
        };

        let mut bridges = merge::loop_bridges(&after_cond, &self.scope);
        for bridge in merge::loop_bridges(&before_cond, &self.scope) {
            if !bridges.contains(&bridge) {
                bridges.push(bridge);
            }
        }

        for (name, current) in &mut self.scope {
            if let Some(&entry) = after_cond.get(name) {
                if entry != *current {
                    *current = Versions {
                        read: entry.read,
                        write: current.write,
                    };
                }
            }
        }

        let body = if body_dead {
            body
        } else {
            self.append_loop_bridges(body, &bridges, span)
        };
        Ok(Node::while_(cond, body, span))
    }

    /// Bridges for a block body, rewinding the reads of bridged variables
    /// to their values on block entry.
    pub(super) fn block_bridges(&mut self, before: &scope::Scope) -> Vec<Bridge> {
        let bridges = merge::loop_bridges(before, &self.scope);
        for bridge in &bridges {
            if let Some(entry) = self.scope.get_mut(&bridge.name) {
                entry.read = Some(bridge.to);
            }
        }
        bridges
    }
}
