//! Bridging assignments at control-flow joins.
//!
//! Where two paths rejoin, every variable must name one version no matter
//! which path ran. Instead of phi nodes the pass appends a bridging
//! assignment `x:merged = x:own` to the end of each path that would
//! otherwise disagree.

use std::collections::BTreeSet;

use garnet_ir::{Name, Node, NodeKind, Span, Var};

use crate::scope::{Scope, Versions};

/// `name:to = name:from`, or `name:to = nil` when no version reaches the
/// path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Bridge {
    pub(crate) name: Name,
    pub(crate) to: u32,
    pub(crate) from: Option<u32>,
}

impl Bridge {
    /// `None` if the assignment would copy a version onto itself.
    fn new(name: Name, to: u32, from: Option<u32>) -> Option<Bridge> {
        (from != Some(to)).then_some(Bridge { name, to, from })
    }

    pub(crate) fn to_node(self, span: Span) -> Node {
        let value = match self.from {
            Some(version) => Node::new(
                NodeKind::Var(Var::new(self.name).with_version(version)),
                span,
            ),
            None => Node::nil(span),
        };
        let target = Node::new(
            NodeKind::Var(Var::new(self.name).with_version(self.to)),
            span,
        );
        Node::assign(target, value, span)
    }
}

/// Outcome of joining the two branches of a conditional.
#[derive(Debug, Default)]
pub(crate) struct BranchMerge {
    pub(crate) then_bridges: Vec<Bridge>,
    pub(crate) else_bridges: Vec<Bridge>,
    /// Scope in effect after the conditional.
    pub(crate) scope: Scope,
}

/// Join the scopes of a conditional's branches.
///
/// `then_scope` and `else_scope` are `None` for an absent branch.
/// `else_start` is the scope the else branch started from.
///
/// Per variable:
/// - only the then branch wrote it: the then branch's version wins and the
///   else branch copies its own version into it
/// - only the else branch wrote it: the mirror image
/// - both wrote it: a fresh version past both branches' writes, and both
///   branches copy into it
pub(crate) fn merge_branches(
    before: &Scope,
    then_scope: Option<&Scope>,
    else_start: &Scope,
    else_scope: Option<&Scope>,
) -> BranchMerge {
    let mut merge = BranchMerge {
        scope: then_scope.or(else_scope).unwrap_or(before).clone(),
        ..BranchMerge::default()
    };

    let names: BTreeSet<Name> = before
        .keys()
        .chain(then_scope.into_iter().flat_map(Scope::keys))
        .chain(else_scope.into_iter().flat_map(Scope::keys))
        .copied()
        .collect();

    for name in names {
        let before_entry = before.get(&name).copied();
        let then_entry = then_scope.map_or(before_entry, |s| s.get(&name).copied());
        let start_entry = if else_scope.is_some() {
            else_start.get(&name).copied()
        } else {
            before_entry
        };
        let else_entry = else_scope.map_or(start_entry, |s| s.get(&name).copied());

        let then_wrote = then_entry != before_entry;
        let else_wrote = else_entry != start_entry;

        match (then_entry, else_entry) {
            (Some(then), else_entry) if then_wrote && !else_wrote => {
                let Some(merged) = then.read else {
                    merge.scope.insert(name, then);
                    continue;
                };
                let else_read = start_entry.and_then(|e| e.read);
                merge.else_bridges.extend(Bridge::new(name, merged, else_read));
                let write = else_entry.map_or(then.write, |e| then.write.max(e.write));
                merge.scope.insert(
                    name,
                    Versions {
                        read: Some(merged),
                        write,
                    },
                );
            }
            (then_entry, Some(els)) if else_wrote && !then_wrote => {
                let Some(merged) = els.read else {
                    merge.scope.insert(name, els);
                    continue;
                };
                let then_read = then_entry.and_then(|t| t.read);
                merge.then_bridges.extend(Bridge::new(name, merged, then_read));
                let write = then_entry.map_or(els.write, |t| els.write.max(t.write));
                merge.scope.insert(
                    name,
                    Versions {
                        read: Some(merged),
                        write,
                    },
                );
            }
            (Some(then), Some(els)) if then_wrote && else_wrote => {
                let merged = then.write.max(els.write);
                merge.then_bridges.extend(Bridge::new(name, merged, then.read));
                merge.else_bridges.extend(Bridge::new(name, merged, els.read));
                merge.scope.insert(
                    name,
                    Versions {
                        read: Some(merged),
                        write: merged + 1,
                    },
                );
            }
            _ => {}
        }
    }

    merge
}

/// Bridges that carry versions written inside a loop back to the versions
/// read on loop entry.
pub(crate) fn loop_bridges(entry: &Scope, current: &Scope) -> Vec<Bridge> {
    current
        .iter()
        .filter_map(|(&name, now)| {
            let entry_read = entry.get(&name)?.read?;
            let now_read = now.read?;
            (entry_read < now_read).then_some(Bridge {
                name,
                to: entry_read,
                from: Some(now_read),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests;
