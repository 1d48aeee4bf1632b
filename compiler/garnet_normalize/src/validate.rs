//! Debug-mode validation of normalized trees.
//!
//! Walks the output and asserts that it is in the core vocabulary:
//! - No sugar kinds (`&&`, `||`, `unless`, `case`, interpolation, range,
//!   regex, array and hash literals, `require`)
//! - No sequence directly inside a sequence, and no `Nop` or single
//!   statement sequence
//! - No default-valued parameters
//!
//! Enabled only in debug builds. A failure is a bug in the normalizer.

use garnet_ir::stack::ensure_sufficient_stack;
use garnet_ir::{Node, NodeKind, TypeArg, TypePool};

/// Validate a normalized tree, panicking on the first violation.
pub fn validate(node: &Node) {
    ensure_sufficient_stack(|| validate_node(node));
}

/// Validate the merged-type expressions stored in `types`.
///
/// These are copies of normalized array and hash elements, so they obey the
/// same rules as the tree.
pub fn validate_types(types: &TypePool) {
    for ty in types.instantiations() {
        for arg in &ty.args {
            if let TypeArg::Merge(nodes) = arg {
                nodes.iter().for_each(validate);
            }
        }
    }
}

fn is_sugar(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Unless(_)
            | NodeKind::Case(_)
            | NodeKind::And(..)
            | NodeKind::Or(..)
            | NodeKind::Interpolation(_)
            | NodeKind::Range { .. }
            | NodeKind::Regex(_)
            | NodeKind::Array { .. }
            | NodeKind::Hash { .. }
            | NodeKind::Require(_)
    )
}

fn validate_node(node: &Node) {
    debug_assert!(
        !is_sugar(&node.kind),
        "sugar survived normalization at {}",
        node.span
    );

    match &node.kind {
        NodeKind::Nop
        | NodeKind::Nil
        | NodeKind::Bool(_)
        | NodeKind::Int(_)
        | NodeKind::Str(_)
        | NodeKind::Var(_)
        | NodeKind::Temp(_)
        | NodeKind::InstanceVar(_)
        | NodeKind::SelfRef
        | NodeKind::Const(_)
        | NodeKind::Generic(_) => {}

        NodeKind::Seq(stmts) => {
            debug_assert!(
                stmts.len() > 1,
                "sequence at {} has {} statements",
                node.span,
                stmts.len()
            );
            for stmt in stmts {
                debug_assert!(
                    !matches!(stmt.kind, NodeKind::Seq(_) | NodeKind::Nop),
                    "nested sequence or nop at {}",
                    stmt.span
                );
                validate(stmt);
            }
        }
        NodeKind::If(if_) => {
            validate(&if_.cond);
            validate_opt(if_.then_branch.as_ref());
            validate_opt(if_.else_branch.as_ref());
        }
        NodeKind::While(while_) => {
            validate(&while_.cond);
            validate_opt(while_.body.as_ref());
        }
        NodeKind::Return(value) | NodeKind::Break(value) | NodeKind::Next(value) => {
            validate_opt(value.as_deref());
        }
        NodeKind::Assign { target, value } => {
            validate(target);
            validate(value);
        }
        NodeKind::MultiAssign { targets, values } => {
            targets.iter().chain(values).for_each(validate);
        }
        NodeKind::Call(call) => {
            validate_opt(call.receiver.as_ref());
            call.args.iter().for_each(validate);
            if let Some(block) = &call.block {
                validate_opt(block.body.as_ref());
            }
        }
        NodeKind::IsA { obj, .. } => validate(obj),
        NodeKind::Def(def) | NodeKind::Macro(def) => {
            debug_assert!(
                !def.has_default_params(),
                "definition at {} kept default parameters",
                node.span
            );
            validate_opt(def.body.as_ref());
        }

        NodeKind::Unless(_)
        | NodeKind::Case(_)
        | NodeKind::And(..)
        | NodeKind::Or(..)
        | NodeKind::Interpolation(_)
        | NodeKind::Range { .. }
        | NodeKind::Regex(_)
        | NodeKind::Array { .. }
        | NodeKind::Hash { .. }
        | NodeKind::Require(_) => {}
    }
}

fn validate_opt(node: Option<&Node>) {
    if let Some(node) = node {
        validate(node);
    }
}
