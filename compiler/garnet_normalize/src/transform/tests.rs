#![allow(clippy::unwrap_used, clippy::expect_used)]

use garnet_ir::{SharedInterner, Span};
use garnet_program::MemoryLoader;
use pretty_assertions::assert_eq;

use super::*;
use crate::scope::Versions;

const S: Span = Span::DUMMY;

fn program() -> Program {
    Program::new(SharedInterner::new(), MemoryLoader::new())
}

fn versions(read: u32, write: u32) -> Versions {
    Versions {
        read: Some(read),
        write,
    }
}

#[test]
fn terminators_mark_the_sequence_dead() {
    let mut program = program();
    let foo = program.interner().intern("foo");
    let mut normalizer = Normalizer::new(&mut program, None);

    normalizer.transform(Node::ret(None, S)).unwrap();
    assert!(normalizer.dead);

    normalizer.transform(Node::call(None, foo, vec![], S)).unwrap();
    assert!(!normalizer.dead);
}

#[test]
fn conditional_is_dead_only_when_both_branches_are() {
    let mut program = program();
    let cond = program.interner().intern("cond");
    let mut normalizer = Normalizer::new(&mut program, None);

    let both = Node::if_(
        Node::call(None, cond, vec![], S),
        Some(Node::ret(Some(Node::int(1, S)), S)),
        Some(Node::ret(Some(Node::int(2, S)), S)),
        S,
    );
    normalizer.transform(both).unwrap();
    assert!(normalizer.dead);

    let one = Node::if_(
        Node::call(None, cond, vec![], S),
        Some(Node::ret(None, S)),
        None,
        S,
    );
    normalizer.transform(one).unwrap();
    assert!(!normalizer.dead);
}

#[test]
fn loops_are_never_dead() {
    let mut program = program();
    let mut normalizer = Normalizer::new(&mut program, None);
    let body = Node::new(NodeKind::Break(None), S);
    normalizer
        .transform(Node::while_(Node::bool(true, S), Some(body), S))
        .unwrap();
    assert!(!normalizer.dead);
}

#[test]
fn assignment_advances_versions() {
    let mut program = program();
    let x = program.interner().intern("x");
    let mut normalizer = Normalizer::new(&mut program, None);

    let first = normalizer
        .transform(Node::assign(Node::var(x, S), Node::int(1, S), S))
        .unwrap();
    assert_eq!(normalizer.scope.get(&x), Some(&Versions::FRESH));
    let second = normalizer
        .transform(Node::assign(Node::var(x, S), Node::int(2, S), S))
        .unwrap();
    assert_eq!(normalizer.scope.get(&x), Some(&versions(1, 2)));

    let target_version = |node: &Node| match &node.kind {
        NodeKind::Assign { target, .. } => match target.kind {
            NodeKind::Var(var) => var.version,
            _ => panic!("target is not a variable"),
        },
        _ => panic!("not an assignment"),
    };
    assert_eq!(target_version(&first), 0);
    assert_eq!(target_version(&second), 1);
}

#[test]
fn loop_rewinds_reads_but_keeps_writes() {
    let mut program = program();
    let x = program.interner().intern("x");
    let cond = program.interner().intern("cond");
    let mut normalizer = Normalizer::new(&mut program, None);

    normalizer
        .transform(Node::assign(Node::var(x, S), Node::int(0, S), S))
        .unwrap();
    let body = Node::seq(
        vec![
            Node::assign(Node::var(x, S), Node::int(1, S), S),
            Node::assign(Node::var(x, S), Node::int(2, S), S),
        ],
        S,
    );
    normalizer
        .transform(Node::while_(Node::call(None, cond, vec![], S), Some(body), S))
        .unwrap();

    assert_eq!(normalizer.scope.get(&x), Some(&versions(0, 3)));
}

#[test]
fn block_parameters_do_not_leak() {
    let mut program = program();
    let each = program.interner().intern("each");
    let item = program.interner().intern("item");
    let mut normalizer = Normalizer::new(&mut program, None);

    let call = Node::call_with_block(
        None,
        each,
        vec![],
        garnet_ir::Block {
            params: vec![item],
            body: Some(Node::var(item, S)),
        },
        S,
    );
    normalizer.transform(call).unwrap();
    assert!(normalizer.scope.is_empty());
}

#[test]
fn definition_bodies_do_not_see_outer_variables() {
    let mut program = program();
    let x = program.interner().intern("x");
    let f = program.interner().intern("f");
    let mut normalizer = Normalizer::new(&mut program, None);

    normalizer
        .transform(Node::assign(Node::var(x, S), Node::int(0, S), S))
        .unwrap();
    let def = Node::new(
        NodeKind::Def(Box::new(garnet_ir::Def {
            name: f,
            params: vec![],
            body: Some(Node::var(x, S)),
        })),
        S,
    );

    let err = normalizer.transform(def).unwrap_err();
    assert!(err.is_internal());
    assert_eq!(normalizer.scope.get(&x), Some(&Versions::FRESH));
}
