use super::*;
use crate::StringInterner;

#[test]
fn plain_var_excludes_out_vars() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let read = Node::var(x, Span::DUMMY);
    assert_eq!(read.as_plain_var(), Some(&Var::new(x)));

    let out = Node::new(
        NodeKind::Var(Var {
            name: x,
            version: 0,
            out: true,
        }),
        Span::DUMMY,
    );
    assert_eq!(out.as_plain_var(), None);
}

#[test]
fn terminators() {
    assert!(Node::ret(None, Span::DUMMY).is_terminator());
    assert!(Node::new(NodeKind::Break(None), Span::DUMMY).is_terminator());
    assert!(Node::new(NodeKind::Next(None), Span::DUMMY).is_terminator());
    assert!(!Node::nil(Span::DUMMY).is_terminator());
}

#[test]
fn nop_converts_to_none() {
    assert_eq!(Node::nop(Span::DUMMY).into_option(), None);
    assert_eq!(
        Node::int(1, Span::DUMMY).into_option(),
        Some(Node::int(1, Span::DUMMY))
    );
}

#[test]
fn default_params_detected() {
    let interner = StringInterner::new();
    let mut def = Def {
        name: interner.intern("foo"),
        params: vec![Param::new(interner.intern("a"))],
        body: None,
    };
    assert!(!def.has_default_params());

    def.params.push(Param {
        name: interner.intern("b"),
        default: Some(Node::int(1, Span::DUMMY)),
    });
    assert!(def.has_default_params());
}

#[test]
fn calls_are_not_pure() {
    let interner = StringInterner::new();
    let call = Node::call(None, interner.intern("foo"), vec![], Span::DUMMY);
    assert!(!call.is_pure());
    assert!(Node::temp(interner.intern("#temp_1"), Span::DUMMY).is_pure());
}
