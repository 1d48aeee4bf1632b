use super::*;
use pretty_assertions::assert_eq;

const X: Name = Name::from_raw(1);
const Y: Name = Name::from_raw(2);

fn v(read: u32, write: u32) -> Versions {
    Versions {
        read: Some(read),
        write,
    }
}

#[test]
fn then_only_write_bridges_the_else_branch() {
    let before = Scope::from([(X, v(0, 1))]);
    let then_scope = Scope::from([(X, v(1, 2))]);

    let merge = merge_branches(&before, Some(&then_scope), &before, None);

    assert!(merge.then_bridges.is_empty());
    assert_eq!(
        merge.else_bridges,
        vec![Bridge {
            name: X,
            to: 1,
            from: Some(0)
        }]
    );
    assert_eq!(merge.scope.get(&X), Some(&v(1, 2)));
}

#[test]
fn variable_created_in_then_is_nil_in_else() {
    let before = Scope::new();
    let then_scope = Scope::from([(Y, v(0, 1))]);
    let else_start = crate::scope::else_start(&before, &then_scope);
    let else_scope = else_start.clone();

    let merge = merge_branches(&before, Some(&then_scope), &else_start, Some(&else_scope));

    assert_eq!(
        merge.else_bridges,
        vec![Bridge {
            name: Y,
            to: 0,
            from: None
        }]
    );
    assert_eq!(merge.scope.get(&Y), Some(&v(0, 1)));
}

#[test]
fn else_only_write_bridges_the_then_branch() {
    let before = Scope::from([(X, v(0, 1))]);
    let then_scope = before.clone();
    let else_start = crate::scope::else_start(&before, &then_scope);
    let else_scope = Scope::from([(X, v(1, 2))]);

    let merge = merge_branches(&before, Some(&then_scope), &else_start, Some(&else_scope));

    assert_eq!(
        merge.then_bridges,
        vec![Bridge {
            name: X,
            to: 1,
            from: Some(0)
        }]
    );
    assert!(merge.else_bridges.is_empty());
    assert_eq!(merge.scope.get(&X), Some(&v(1, 2)));
}

#[test]
fn both_writes_merge_into_a_fresh_version() {
    let before = Scope::from([(X, v(0, 1))]);
    let then_scope = Scope::from([(X, v(1, 2))]);
    let else_start = crate::scope::else_start(&before, &then_scope);
    let else_scope = Scope::from([(X, v(2, 3))]);

    let merge = merge_branches(&before, Some(&then_scope), &else_start, Some(&else_scope));

    assert_eq!(
        merge.then_bridges,
        vec![Bridge {
            name: X,
            to: 3,
            from: Some(1)
        }]
    );
    assert_eq!(
        merge.else_bridges,
        vec![Bridge {
            name: X,
            to: 3,
            from: Some(2)
        }]
    );
    assert_eq!(merge.scope.get(&X), Some(&v(3, 4)));
}

#[test]
fn untouched_variables_produce_no_bridges() {
    let before = Scope::from([(X, v(0, 1)), (Y, v(2, 3))]);
    let merge = merge_branches(&before, Some(&before), &before, Some(&before));
    assert!(merge.then_bridges.is_empty());
    assert!(merge.else_bridges.is_empty());
    assert_eq!(merge.scope, before);
}

#[test]
fn loop_bridges_copy_newer_reads_back() {
    let entry = Scope::from([(X, v(0, 1)), (Y, v(0, 1))]);
    let current = Scope::from([(X, v(2, 3)), (Y, v(0, 1))]);
    assert_eq!(
        loop_bridges(&entry, &current),
        vec![Bridge {
            name: X,
            to: 0,
            from: Some(2)
        }]
    );
}

#[test]
fn loop_bridges_skip_variables_born_in_the_loop() {
    let entry = Scope::new();
    let current = Scope::from([(X, v(1, 2))]);
    assert!(loop_bridges(&entry, &current).is_empty());
}

#[test]
fn bridge_renders_as_assignment() {
    let interner = garnet_ir::StringInterner::new();
    let x = interner.intern("x");
    let printer = |node: &Node| garnet_ir::Printer::new(&interner).print(node);

    let copy = Bridge {
        name: x,
        to: 2,
        from: Some(1),
    };
    let nil = Bridge {
        name: x,
        to: 0,
        from: None,
    };
    assert_eq!(printer(&copy.to_node(Span::DUMMY)), "x:2 = x:1");
    assert_eq!(printer(&nil.to_node(Span::DUMMY)), "x = nil");
}
