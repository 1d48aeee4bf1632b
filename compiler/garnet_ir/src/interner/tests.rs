use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let x = interner.intern("x");
    let y = interner.intern("y");
    let x2 = interner.intern("x");

    assert_eq!(x, x2);
    assert_ne!(x, y);

    assert_eq!(interner.lookup(x), "x");
    assert_eq!(interner.lookup(y), "y");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_names_order_by_first_intern() {
    let interner = StringInterner::new();
    let zeta = interner.intern("zeta");
    let alpha = interner.intern("alpha");
    assert!(zeta < alpha);
}

#[test]
fn test_common_names_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();
    interner.intern("StringBuilder");
    interner.intern("length=");
    assert_eq!(interner.len(), before);
    assert!(!interner.is_empty());
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let other = interner.clone();

    let name = interner.intern("shared");
    assert_eq!(other.intern("shared"), name);
    assert_eq!(other.lookup(name), "shared");
}
