//! Interned generic collection types.
//!
//! Array and hash literals normalize to constructor calls on a generic type
//! such as `Array(Int32)` or `Hash(typeof(k), typeof(v))`. The pool stores each
//! distinct instantiation once and hands out a compact id; nodes refer to the
//! type through [`NodeKind::Generic`](crate::NodeKind::Generic).

use rustc_hash::FxHashMap;

use crate::{Name, Node, Path};

/// Index into a [`TypePool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenericTypeId(u32);

impl GenericTypeId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A generic type argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    /// Explicit annotation (`of Int32`).
    Named(Path),
    /// The merged type of the given expressions (`typeof(a, b, c)`).
    ///
    /// The expressions are type-level copies of literal elements and are
    /// never evaluated.
    Merge(Vec<Node>),
}

/// A generic type instantiation: base type name plus arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericType {
    pub base: Name,
    pub args: Vec<TypeArg>,
}

/// Deduplicating store of generic type instantiations.
#[derive(Default)]
pub struct TypePool {
    types: Vec<GenericType>,
    index: FxHashMap<GenericType, GenericTypeId>,
}

impl TypePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an instantiation, returning its id and whether it was new.
    ///
    /// # Panics
    /// Panics if the pool exceeds `u32::MAX` entries.
    pub fn intern(&mut self, ty: GenericType) -> (GenericTypeId, bool) {
        if let Some(&id) = self.index.get(&ty) {
            return (id, false);
        }
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool exceeded {} entries", u32::MAX));
        let id = GenericTypeId(raw);
        self.types.push(ty.clone());
        self.index.insert(ty, id);
        (id, true)
    }

    /// Look up an instantiation.
    ///
    /// # Panics
    /// Panics if `id` came from a different pool.
    pub fn get(&self, id: GenericTypeId) -> &GenericType {
        &self.types[id.index()]
    }

    /// Instantiations in id order.
    pub fn instantiations(&self) -> impl Iterator<Item = &GenericType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Span, StringInterner};

    #[test]
    fn identical_instantiations_share_an_id() {
        let interner = StringInterner::new();
        let array = interner.intern("Array");
        let int32 = Path::global(interner.intern("Int32"));

        let mut pool = TypePool::new();
        let (first, created) = pool.intern(GenericType {
            base: array,
            args: vec![TypeArg::Named(int32.clone())],
        });
        assert!(created);
        let (second, created) = pool.intern(GenericType {
            base: array,
            args: vec![TypeArg::Named(int32)],
        });
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn merged_arguments_distinguish_types() {
        let interner = StringInterner::new();
        let array = interner.intern("Array");

        let mut pool = TypePool::new();
        let (ints, _) = pool.intern(GenericType {
            base: array,
            args: vec![TypeArg::Merge(vec![Node::int(1, Span::DUMMY)])],
        });
        let (bools, _) = pool.intern(GenericType {
            base: array,
            args: vec![TypeArg::Merge(vec![Node::bool(true, Span::DUMMY)])],
        });
        assert_ne!(ints, bools);
        assert_eq!(pool.get(bools).base, array);
    }
}
