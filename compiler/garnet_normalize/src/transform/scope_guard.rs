//! RAII guard for replacing the active variable scope.
//!
//! The guard holds `&mut Normalizer` and implements `Deref`/`DerefMut`, so
//! code running under it uses the normalizer as usual. Dropping the guard
//! puts the outer scope back, including when a transform bails out early
//! with `?`.

use std::ops::{Deref, DerefMut};

use super::Normalizer;
use crate::scope::Scope;

/// Normalizer running under a replacement scope.
pub(crate) struct ScopedNormalizer<'guard, 'p> {
    normalizer: &'guard mut Normalizer<'p>,
    outer: Scope,
}

impl Drop for ScopedNormalizer<'_, '_> {
    fn drop(&mut self) {
        self.normalizer.scope = std::mem::take(&mut self.outer);
    }
}

impl<'p> Deref for ScopedNormalizer<'_, 'p> {
    type Target = Normalizer<'p>;

    fn deref(&self) -> &Self::Target {
        self.normalizer
    }
}

impl DerefMut for ScopedNormalizer<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.normalizer
    }
}

impl<'p> Normalizer<'p> {
    /// Make `scope` active until the returned guard is dropped.
    pub(crate) fn scoped(&mut self, scope: Scope) -> ScopedNormalizer<'_, 'p> {
        let outer = std::mem::replace(&mut self.scope, scope);
        ScopedNormalizer {
            normalizer: self,
            outer,
        }
    }

    /// Run `f` with `scope` active, restoring the current scope afterwards.
    pub(crate) fn with_scope<T, F>(&mut self, scope: Scope, f: F) -> T
    where
        F: FnOnce(&mut ScopedNormalizer<'_, 'p>) -> T,
    {
        let mut scoped = self.scoped(scope);
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests {
    use garnet_ir::SharedInterner;
    use garnet_program::{MemoryLoader, Program};

    use super::*;
    use crate::scope::Versions;
    use crate::{NormalizeError, NormalizeResult};

    #[test]
    fn scope_is_restored_after_early_return() {
        let mut program = Program::new(SharedInterner::new(), MemoryLoader::new());
        let x = program.interner().intern("x");
        let mut normalizer = Normalizer::new(&mut program, None);
        normalizer.scope.insert(x, Versions::FRESH);

        let result: NormalizeResult<()> = normalizer.with_scope(Scope::new(), |scoped| {
            assert!(scoped.scope.is_empty());
            scoped.scope.insert(x, Versions::FRESH.advanced());
            Err(NormalizeError::UnboundVariable {
                name: "x".to_owned(),
                span: garnet_ir::Span::DUMMY,
            })
        });

        assert!(result.is_err());
        assert_eq!(normalizer.scope.get(&x), Some(&Versions::FRESH));
    }
}
