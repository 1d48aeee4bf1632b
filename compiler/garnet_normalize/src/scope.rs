//! Per-variable version tracking.
//!
//! A [`Scope`] maps each local variable to the version the next read sees
//! and the version the next write creates. Scopes are replaced wholesale on
//! entry to a method body, an else branch or a required file, and restored
//! on exit by a scope guard.

use std::collections::BTreeMap;

use garnet_ir::Name;

/// Version indices of one variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Versions {
    /// Version visible to the next read. `None` when the variable is known to
    /// this scope but no version reaches it on the current path; such a read
    /// names version 0.
    pub(crate) read: Option<u32>,
    /// One past the newest version created so far.
    pub(crate) write: u32,
}

impl Versions {
    /// A variable bound by its first write, or a parameter.
    pub(crate) const FRESH: Versions = Versions {
        read: Some(0),
        write: 1,
    };

    /// The indices after one more write.
    pub(crate) const fn advanced(self) -> Versions {
        Versions {
            read: Some(self.write),
            write: self.write + 1,
        }
    }
}

/// Variable versions of the active scope.
///
/// Ordered so that bridging assignments come out in a stable order.
pub(crate) type Scope = BTreeMap<Name, Versions>;

/// The starting scope of an else branch that follows a then branch.
///
/// Each variable keeps the read index it had before the conditional and
/// takes the write index the then branch reached, so versions created by
/// either branch never collide.
pub(crate) fn else_start(before: &Scope, then_scope: &Scope) -> Scope {
    then_scope
        .iter()
        .map(|(&name, then)| {
            let read = before.get(&name).and_then(|b| b.read);
            (
                name,
                Versions {
                    read,
                    write: then.write,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_moves_read_to_previous_write() {
        let v = Versions::FRESH.advanced();
        assert_eq!(
            v,
            Versions {
                read: Some(1),
                write: 2
            }
        );
        assert_eq!(
            Versions {
                read: None,
                write: 4
            }
            .advanced(),
            Versions {
                read: Some(4),
                write: 5
            }
        );
    }

    #[test]
    fn else_start_keeps_reads_and_takes_writes() {
        let x = Name::from_raw(1);
        let y = Name::from_raw(2);

        let before = Scope::from([(x, Versions::FRESH)]);
        let then_scope = Scope::from([
            (x, Versions::FRESH.advanced().advanced()),
            (y, Versions::FRESH),
        ]);

        let start = else_start(&before, &then_scope);
        assert_eq!(
            start.get(&x),
            Some(&Versions {
                read: Some(0),
                write: 3
            })
        );
        assert_eq!(
            start.get(&y),
            Some(&Versions {
                read: None,
                write: 1
            })
        );
    }
}
