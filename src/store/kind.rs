//! Update policies selected when a store is built.

use crate::record::Record;

/// How a store turns its current state and a patch into the next state.
pub trait StateKind<T>: 'static {
    /// The update shape accepted by `set_state`.
    type Patch: 'static;

    /// Label used in log records.
    const LABEL: &'static str;

    /// Compute the next state. The current state is never mutated in place.
    fn apply(current: &T, patch: Self::Patch) -> T;
}

/// Shallow-merge partial patches into a copy of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {}

/// Replace the state wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {}

impl<T: Record + 'static> StateKind<T> for RecordKind
where
    T::Patch: 'static,
{
    type Patch = T::Patch;

    const LABEL: &'static str = "record";

    fn apply(current: &T, patch: Self::Patch) -> T {
        let mut next = current.clone();
        next.merge(patch);
        next
    }
}

impl<T: 'static> StateKind<T> for ValueKind {
    type Patch = T;

    const LABEL: &'static str = "value";

    fn apply(_current: &T, patch: Self::Patch) -> T {
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn record_kind_merges() {
        let current = BTreeMap::from([("a", 1), ("b", 2)]);
        let next = RecordKind::apply(&current, BTreeMap::from([("b", 3)]));
        assert_eq!(next, BTreeMap::from([("a", 1), ("b", 3)]));
        assert_eq!(current, BTreeMap::from([("a", 1), ("b", 2)]));
    }

    #[test]
    fn value_kind_replaces() {
        assert_eq!(<ValueKind as StateKind<Vec<u8>>>::apply(&vec![1], vec![2, 3]), vec![2, 3]);
    }
}
