//! Error types for store handles.

use thiserror::Error;

/// Errors returned by the [`Setter`](crate::Setter) and
/// [`Getter`](crate::Getter) handles passed to a store initializer.
///
/// The store itself never fails: malformed updates are absorbed as no-ops.
/// Only the weak handles can outlive (or predate) the store they point at.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The store is still running its initializer or has already been dropped.
    #[error("store is not available (still initializing or dropped)")]
    Detached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_message() {
        assert_eq!(
            StoreError::Detached.to_string(),
            "store is not available (still initializing or dropped)"
        );
    }
}
