use std::fmt;

/// An update accepted by a store.
///
/// `P` is the store's patch type: a partial for record stores, a full value
/// for value stores. Whether an argument is a replacement value or an
/// updater is decided by the variant, never by inspecting the argument, so a
/// store whose state is itself a closure can be replaced like any other.
///
/// Any `P` converts into [`Update::Value`]:
///
/// ```
/// use cubby::{create_value_store, Update};
///
/// let store = create_value_store(|_, _| 1_i32);
/// store.set_state(5);
/// store.set_state(Update::with(|n: &i32| n * 2));
/// store.set_state(Update::Empty);
/// assert_eq!(*store.get_state(), 10);
/// ```
pub enum Update<T, P> {
    /// Apply this patch.
    Value(P),
    /// Compute the patch from the current state. `None` leaves the state
    /// untouched.
    Updater(Box<dyn FnOnce(&T) -> Option<P>>),
    /// No value. The state is left untouched, listeners still fire.
    Empty,
}

impl<T, P> Update<T, P> {
    /// Wrap an updater that always produces a patch.
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> P + 'static,
    {
        Update::Updater(Box::new(move |state| Some(f(state))))
    }

    /// Wrap an updater that may decline to produce a patch.
    pub fn try_with<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> Option<P> + 'static,
    {
        Update::Updater(Box::new(f))
    }

    /// Resolve the update against the current state.
    pub(crate) fn resolve(self, current: &T) -> Option<P> {
        match self {
            Update::Value(patch) => Some(patch),
            Update::Updater(f) => f(current),
            Update::Empty => None,
        }
    }
}

impl<T, P> From<P> for Update<T, P> {
    fn from(patch: P) -> Self {
        Update::Value(patch)
    }
}

impl<T, P: fmt::Debug> fmt::Debug for Update<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Value(patch) => f.debug_tuple("Value").field(patch).finish(),
            Update::Updater(_) => f.write_str("Updater(..)"),
            Update::Empty => f.write_str("Empty"),
        }
    }
}
