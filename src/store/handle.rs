use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::StoreError;

use super::kind::StateKind;
use super::store::{Store, StoreInner};
use super::update::Update;

/// Write handle given to a store initializer.
///
/// Holds a weak reference, so state may keep a `Setter` inside closures
/// without keeping the store alive.
pub struct Setter<T, K: StateKind<T>> {
    inner: Weak<StoreInner<T, K>>,
}

/// Read handle given to a store initializer.
pub struct Getter<T, K: StateKind<T>> {
    inner: Weak<StoreInner<T, K>>,
}

impl<T: 'static, K: StateKind<T>> Setter<T, K> {
    pub(crate) fn new(inner: Weak<StoreInner<T, K>>) -> Self {
        Self { inner }
    }

    fn upgrade(&self) -> Result<Rc<StoreInner<T, K>>, StoreError> {
        self.inner.upgrade().ok_or(StoreError::Detached)
    }

    /// Same as [`Store::set_state`].
    pub fn set_state(&self, update: impl Into<Update<T, K::Patch>>) -> Result<(), StoreError> {
        self.upgrade()?.dispatch(update.into());
        Ok(())
    }

    /// Same as [`Store::set_with`].
    pub fn set_with<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&T) -> K::Patch + 'static,
    {
        self.set_state(Update::with(f))
    }

    /// Same as [`Store::try_set_with`].
    pub fn try_set_with<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&T) -> Option<K::Patch> + 'static,
    {
        self.set_state(Update::try_with(f))
    }

    /// Upgrade to a full store handle.
    pub fn store(&self) -> Result<Store<T, K>, StoreError> {
        self.upgrade().map(Store::from_inner)
    }
}

impl<T: 'static, K: StateKind<T>> Getter<T, K> {
    pub(crate) fn new(inner: Weak<StoreInner<T, K>>) -> Self {
        Self { inner }
    }

    /// Current state.
    pub fn get(&self) -> Result<Rc<T>, StoreError> {
        self.inner
            .upgrade()
            .map(|inner| inner.snapshot())
            .ok_or(StoreError::Detached)
    }

    /// Read the current state through a closure.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, StoreError> {
        self.get().map(|state| f(&state))
    }
}

impl<T, K: StateKind<T>> Clone for Setter<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T, K: StateKind<T>> Clone for Getter<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T, K: StateKind<T>> fmt::Debug for Setter<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T, K: StateKind<T>> fmt::Debug for Getter<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getter")
            .field("attached", &(self.inner.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{create_record_store, record, RecordStore, StoreError};
    use std::rc::Rc;

    record! {
        #[derive(Clone)]
        struct Clicks => ClicksPatch {
            count: u32,
            click: Rc<dyn Fn()>,
        }
    }

    fn clicks() -> RecordStore<Clicks> {
        create_record_store(|set, _| Clicks {
            count: 0,
            click: Rc::new(move || {
                let _ = set.set_with(|s: &Clicks| ClicksPatch::default().count(s.count + 1));
            }),
        })
    }

    #[test]
    fn state_closures_update_their_store() {
        let store = clicks();
        let click = Rc::clone(&store.get_state().click);
        click();
        click();
        assert_eq!(store.get_state().count, 2);
    }

    #[test]
    fn handles_detach_when_store_drops() {
        let store = clicks();
        let click = Rc::clone(&store.get_state().click);
        drop(store);
        // The closure no longer reaches a store and does nothing.
        click();
    }

    #[test]
    fn getter_reads_through_closure() {
        let mut kept = None;
        let store: RecordStore<Clicks> = create_record_store(|_, get| {
            kept = Some(get);
            Clicks {
                count: 3,
                click: Rc::new(|| {}),
            }
        });
        let getter = kept.expect("initializer ran");
        assert_eq!(getter.read(|s| s.count * 2), Ok(6));

        drop(store);
        assert_eq!(getter.read(|s| s.count), Err(StoreError::Detached));
    }

    #[test]
    fn setter_upgrades_to_store() {
        let mut kept = None;
        let store: RecordStore<Clicks> = create_record_store(|set, _| {
            kept = Some(set);
            Clicks {
                count: 7,
                click: Rc::new(|| {}),
            }
        });
        let setter = kept.expect("initializer ran");
        let upgraded = setter.store().expect("store alive");
        assert_eq!(upgraded.get_state().count, 7);

        drop(upgraded);
        drop(store);
        assert_eq!(setter.store().err(), Some(StoreError::Detached));
    }
}
