//! Binding stores to a host render primitive.
//!
//! UI layers that re-render from external state need two things: a way to
//! subscribe to change notifications and a way to read a snapshot. The
//! [`ExternalStore`] trait is that seam; the store engine never references a
//! rendering API itself.
//!
//! [`SyncExternalStore`] is a reference host adapter: it reads the snapshot
//! when created and after every change notification, and asks for a
//! re-render only when the snapshot is not [`ShallowEq`] to the previous
//! one.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::compare::ShallowEq;
use crate::store::{StateKind, Store};
use crate::subscription::{Subscription, SubscriptionGuard};

/// A source a host render primitive can subscribe to.
pub trait ExternalStore {
    /// Value compared between reads to decide whether to re-render.
    type Snapshot;

    /// Register `on_change`, called after every update of the source.
    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Subscription;

    /// Read the current snapshot.
    fn get_snapshot(&self) -> Self::Snapshot;
}

/// A store bound through a selector.
///
/// Returned by [`Store::bind`] and [`Store::bind_with`].
pub struct Selected<T, K: StateKind<T>, U> {
    store: Store<T, K>,
    selector: Rc<dyn Fn(&Rc<T>) -> U>,
}

impl<T: 'static, K: StateKind<T>, U> Selected<T, K, U> {
    pub(crate) fn new(store: Store<T, K>, selector: impl Fn(&Rc<T>) -> U + 'static) -> Self {
        Self {
            store,
            selector: Rc::new(selector),
        }
    }

    /// The store behind this binding.
    pub fn store(&self) -> &Store<T, K> {
        &self.store
    }
}

impl<T: 'static, K: StateKind<T>, U> ExternalStore for Selected<T, K, U> {
    type Snapshot = U;

    fn subscribe(&self, on_change: Rc<dyn Fn()>) -> Subscription {
        self.store.subscribe_rc(on_change)
    }

    fn get_snapshot(&self) -> U {
        (self.selector)(&self.store.get_state())
    }
}

impl<T, K: StateKind<T>, U> Clone for Selected<T, K, U> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            selector: Rc::clone(&self.selector),
        }
    }
}

impl<T, K: StateKind<T>, U> fmt::Debug for Selected<T, K, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selected").finish_non_exhaustive()
    }
}

struct Tracked<S: ExternalStore> {
    source: S,
    current: RefCell<S::Snapshot>,
    on_render: Box<dyn Fn()>,
}

impl<S> Tracked<S>
where
    S: ExternalStore,
    S::Snapshot: ShallowEq + Clone,
{
    /// Re-read the source. Returns `true` when the snapshot changed.
    fn refresh(&self) -> bool {
        let next = self.source.get_snapshot();
        if next.shallow_eq(&self.current.borrow()) {
            return false;
        }
        self.current.replace(next);
        true
    }
}

/// Reference host primitive: keeps the last snapshot of a source and
/// triggers `on_render` whenever a notification brings a different one.
///
/// Dropping it unsubscribes from the source.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use cubby::{create_value_store, SyncExternalStore};
///
/// let store = create_value_store(|_, _| (0_u32, "label"));
/// let renders = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&renders);
/// let view = SyncExternalStore::new(store.bind_with(|s| s.0), move || {
///     counter.set(counter.get() + 1)
/// });
///
/// store.set_state((0, "renamed"));
/// assert_eq!(renders.get(), 0);
/// store.set_state((1, "renamed"));
/// assert_eq!(renders.get(), 1);
/// assert_eq!(view.snapshot(), 1);
/// ```
pub struct SyncExternalStore<S>
where
    S: ExternalStore,
{
    tracked: Rc<Tracked<S>>,
    _subscription: SubscriptionGuard,
}

impl<S> SyncExternalStore<S>
where
    S: ExternalStore + 'static,
    S::Snapshot: ShallowEq + Clone + 'static,
{
    /// Subscribe to `source` and take the initial snapshot.
    pub fn new(source: S, on_render: impl Fn() + 'static) -> Self {
        let initial = source.get_snapshot();
        let tracked = Rc::new(Tracked {
            source,
            current: RefCell::new(initial),
            on_render: Box::new(on_render),
        });

        let weak = Rc::downgrade(&tracked);
        let subscription = tracked.source.subscribe(Rc::new(move || {
            if let Some(tracked) = weak.upgrade() {
                if tracked.refresh() {
                    (tracked.on_render)();
                }
            }
        }));

        Self {
            tracked,
            _subscription: subscription.guard(),
        }
    }

    /// Snapshot for the current render.
    ///
    /// Re-reads the source, like a host does on every render, so a value
    /// changed without a notification is still picked up.
    pub fn snapshot(&self) -> S::Snapshot {
        self.tracked.refresh();
        self.tracked.current.borrow().clone()
    }
}

impl<S: ExternalStore> fmt::Debug for SyncExternalStore<S>
where
    S::Snapshot: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncExternalStore")
            .field("current", &self.tracked.current.borrow())
            .finish_non_exhaustive()
    }
}
