use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::compare::ShallowEq;
use crate::config::{Reentrancy, StoreConfig};
use crate::external::Selected;
use crate::record::Record;
use crate::runtime::{Listener, ObserverId, Registry, Watch, WatchSlot};
use crate::subscription::Subscription;

use super::handle::{Getter, Setter};
use super::kind::{RecordKind, StateKind, ValueKind};
use super::update::Update;

/// A store whose state takes partial patches.
pub type RecordStore<T> = Store<T, RecordKind>;

/// A store whose state is replaced on every update.
pub type ValueStore<T> = Store<T, ValueKind>;

/// Reentrant updates waiting for the current notification pass to end.
struct Dispatch<T, P> {
    active: bool,
    pending: VecDeque<Update<T, P>>,
}

/// Shared interior of a [`Store`].
pub(crate) struct StoreInner<T, K: StateKind<T>> {
    config: StoreConfig,
    state: RefCell<Rc<T>>,
    registry: RefCell<Registry<T>>,
    dispatch: RefCell<Dispatch<T, K::Patch>>,
}

/// Clears the dispatch state when the outermost `set_state` returns or
/// unwinds.
struct DispatchReset<'a, T, P>(&'a RefCell<Dispatch<T, P>>);

impl<T, P> Drop for DispatchReset<'_, T, P> {
    fn drop(&mut self) {
        if let Ok(mut dispatch) = self.0.try_borrow_mut() {
            dispatch.active = false;
            dispatch.pending.clear();
        }
    }
}

impl<T: 'static, K: StateKind<T>> StoreInner<T, K> {
    pub(crate) fn snapshot(&self) -> Rc<T> {
        Rc::clone(&self.state.borrow())
    }

    pub(crate) fn dispatch(&self, update: Update<T, K::Patch>) {
        if self.config.reentrancy() == Reentrancy::Immediate {
            self.commit_and_notify(update);
            return;
        }

        {
            let mut dispatch = self.dispatch.borrow_mut();
            if dispatch.active {
                dispatch.pending.push_back(update);
                tracing::debug!(
                    store = self.config.name(),
                    queued = dispatch.pending.len(),
                    "Queued reentrant update"
                );
                return;
            }
            dispatch.active = true;
        }
        let _reset = DispatchReset(&self.dispatch);

        self.commit_and_notify(update);

        let mut drained = 0;
        loop {
            let next = self.dispatch.borrow_mut().pending.pop_front();
            let Some(next) = next else { break };
            if let Some(limit) = self.config.drain_limit().filter(|limit| drained == *limit) {
                let dropped = 1 + self.dispatch.borrow().pending.len();
                tracing::warn!(
                    store = self.config.name(),
                    limit,
                    dropped,
                    "Drain limit reached, dropping queued updates"
                );
                break;
            }
            drained += 1;
            self.commit_and_notify(next);
        }
    }

    fn commit_and_notify(&self, update: Update<T, K::Patch>) {
        let _span =
            tracing::trace_span!("set_state", store = self.config.name(), kind = K::LABEL)
                .entered();

        let current = self.snapshot();
        match update.resolve(&current) {
            Some(patch) => {
                let next = Rc::new(K::apply(&current, patch));
                *self.state.borrow_mut() = next;
                tracing::trace!("Committed next state");
            }
            None => tracing::debug!("Update resolved to no value, state unchanged"),
        }
        drop(current);

        self.notify();
    }

    /// Run watchers, then listeners. No interior borrow is held while user
    /// callbacks run.
    fn notify(&self) {
        let (watchers, listeners) = {
            let registry = self.registry.borrow();
            (registry.watchers(), registry.listeners())
        };
        tracing::trace!(
            watchers = watchers.len(),
            listeners = listeners.len(),
            "Notifying observers"
        );

        for (id, watcher) in watchers {
            if self.is_registered(id) {
                watcher.check(&self.snapshot());
            }
        }
        for (id, listener) in listeners {
            if self.is_registered(id) {
                listener();
            }
        }
    }

    fn is_registered(&self, id: ObserverId) -> bool {
        self.registry.borrow().contains(id)
    }
}

/// A single-value state container with partial or whole updates, watchers,
/// and render listeners.
///
/// `K` fixes the update policy at construction: [`RecordKind`] merges
/// partial patches, [`ValueKind`] replaces the value. Cloning a `Store`
/// yields another handle to the same state.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use cubby::create_value_store;
///
/// let store = create_value_store(|_, _| Vec::<usize>::new());
/// let renders = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&renders);
/// let _sub = store.subscribe(move || seen.set(seen.get() + 1));
///
/// store.set_with(|items| {
///     let mut next = items.clone();
///     next.push(items.len());
///     next
/// });
/// assert_eq!(*store.get_state(), vec![0]);
/// assert_eq!(renders.get(), 1);
/// ```
pub struct Store<T, K: StateKind<T>> {
    inner: Rc<StoreInner<T, K>>,
}

impl<T, K: StateKind<T>> Clone for Store<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static, K: StateKind<T>> Store<T, K> {
    /// Build a store with the default configuration.
    ///
    /// The initializer runs synchronously and receives handles to the store
    /// being built, so the state can hold closures that update the store
    /// later. Using the handles inside the initializer itself yields
    /// [`StoreError::Detached`](crate::StoreError::Detached).
    pub fn new<F>(initializer: F) -> Self
    where
        F: FnOnce(Setter<T, K>, Getter<T, K>) -> T,
    {
        Self::with_config(StoreConfig::default(), initializer)
    }

    /// Build a store with an explicit configuration.
    pub fn with_config<F>(config: StoreConfig, initializer: F) -> Self
    where
        F: FnOnce(Setter<T, K>, Getter<T, K>) -> T,
    {
        let inner = Rc::new_cyclic(|weak: &Weak<StoreInner<T, K>>| {
            let state = initializer(Setter::new(weak.clone()), Getter::new(weak.clone()));
            StoreInner {
                config,
                state: RefCell::new(Rc::new(state)),
                registry: RefCell::new(Registry::new()),
                dispatch: RefCell::new(Dispatch {
                    active: false,
                    pending: VecDeque::new(),
                }),
            }
        });
        tracing::debug!(store = inner.config.name(), kind = K::LABEL, "Created store");
        Self { inner }
    }

    pub(crate) fn from_inner(inner: Rc<StoreInner<T, K>>) -> Self {
        Self { inner }
    }

    /// Current state. Between updates every call returns the same `Rc`.
    pub fn get_state(&self) -> Rc<T> {
        self.inner.snapshot()
    }

    /// Read the current state through a closure.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.get_state())
    }

    /// Apply an update, then notify watchers and listeners.
    ///
    /// Accepts a patch directly or any [`Update`]. Updates that resolve to no
    /// value leave the state alone but still notify listeners.
    pub fn set_state(&self, update: impl Into<Update<T, K::Patch>>) {
        self.inner.dispatch(update.into());
    }

    /// Compute the patch from the current state.
    pub fn set_with<F>(&self, f: F)
    where
        F: FnOnce(&T) -> K::Patch + 'static,
    {
        self.inner.dispatch(Update::with(f));
    }

    /// Like [`set_with`](Self::set_with), but the closure may return `None`
    /// to leave the state untouched.
    pub fn try_set_with<F>(&self, f: F)
    where
        F: FnOnce(&T) -> Option<K::Patch> + 'static,
    {
        self.inner.dispatch(Update::try_with(f));
    }

    /// Register a listener called after every `set_state`.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.subscribe_rc(Rc::new(listener))
    }

    /// Register a shared listener. Registering the same `Rc` twice keeps a
    /// single entry.
    pub fn subscribe_rc(&self, listener: Listener) -> Subscription {
        let id = self.inner.registry.borrow_mut().add_listener(listener);
        tracing::debug!(store = self.inner.config.name(), id, "Added listener");
        self.remover(id)
    }

    /// Watch a selected slice of the state.
    ///
    /// The selector runs immediately to seed the previous value. After each
    /// update it runs again, and `callback(new, old)` fires when the result
    /// is not [`ShallowEq`] to the previous one.
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use cubby::create_value_store;
    ///
    /// let store = create_value_store(|_, _| 1_u32);
    /// let log = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&log);
    /// let _watch = store.watch(
    ///     |n| **n % 2 == 0,
    ///     move |new, old| sink.borrow_mut().push((*new, *old)),
    /// );
    ///
    /// store.set_state(3);
    /// store.set_state(4);
    /// assert_eq!(*log.borrow(), vec![(true, false)]);
    /// ```
    pub fn watch<U, S, C>(&self, selector: S, callback: C) -> Subscription
    where
        U: ShallowEq + Clone + 'static,
        S: Fn(&Rc<T>) -> U + 'static,
        C: Fn(&U, &U) + 'static,
    {
        let slot: Rc<dyn Watch<T>> =
            Rc::new(WatchSlot::new(&self.get_state(), selector, callback));
        let id = self.inner.registry.borrow_mut().add_watcher(slot);
        tracing::debug!(store = self.inner.config.name(), id, "Added watcher");
        self.remover(id)
    }

    /// Bind the whole state for a host render primitive. The snapshot is the
    /// state `Rc` itself, so it only changes when an update commits.
    pub fn bind(&self) -> Selected<T, K, Rc<T>> {
        Selected::new(self.clone(), Rc::clone)
    }

    /// Bind a selected slice of the state for a host render primitive.
    pub fn bind_with<U>(&self, selector: impl Fn(&Rc<T>) -> U + 'static) -> Selected<T, K, U> {
        Selected::new(self.clone(), selector)
    }

    /// Name from the store's configuration.
    pub fn name(&self) -> &str {
        self.inner.config.name()
    }

    /// Configuration the store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.registry.borrow().listener_count()
    }

    /// Number of registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.inner.registry.borrow().watcher_count()
    }

    fn remover(&self, id: ObserverId) -> Subscription {
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if inner.registry.borrow_mut().remove_observer(id) {
                    tracing::debug!(store = inner.config.name(), id, "Removed observer");
                }
            }
        })
    }
}

impl<T: fmt::Debug, K: StateKind<T>> fmt::Debug for Store<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.config.name())
            .field("kind", &K::LABEL)
            .field("state", &self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Build a store whose updates are partial patches merged into the state.
///
/// ```
/// use cubby::{create_record_store, record};
///
/// record! {
///     #[derive(Clone)]
///     struct Counter => CounterPatch {
///         count: i64,
///         label: String,
///     }
/// }
///
/// let store = create_record_store(|_, _| Counter { count: 0, label: "clicks".into() });
/// store.set_with(|s| CounterPatch::default().count(s.count + 1));
/// assert_eq!(store.get_state().count, 1);
/// assert_eq!(store.get_state().label, "clicks");
/// ```
pub fn create_record_store<T, F>(initializer: F) -> RecordStore<T>
where
    T: Record + 'static,
    RecordKind: StateKind<T>,
    F: FnOnce(Setter<T, RecordKind>, Getter<T, RecordKind>) -> T,
{
    Store::new(initializer)
}

/// Build a store whose updates replace the whole value.
pub fn create_value_store<T, F>(initializer: F) -> ValueStore<T>
where
    T: 'static,
    F: FnOnce(Setter<T, ValueKind>, Getter<T, ValueKind>) -> T,
{
    Store::new(initializer)
}
