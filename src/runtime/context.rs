use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::compare::ShallowEq;

/// Identifier handed out for every registered listener or watcher.
pub(crate) type ObserverId = usize;

/// A zero-argument render notification callback.
pub(crate) type Listener = Rc<dyn Fn()>;

/// A type-erased watcher over state `T`.
pub(crate) trait Watch<T> {
    /// Re-run the selector against `state` and fire the callback on change.
    fn check(&self, state: &Rc<T>);
}

/// Selector, callback, and the last selected value.
pub(crate) struct WatchSlot<T, U> {
    selector: Box<dyn Fn(&Rc<T>) -> U>,
    callback: Box<dyn Fn(&U, &U)>,
    prev: RefCell<U>,
}

impl<T, U> WatchSlot<T, U> {
    /// Build a slot, seeding `prev` from the current state.
    pub(crate) fn new<S, C>(state: &Rc<T>, selector: S, callback: C) -> Self
    where
        S: Fn(&Rc<T>) -> U + 'static,
        C: Fn(&U, &U) + 'static,
    {
        let prev = selector(state);
        Self {
            selector: Box::new(selector),
            callback: Box::new(callback),
            prev: RefCell::new(prev),
        }
    }
}

impl<T, U: ShallowEq + Clone> Watch<T> for WatchSlot<T, U> {
    fn check(&self, state: &Rc<T>) {
        let next = (self.selector)(state);
        if next.shallow_eq(&self.prev.borrow()) {
            return;
        }
        // Store the new value before calling out so a nested update compares
        // against it rather than a stale one.
        let old = self.prev.replace(next.clone());
        (self.callback)(&next, &old);
    }
}

/// Insertion-ordered registry of the observers of one store.
pub(crate) struct Registry<T> {
    next_id: ObserverId,
    live: HashSet<ObserverId>,
    listeners: Vec<(ObserverId, Listener)>,
    watchers: Vec<(ObserverId, Rc<dyn Watch<T>>)>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            live: HashSet::new(),
            listeners: Vec::new(),
            watchers: Vec::new(),
        }
    }

    fn next_id(&mut self) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        id
    }

    /// Register a listener. A callback already present (same allocation)
    /// keeps its existing id.
    pub(crate) fn add_listener(&mut self, listener: Listener) -> ObserverId {
        if let Some((id, _)) = self
            .listeners
            .iter()
            .find(|(_, existing)| Rc::ptr_eq(existing, &listener))
        {
            return *id;
        }
        let id = self.next_id();
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn add_watcher(&mut self, watcher: Rc<dyn Watch<T>>) -> ObserverId {
        let id = self.next_id();
        self.watchers.push((id, watcher));
        id
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub(crate) fn remove_observer(&mut self, id: ObserverId) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        self.listeners.retain(|(existing, _)| *existing != id);
        self.watchers.retain(|(existing, _)| *existing != id);
        true
    }

    pub(crate) fn contains(&self, id: ObserverId) -> bool {
        self.live.contains(&id)
    }

    /// Copy of the current listeners, in registration order.
    pub(crate) fn listeners(&self) -> Vec<(ObserverId, Listener)> {
        self.listeners.clone()
    }

    /// Copy of the current watchers, in registration order.
    pub(crate) fn watchers(&self) -> Vec<(ObserverId, Rc<dyn Watch<T>>)> {
        self.watchers.clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}
