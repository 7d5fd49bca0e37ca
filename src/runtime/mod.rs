//! Observer bookkeeping for stores.
//!
//! This module holds the registry of listeners and watchers that a store
//! notifies after every committed update.

mod context;

pub(crate) use context::{Listener, ObserverId, Registry, Watch, WatchSlot};
