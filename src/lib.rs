//! # Cubby
//!
//! A minimal external state container for reactive UI layers.
//!
//! A store holds a single value of any shape and exposes controlled
//! mutation. Two kinds of observers hear about updates:
//!
//! - **Listeners** (`subscribe`) fire after every update, unconditionally.
//!   They drive re-rendering.
//! - **Watchers** (`watch`) run a selector after every update and fire only
//!   when the selected value changed, compared with [`ShallowEq`]: scalars
//!   and strings by value, `Rc`/`Arc` by identity.
//!
//! ## Store kinds
//!
//! The update policy is fixed when the store is built:
//!
//! - [`create_record_store`]: updates are partial patches merged into a
//!   fresh copy of the state. Use [`record!`] or implement [`Record`].
//! - [`create_value_store`]: updates replace the whole value. Works for
//!   numbers, strings, vectors, enums, and closures alike.
//!
//! Updaters that compute the next value from the current one are an
//! explicit [`Update`] variant, so replacing a closure-valued state is never
//! mistaken for an updater.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use cubby::{create_record_store, record};
//!
//! record! {
//!     #[derive(Clone)]
//!     pub struct Counter => CounterPatch {
//!         pub count: i64,
//!         pub increment: Rc<dyn Fn()>,
//!     }
//! }
//!
//! let counter = create_record_store(|set, _get| Counter {
//!     count: 0,
//!     increment: Rc::new(move || {
//!         let _ = set.set_with(|s: &Counter| CounterPatch::default().count(s.count + 1));
//!     }),
//! });
//!
//! let last = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&last);
//! let _watch = counter.watch(|s| s.count, move |new, _old| seen.set(*new));
//!
//! (counter.get_state().increment)();
//! (counter.get_state().increment)();
//! assert_eq!(counter.get_state().count, 2);
//! assert_eq!(last.get(), 2);
//! ```
//!
//! ## Host integration
//!
//! The engine never talks to a renderer. [`Store::bind`] and
//! [`Store::bind_with`] expose an [`ExternalStore`] (subscribe + snapshot)
//! for whatever UI layer drives rendering; [`SyncExternalStore`] is a
//! reference adapter with the usual "re-render when the snapshot changed"
//! contract.

pub mod compare;
pub mod config;
pub mod error;
pub mod external;
pub mod record;
pub(crate) mod runtime;
pub mod store;
mod subscription;

// Re-export main types for convenience
pub use compare::ShallowEq;
pub use config::{Reentrancy, StoreConfig};
pub use error::StoreError;
pub use external::{ExternalStore, Selected, SyncExternalStore};
pub use record::Record;
pub use store::{
    create_record_store, create_value_store, Getter, RecordKind, RecordStore, Setter, StateKind,
    Store, Update, ValueKind, ValueStore,
};
pub use subscription::{Subscription, SubscriptionGuard};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let store: ValueStore<i32> = create_value_store(|_, _| 0);
        assert_eq!(*store.get_state(), 0);
        store.set_state(42);
        assert_eq!(*store.get_state(), 42);
    }
}
