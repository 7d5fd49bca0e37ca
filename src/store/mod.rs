//! The store engine.
//!
//! A store owns one value and fans out notifications after every update:
//! first to watchers whose selected slice changed, then to every listener.
//! Record stores merge partial patches; value stores replace the value.

mod handle;
mod kind;
mod store;
mod update;

pub use handle::{Getter, Setter};
pub use kind::{RecordKind, StateKind, ValueKind};
pub use store::{create_record_store, create_value_store, RecordStore, Store, ValueStore};
pub use update::Update;
