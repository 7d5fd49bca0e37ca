//! Counter application: a record store with methods, a watcher, and a
//! render binding

use std::rc::Rc;

use cubby::{record, RecordStore, StoreConfig, SyncExternalStore};
use tracing_subscriber::EnvFilter;

record! {
    #[derive(Clone)]
    struct Counter => CounterPatch {
        count: i32,
        step: i32,
        increment: Rc<dyn Fn()>,
        decrement: Rc<dyn Fn()>,
        reset: Rc<dyn Fn()>,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Application ===\n");

    println!("1. Initializing counter store");
    let store = RecordStore::<Counter>::with_config(StoreConfig::new("counter"), |set, _| {
        let (inc_set, dec_set) = (set.clone(), set.clone());
        Counter {
            count: 0,
            step: 1,
            increment: Rc::new(move || {
                let _ = inc_set
                    .set_with(|s: &Counter| CounterPatch::default().count(s.count + s.step));
            }),
            decrement: Rc::new(move || {
                let _ = dec_set
                    .set_with(|s: &Counter| CounterPatch::default().count(s.count - s.step));
            }),
            reset: Rc::new(move || {
                let _ = set.set_state(CounterPatch::default().count(0));
            }),
        }
    });

    println!("\n2. Watching the count");
    let watch = store.watch(
        |s| s.count,
        |new, old| println!("   [Watch] count {old} -> {new}"),
    );

    println!("\n3. Binding the count for rendering");
    let view = SyncExternalStore::new(store.bind_with(|s| s.count), || {
        println!("   [Render] count changed");
    });

    println!("\n4. Incrementing twice");
    (store.get_state().increment)();
    (store.get_state().increment)();

    println!("\n5. Changing the step (no count change, no render)");
    store.set_state(CounterPatch::default().step(5));

    println!("\n6. Decrementing with step 5");
    (store.get_state().decrement)();
    println!("   Rendered value: {}", view.snapshot());

    println!("\n7. Stop watching, then reset");
    watch.unsubscribe();
    (store.get_state().reset)();

    println!("\nFinal count: {}", store.get_state().count);
    println!("\n✓ Example complete!");
}
