//! Property-based tests for the store update and notification rules.
//!
//! 1. Record patches overwrite exactly the keys they carry
//! 2. Value updates replace the state; empty updates keep it
//! 3. An updater is equivalent to setting its result directly
//! 4. Listeners fire once per update call, whatever the update
//! 5. Watchers fire exactly when the selected value changes

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use cubby::{create_record_store, create_value_store, Update, ValueStore};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_map() -> impl Strategy<Value = BTreeMap<u8, i32>> {
    proptest::collection::btree_map(0u8..16, any::<i32>(), 0..=8)
}

#[derive(Debug, Clone)]
enum Op {
    Set(i32),
    Add(i32),
    Empty,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Set),
        (-100i32..100).prop_map(Op::Add),
        Just(Op::Empty),
    ]
}

fn apply(store: &ValueStore<i32>, op: &Op) {
    match *op {
        Op::Set(value) => store.set_state(value),
        Op::Add(delta) => store.set_with(move |n| n.wrapping_add(delta)),
        Op::Empty => store.set_state(Update::Empty),
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Record patches
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn record_patch_overwrites_only_its_keys(initial in arb_map(), patch in arb_map()) {
        let seed = initial.clone();
        let store = create_record_store(move |_, _| seed);
        store.set_state(patch.clone());

        let state = store.get_state();
        for (key, value) in &initial {
            let expected = patch.get(key).unwrap_or(value);
            prop_assert_eq!(state.get(key), Some(expected));
        }
        for (key, value) in &patch {
            prop_assert_eq!(state.get(key), Some(value));
        }
        prop_assert_eq!(
            state.len(),
            initial.keys().chain(patch.keys()).collect::<std::collections::BTreeSet<_>>().len()
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Value updates and updaters
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn value_ops_match_model(start in any::<i32>(), ops in proptest::collection::vec(arb_op(), 0..32)) {
        let store: ValueStore<i32> = create_value_store(move |_, _| start);
        let mut model = start;

        for op in &ops {
            apply(&store, op);
            match *op {
                Op::Set(value) => model = value,
                Op::Add(delta) => model = model.wrapping_add(delta),
                Op::Empty => {}
            }
            prop_assert_eq!(*store.get_state(), model);
        }
    }

    #[test]
    fn updater_equals_direct_set(start in any::<i32>(), delta in any::<i32>()) {
        let direct: ValueStore<i32> = create_value_store(move |_, _| start);
        let computed: ValueStore<i32> = create_value_store(move |_, _| start);

        let value = direct.get_state().wrapping_mul(delta);
        direct.set_state(value);
        computed.set_with(move |n| n.wrapping_mul(delta));

        prop_assert_eq!(*direct.get_state(), *computed.get_state());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Notifications
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn listener_fires_once_per_call(ops in proptest::collection::vec(arb_op(), 0..32)) {
        let store: ValueStore<i32> = create_value_store(|_, _| 0);
        let calls = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&calls);
        let _sub = store.subscribe(move || seen.set(seen.get() + 1));

        for op in &ops {
            apply(&store, op);
        }
        prop_assert_eq!(calls.get(), ops.len());
    }

    #[test]
    fn watcher_fires_on_parity_change(ops in proptest::collection::vec(arb_op(), 0..32)) {
        let store: ValueStore<i32> = create_value_store(|_, _| 0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _watch = store.watch(
            |n| n.rem_euclid(2),
            move |new, old| sink.borrow_mut().push((*new, *old)),
        );

        let mut expected = Vec::new();
        let mut prev = 0;
        for op in &ops {
            apply(&store, op);
            let next = store.get_state().rem_euclid(2);
            if next != prev {
                expected.push((next, prev));
                prev = next;
            }
        }
        prop_assert_eq!(&*log.borrow(), &expected);
    }
}
