//! One store per kind of state: number, string, boolean, array, union,
//! and function

use std::rc::Rc;

use cubby::{create_value_store, shallow_eq_by_value, Update, ValueStore};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq)]
enum Union {
    Text(String),
    Number(i64),
    Null,
}

shallow_eq_by_value!(Union);

type Greeter = Rc<dyn Fn(&str) -> String>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Store Kinds ===\n");

    println!("1. Number");
    let number: ValueStore<i32> = create_value_store(|_, _| 0);
    let _ = number.subscribe({
        let number = number.clone();
        move || println!("   [Number] {}", number.get_state())
    });
    number.set_with(|n| n + 1);
    number.set_state(42);
    number.set_state(Update::Empty);

    println!("\n2. String");
    let text: ValueStore<String> = create_value_store(|_, _| String::new());
    text.set_state("Hello".to_string());
    text.set_with(|prev| format!("{prev}!"));
    println!("   [String] {:?}", text.get_state());

    println!("\n3. Boolean");
    let flag: ValueStore<bool> = create_value_store(|_, _| false);
    flag.set_with(|on| !on);
    println!("   [Boolean] {}", flag.get_state());

    println!("\n4. Array");
    let items: ValueStore<Vec<usize>> = create_value_store(|_, _| Vec::new());
    for _ in 0..3 {
        items.set_with(|prev| {
            let mut next = prev.clone();
            next.push(prev.len());
            next
        });
    }
    items.read(|v| println!("   [Array] {v:?} (length {})", v.len()));

    println!("\n5. Union");
    let union: ValueStore<Union> = create_value_store(|_, _| Union::Text(String::new()));
    let _ = union.watch(
        |u| Union::clone(u),
        |new, old| println!("   [Union] {old:?} -> {new:?}"),
    );
    union.set_state(Union::Number(123));
    union.set_state(Union::Null);
    println!("   [Union] {:?}", union.get_state());

    println!("\n6. Function");
    let greeter: ValueStore<Greeter> =
        create_value_store(|_, _| Rc::new(|_: &str| "initial function".to_string()) as Greeter);
    println!("   [Function] {}", (greeter.get_state())("world"));
    greeter.set_state(Rc::new(|name: &str| format!("Hello, {name}")) as Greeter);
    println!("   [Function] {}", (greeter.get_state())("world"));

    println!("\n✓ Example complete!");
}
