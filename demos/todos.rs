//! Todo list: a record store whose methods update it through the
//! initializer handles

use std::rc::Rc;

use cubby::{create_record_store, record, RecordStore};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Todo {
    id: u32,
    text: String,
    done: bool,
}

record! {
    #[derive(Clone)]
    struct Todos => TodosPatch {
        todos: Rc<Vec<Todo>>,
        next_id: u32,
        add_todo: Rc<dyn Fn(&str)>,
        toggle_todo: Rc<dyn Fn(u32)>,
    }
}

fn todo_store() -> RecordStore<Todos> {
    create_record_store::<Todos, _>(|set, _| {
        let add_set = set.clone();
        Todos {
            todos: Rc::new(Vec::new()),
            next_id: 1,
            add_todo: Rc::new(move |text: &str| {
                let text = text.to_string();
                let _ = add_set.set_with(move |state| {
                    let mut todos = state.todos.as_ref().clone();
                    todos.push(Todo {
                        id: state.next_id,
                        text,
                        done: false,
                    });
                    TodosPatch::default()
                        .todos(Rc::new(todos))
                        .next_id(state.next_id + 1)
                });
            }),
            toggle_todo: Rc::new(move |id: u32| {
                let _ = set.try_set_with(move |state| {
                    state.todos.iter().any(|t| t.id == id).then(|| {
                        let todos = state
                            .todos
                            .iter()
                            .map(|t| Todo {
                                done: if t.id == id { !t.done } else { t.done },
                                ..t.clone()
                            })
                            .collect();
                        TodosPatch::default().todos(Rc::new(todos))
                    })
                });
            }),
        }
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Todo Store ===\n");

    let store = todo_store();

    // The list is shared by identity, so this only fires when it is rebuilt.
    let _ = store.watch(
        |s| Rc::clone(&s.todos),
        |todos, _| {
            let open = todos.iter().filter(|t| !t.done).count();
            println!("   [Todos] {} total, {} open", todos.len(), open);
        },
    );

    println!("1. Adding todos");
    (store.get_state().add_todo)("Learn Rust");
    (store.get_state().add_todo)("Build a store");
    (store.get_state().add_todo)("Write documentation");

    println!("\n2. Completing the first todo");
    (store.get_state().toggle_todo)(1);

    println!("\n3. Toggling a missing todo (no change)");
    (store.get_state().toggle_todo)(99);

    println!("\n4. Current todos:");
    store.read(|state| {
        for todo in state.todos.iter() {
            let status = if todo.done { "✓" } else { " " };
            println!("   [{}] {}", status, todo.text);
        }
    });

    println!("\n✓ Example complete!");
}
