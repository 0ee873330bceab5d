//! Demo of the fluent assertion API against a buffering sink.
//!
//! Run with `cargo run --example api-demo`. Failures are printed instead of
//! panicking so every block below gets to run.

use std::collections::HashMap;

use affirm::{that, that_map, that_number, that_slice, that_string, MockTest};

fn main() {
    let sink = MockTest::new();

    // Passing chains stay silent.
    that_number(&sink, 42).is_positive().is_between(1, 100);
    that_string(&sink, "order-42").has_prefix("order-").not_blank();
    that_slice(&sink, &[1, 2, 3]).contains(&2).is_increasing();
    that(&sink, true).is_true();
    println!("passing chains recorded: {:?}", sink.output());

    // A failing predicate records one block per failure.
    sink.reset();
    that_number(&sink, 5).equal(10);
    that_slice(&sink, &[3, 1, 2]).is_sorted();
    println!("\nrecorded failures:\n{}", sink.output());

    // must() escalates the chain to the fatal channel.
    sink.reset();
    let mut inventory = HashMap::new();
    inventory.insert("apples".to_string(), 3);
    that_map(&sink, &inventory)
        .msg("inventory check")
        .must()
        .contains_key(&"pears".to_string());
    println!("\nfatal failure:\n{}", sink.output());
}
