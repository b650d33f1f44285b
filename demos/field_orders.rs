//! The four document ordering policies, side by side.
//!
//! Run with: cargo run --example field_orders

use typed_json::{record_fields, to_json_with_order, FieldOrder};

struct Reading {
    sensor: String,
    value: f64,
    unit: String,
    battery: u8,
}

record_fields!(Reading {
    sensor,
    value,
    unit,
    battery,
});

fn main() {
    let reading = Reading {
        sensor: "greenhouse-3".to_string(),
        value: 21.5,
        unit: "C".to_string(),
        battery: 87,
    };

    for (label, order) in [
        ("Hash (fastest, unspecified order)", FieldOrder::Hash),
        ("Sorted (lexicographic)", FieldOrder::Sorted),
        ("FirstSeen (presentation order)", FieldOrder::FirstSeen),
        ("LastSeenReversed", FieldOrder::LastSeenReversed),
    ] {
        let json = to_json_with_order(&reading, order).unwrap();
        println!("{label}:\n  {json}\n");
    }
}
