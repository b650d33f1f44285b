//! Property-based tests: generated inputs must always produce documents
//! that standard JSON tooling parses back to the same content.

use proptest::prelude::*;
use typed_json::{record_fields, to_fragment, to_json, DocumentBuilder, FieldOrder, Fragment};

fn parsed<T: typed_json::Emit>(value: &T) -> serde_json::Value {
    let fragment = to_fragment(value).unwrap();
    serde_json::from_str(fragment.as_str()).unwrap_or_else(|e| {
        panic!("fragment {:?} is not valid JSON: {}", fragment.as_str(), e)
    })
}

proptest! {
    #[test]
    fn prop_i64_roundtrips(n in any::<i64>()) {
        prop_assert_eq!(parsed(&n), serde_json::json!(n));
    }

    #[test]
    fn prop_u64_roundtrips(n in any::<u64>()) {
        prop_assert_eq!(parsed(&n), serde_json::json!(n));
    }

    #[test]
    fn prop_i8_roundtrips(n in any::<i8>()) {
        prop_assert_eq!(parsed(&n), serde_json::json!(n));
    }

    #[test]
    fn prop_bool_roundtrips(b in any::<bool>()) {
        prop_assert_eq!(parsed(&b), serde_json::json!(b));
    }

    // Finite range only: non-finite floats are a validation concern and
    // deliberately have no JSON representation.
    #[test]
    fn prop_finite_f64_roundtrips(x in -1.0e15..1.0e15f64) {
        let value = parsed(&x);
        let back = value.as_f64().unwrap();
        prop_assert_eq!(back, x);
    }

    #[test]
    fn prop_escaped_strings_roundtrip(s in ".*") {
        let value = parsed(&s.clone());
        prop_assert_eq!(value, serde_json::json!(s));
    }

    #[test]
    fn prop_vec_roundtrips(v in prop::collection::vec(any::<i64>(), 0..20)) {
        prop_assert_eq!(parsed(&v.clone()), serde_json::json!(v));
    }

    #[test]
    fn prop_string_keyed_map_roundtrips(
        m in prop::collection::btree_map(".*", any::<i64>(), 0..10)
    ) {
        let value = parsed(&m.clone());
        prop_assert_eq!(value, serde_json::json!(m));
    }

    #[test]
    fn prop_sorted_builder_emits_sorted_parseable_documents(
        fields in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12)
    ) {
        let mut builder = DocumentBuilder::new(FieldOrder::Sorted);
        for (name, value) in &fields {
            builder.append_value(name, value).unwrap();
        }
        let json = builder.finalize().into_string();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(value, serde_json::json!(fields.clone()));

        // Sorted emission means field positions follow key order.
        let mut last = 0;
        for name in fields.keys() {
            let pos = json.find(&format!("\"{}\"", name)).unwrap();
            prop_assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn prop_first_seen_preserves_append_order(
        names in prop::collection::btree_set("[a-z]{1,8}", 1..10)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut shuffled = names.clone();
        shuffled.reverse();

        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        for (i, name) in shuffled.iter().enumerate() {
            builder.append(name, Fragment::from_raw(i.to_string()));
        }
        let json = builder.finalize().into_string();

        let mut last = 0;
        for name in &shuffled {
            let pos = json.find(&format!("\"{}\"", name)).unwrap();
            prop_assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn prop_records_always_parse(
        id in any::<u64>(),
        name in ".*",
        scores in prop::collection::vec(any::<i64>(), 0..8)
    ) {
        struct Entry {
            id: u64,
            name: String,
            scores: Vec<i64>,
        }
        record_fields!(Entry { id, name, scores });

        let entry = Entry { id, name: name.clone(), scores: scores.clone() };
        let json = to_json(&entry).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&value["id"], &serde_json::json!(id));
        prop_assert_eq!(&value["name"], &serde_json::json!(name));
        prop_assert_eq!(&value["scores"], &serde_json::json!(scores));
    }
}

proptest! {
    // Duplicate-append laws, exercised across arbitrary fragments.
    #[test]
    fn prop_first_seen_duplicate_updates_in_place(
        first in any::<i64>(),
        second in any::<i64>()
    ) {
        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        builder.append_value("dup", &first).unwrap();
        builder.append_value("tail", &0i64).unwrap();
        builder.append_value("dup", &second).unwrap();
        let json = builder.finalize().into_string();
        prop_assert_eq!(json, format!(r#"{{"dup":{},"tail":0}}"#, second));
    }
}
