//! The document builder (output assembler).
//!
//! A [`DocumentBuilder`] accumulates named fragments and finalizes them into
//! one `{"name":value,...}` document. The iteration order of the finalized
//! document is governed by a [`FieldOrder`] policy chosen at construction;
//! the appended fragments themselves are never reordered or rewritten.
//!
//! Builders are reusable: [`DocumentBuilder::clear`] resets one for the next
//! document while keeping the backing allocation where the store supports it.
//! A builder is owned by one in-flight serialize call at a time; it is not a
//! shared concurrent structure.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::{DocumentBuilder, FieldOrder};
//!
//! let mut builder = DocumentBuilder::new(FieldOrder::Sorted);
//! builder.append_value("b", &2i64).unwrap();
//! builder.append_value("a", &1i64).unwrap();
//! assert_eq!(builder.finalize().as_str(), r#"{"a":1,"b":2}"#);
//!
//! builder.clear();
//! assert_eq!(builder.finalize().as_str(), "{}");
//! ```

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::emit::Emit;
use crate::fragment::{quote_into, Fragment};
use crate::Result;

/// Field-ordering policy for a finalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldOrder {
    /// Unspecified, implementation-defined order (hash-map iteration).
    /// A later append with a seen name overwrites the earlier fragment.
    #[default]
    Hash,
    /// Lexicographic order of field names. Overwrite-on-duplicate.
    Sorted,
    /// The order names were first appended. A later append with a seen name
    /// updates the fragment without moving its position.
    FirstSeen,
    /// Same storage as [`FieldOrder::FirstSeen`], emitted in reverse of
    /// first-seen order.
    LastSeenReversed,
}

enum Store {
    Hash(HashMap<String, Fragment>),
    Sorted(BTreeMap<String, Fragment>),
    // FirstSeen and LastSeenReversed share insertion-ordered storage; the
    // policy only changes the direction finalize walks it.
    Seen(IndexMap<String, Fragment>),
}

/// Accumulates named fragments into a single document.
pub struct DocumentBuilder {
    order: FieldOrder,
    store: Store,
}

impl DocumentBuilder {
    /// Creates an empty builder with the given ordering policy.
    #[must_use]
    pub fn new(order: FieldOrder) -> Self {
        let store = match order {
            FieldOrder::Hash => Store::Hash(HashMap::new()),
            FieldOrder::Sorted => Store::Sorted(BTreeMap::new()),
            FieldOrder::FirstSeen | FieldOrder::LastSeenReversed => {
                Store::Seen(IndexMap::new())
            }
        };
        DocumentBuilder { order, store }
    }

    /// Returns the builder's ordering policy.
    #[must_use]
    pub fn order(&self) -> FieldOrder {
        self.order
    }

    /// Appends a named fragment.
    ///
    /// Duplicate names follow the policy's semantics: overwrite for hash and
    /// sorted order, update-in-place for the seen orders.
    pub fn append(&mut self, name: &str, fragment: Fragment) {
        match &mut self.store {
            Store::Hash(map) => {
                map.insert(name.to_string(), fragment);
            }
            Store::Sorted(map) => {
                map.insert(name.to_string(), fragment);
            }
            Store::Seen(map) => {
                // IndexMap keeps the original position on re-insert.
                map.insert(name.to_string(), fragment);
            }
        }
    }

    /// Dispatches `value` and appends its fragment under `name`.
    pub fn append_value<T: Emit>(&mut self, name: &str, value: &T) -> Result<()> {
        let fragment = value.to_fragment()?;
        self.append(name, fragment);
        Ok(())
    }

    /// Returns the number of named fragments held.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Hash(map) => map.len(),
            Store::Sorted(map) => map.len(),
            Store::Seen(map) => map.len(),
        }
    }

    /// Returns `true` if no fragments have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finalizes the accumulated fragments into one document fragment.
    ///
    /// Idempotent: the builder is not mutated, and repeated calls yield
    /// identical text. Zero appended fields finalize to `{}`.
    #[must_use]
    pub fn finalize(&self) -> Fragment {
        let mut out = String::with_capacity(self.estimated_len());
        out.push('{');
        match &self.store {
            Store::Hash(map) => write_fields(&mut out, map.iter()),
            Store::Sorted(map) => write_fields(&mut out, map.iter()),
            Store::Seen(map) => match self.order {
                FieldOrder::LastSeenReversed => write_fields(&mut out, map.iter().rev()),
                _ => write_fields(&mut out, map.iter()),
            },
        }
        out.push('}');
        Fragment::from_raw(out)
    }

    /// Resets the builder to empty for reuse, keeping backing allocations
    /// where the store supports it.
    pub fn clear(&mut self) {
        match &mut self.store {
            Store::Hash(map) => map.clear(),
            Store::Sorted(map) => map.clear(),
            Store::Seen(map) => map.clear(),
        }
    }

    fn estimated_len(&self) -> usize {
        let per_field =
            |acc: usize, (name, fragment): (&String, &Fragment)| acc + name.len() + fragment.len() + 5;
        2 + match &self.store {
            Store::Hash(map) => map.iter().fold(0, per_field),
            Store::Sorted(map) => map.iter().fold(0, per_field),
            Store::Seen(map) => map.iter().fold(0, per_field),
        }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(FieldOrder::default())
    }
}

fn write_fields<'a, I>(out: &mut String, fields: I)
where
    I: Iterator<Item = (&'a String, &'a Fragment)>,
{
    let mut first = true;
    for (name, fragment) in fields {
        if !first {
            out.push(',');
        }
        quote_into(out, name);
        out.push(':');
        out.push_str(fragment.as_str());
        first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str) -> Fragment {
        Fragment::from_raw(text)
    }

    #[test]
    fn empty_builder_finalizes_to_empty_document() {
        for order in [
            FieldOrder::Hash,
            FieldOrder::Sorted,
            FieldOrder::FirstSeen,
            FieldOrder::LastSeenReversed,
        ] {
            let builder = DocumentBuilder::new(order);
            assert_eq!(builder.finalize().as_str(), "{}");
        }
    }

    #[test]
    fn finalize_is_idempotent() {
        let mut builder = DocumentBuilder::new(FieldOrder::Hash);
        builder.append("a", frag("1"));
        builder.append("b", frag("true"));
        let first = builder.finalize();
        let second = builder.finalize();
        assert_eq!(first, second);
    }

    #[test]
    fn sorted_order_is_lexicographic() {
        let mut builder = DocumentBuilder::new(FieldOrder::Sorted);
        builder.append("zeta", frag("1"));
        builder.append("alpha", frag("2"));
        builder.append("mid", frag("3"));
        assert_eq!(
            builder.finalize().as_str(),
            "{\"alpha\":2,\"mid\":3,\"zeta\":1}"
        );
    }

    #[test]
    fn first_seen_keeps_position_on_duplicate() {
        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        builder.append("n", frag("\"A\""));
        builder.append("other", frag("0"));
        builder.append("n", frag("\"B\""));
        assert_eq!(
            builder.finalize().as_str(),
            "{\"n\":\"B\",\"other\":0}"
        );
    }

    #[test]
    fn last_seen_reversed_emits_reverse_first_seen_order() {
        let mut builder = DocumentBuilder::new(FieldOrder::LastSeenReversed);
        builder.append("first", frag("1"));
        builder.append("second", frag("2"));
        builder.append("third", frag("3"));
        assert_eq!(
            builder.finalize().as_str(),
            "{\"third\":3,\"second\":2,\"first\":1}"
        );
    }

    #[test]
    fn hash_order_overwrites_duplicates() {
        let mut builder = DocumentBuilder::new(FieldOrder::Hash);
        builder.append("k", frag("1"));
        builder.append("k", frag("2"));
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.finalize().as_str(), "{\"k\":2}");
    }

    #[test]
    fn clear_resets_for_reuse() {
        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        builder.append("a", frag("1"));
        assert!(!builder.is_empty());
        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.finalize().as_str(), "{}");

        builder.append("b", frag("2"));
        assert_eq!(builder.finalize().as_str(), "{\"b\":2}");
    }

    #[test]
    fn keys_are_quoted_and_escaped() {
        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        builder.append("odd\"name", frag("1"));
        assert_eq!(builder.finalize().as_str(), "{\"odd\\\"name\":1}");
    }

    #[test]
    fn append_value_dispatches() {
        let mut builder = DocumentBuilder::new(FieldOrder::FirstSeen);
        builder.append_value("n", &5i64).unwrap();
        builder.append_value("tags", &vec!["a".to_string()]).unwrap();
        assert_eq!(
            builder.finalize().as_str(),
            "{\"n\":5,\"tags\":[\"a\"]}"
        );
    }

    #[test]
    fn hash_order_contents_are_complete() {
        let mut builder = DocumentBuilder::new(FieldOrder::Hash);
        builder.append("x", frag("1"));
        builder.append("y", frag("2"));
        let parsed: serde_json::Value =
            serde_json::from_str(builder.finalize().as_str()).unwrap();
        assert_eq!(parsed, serde_json::json!({"x": 1, "y": 2}));
    }
}
