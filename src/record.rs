//! The record contract and field sinks.
//!
//! A [`Record`] is a user-defined structure that knows how to present its
//! named fields to the engine. It implements exactly one operation,
//! [`Record::present_fields`], calling the sink once per field it wishes to
//! expose, in the order it wishes them considered. Omitting a member is a
//! deliberate redaction mechanism; any subset may be exposed.
//!
//! Most types get their impl from the [`record_fields!`](crate::record_fields)
//! macro, but a manual impl is just as valid:
//!
//! ```rust
//! use typed_json::{to_json_with_order, FieldOrder, FieldSink, FieldSinkExt, Record, Result};
//!
//! struct Session {
//!     token: String,
//!     user: String,
//!     seen: u64,
//! }
//!
//! impl Record for Session {
//!     fn present_fields(&self, sink: &mut dyn FieldSink) -> Result<()> {
//!         // `token` is deliberately withheld.
//!         sink.field("user", &self.user)?;
//!         sink.field("seen", &self.seen)
//!     }
//! }
//!
//! let session = Session {
//!     token: "secret".to_string(),
//!     user: "alice".to_string(),
//!     seen: 3,
//! };
//! let text = to_json_with_order(&session, FieldOrder::FirstSeen).unwrap();
//! assert_eq!(text, r#"{"user":"alice","seen":3}"#);
//! # let _ = session.token;
//! ```

use std::any::Any;

use crate::builder::{DocumentBuilder, FieldOrder};
use crate::emit::{Emit, ValueKind};
use crate::fragment::Fragment;
use crate::Result;

/// A structure exposing named fields to the engine.
pub trait Record {
    /// Presents each exposed field to `sink`, in presentation order.
    ///
    /// Propagate the sink's result with `?`: a fail-fast pipeline aborts the
    /// traversal through this return value.
    fn present_fields(&self, sink: &mut dyn FieldSink) -> Result<()>;
}

/// Receiver for the fields a [`Record`] presents.
///
/// Implemented by the plain document sink and by the validated pipeline.
/// Record authors normally go through [`FieldSinkExt::field`] rather than
/// calling these directly.
pub trait FieldSink {
    /// Accepts one field whose fragment is already computed.
    fn accept_value(
        &mut self,
        name: &str,
        kind: ValueKind,
        value: &dyn Any,
        fragment: Fragment,
    ) -> Result<()>;

    /// Accepts a nested-record field.
    ///
    /// `present` replays the record's fields into whatever sink the
    /// implementation supplies, letting it recurse with its own state (path
    /// tracking, nested builders) instead of receiving an opaque fragment.
    fn accept_record(
        &mut self,
        name: &str,
        value: &dyn Any,
        present: &dyn Fn(&mut dyn FieldSink) -> Result<()>,
    ) -> Result<()>;
}

/// Convenience surface over `dyn FieldSink`: serialize one named field.
pub trait FieldSinkExt {
    /// Dispatches `value` and hands the result to the sink under `name`.
    fn field<T: Emit>(&mut self, name: &str, value: &T) -> Result<()>;
}

impl FieldSinkExt for dyn FieldSink + '_ {
    fn field<T: Emit>(&mut self, name: &str, value: &T) -> Result<()> {
        value.present(name, self)
    }
}

/// Serializes a record into a document fragment with the default (hash)
/// field order.
///
/// This is the conversion path record [`Emit`] impls use when a record is
/// nested inside a container.
pub fn record_fragment<R: Record + ?Sized>(record: &R) -> Result<Fragment> {
    record_fragment_with_order(record, FieldOrder::default())
}

/// Serializes a record into a document fragment with an explicit field order.
///
/// Directly nested records inherit the same order.
pub fn record_fragment_with_order<R: Record + ?Sized>(
    record: &R,
    order: FieldOrder,
) -> Result<Fragment> {
    let mut builder = DocumentBuilder::new(order);
    record.present_fields(&mut BuilderSink {
        builder: &mut builder,
    })?;
    Ok(builder.finalize())
}

/// Plain sink: appends accepted fragments straight into a builder.
struct BuilderSink<'a> {
    builder: &'a mut DocumentBuilder,
}

impl FieldSink for BuilderSink<'_> {
    fn accept_value(
        &mut self,
        name: &str,
        _kind: ValueKind,
        _value: &dyn Any,
        fragment: Fragment,
    ) -> Result<()> {
        self.builder.append(name, fragment);
        Ok(())
    }

    fn accept_record(
        &mut self,
        name: &str,
        _value: &dyn Any,
        present: &dyn Fn(&mut dyn FieldSink) -> Result<()>,
    ) -> Result<()> {
        let mut nested = DocumentBuilder::new(self.builder.order());
        present(&mut BuilderSink {
            builder: &mut nested,
        })?;
        self.builder.append(name, nested.finalize());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i64,
        y: i64,
    }

    impl Record for Point {
        fn present_fields(&self, sink: &mut dyn FieldSink) -> Result<()> {
            sink.field("x", &self.x)?;
            sink.field("y", &self.y)
        }
    }

    struct Empty;

    impl Record for Empty {
        fn present_fields(&self, _sink: &mut dyn FieldSink) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn fields_appear_in_presentation_order_for_first_seen() {
        let frag = record_fragment_with_order(&Point { x: 1, y: 2 }, FieldOrder::FirstSeen)
            .unwrap();
        assert_eq!(frag.as_str(), "{\"x\":1,\"y\":2}");
    }

    #[test]
    fn zero_field_record_is_the_empty_document() {
        let frag = record_fragment(&Empty).unwrap();
        assert_eq!(frag.as_str(), "{}");
    }

    #[test]
    fn records_participate_in_container_traversal() {
        struct Wrap {
            points: Vec<Point>,
        }

        impl Record for Wrap {
            fn present_fields(&self, sink: &mut dyn FieldSink) -> Result<()> {
                sink.field("points", &self.points)
            }
        }

        // Point needs Emit to sit inside a Vec; the macro normally provides
        // this, here we spell it out.
        impl Emit for Point {
            fn kind(&self) -> ValueKind {
                ValueKind::Record
            }

            fn emit(&self, out: &mut String) -> Result<()> {
                out.push_str(record_fragment(self)?.as_str());
                Ok(())
            }

            fn present(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()> {
                sink.accept_record(name, self, &|nested| self.present_fields(nested))
            }
        }

        let wrap = Wrap {
            points: vec![Point { x: 1, y: 2 }],
        };
        let frag = record_fragment_with_order(&wrap, FieldOrder::FirstSeen).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(frag.as_str()).unwrap();
        assert_eq!(parsed["points"][0]["x"], serde_json::json!(1));
        assert_eq!(parsed["points"][0]["y"], serde_json::json!(2));
    }
}
