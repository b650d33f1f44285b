//! # typed_json
//!
//! A type-directed JSON serialization engine with pluggable field ordering
//! and a rule-based validation pipeline.
//!
//! ## How it works
//!
//! Every serializable value implements [`Emit`], which pairs the value with
//! the JSON grammar of its type at compile time: booleans become `true` and
//! `false`, integers and floats become bare numerals, strings become quoted
//! escaped text, containers bracket their elements. There is no runtime
//! format negotiation; the compiler picks the conversion.
//!
//! Structures opt in as [`Record`]s, presenting any subset of their fields
//! by name. Fields a record never presents simply do not exist in the
//! output, which makes redaction a structural property rather than a
//! post-processing step.
//!
//! ## Key Features
//!
//! - **Type-Directed**: One statically chosen conversion per value type,
//!   with graceful `"[unsupported type]"` placeholders for everything else
//! - **Four Field Orders**: Hash (fastest), sorted, first-seen, and
//!   reverse-first-seen document assembly via [`FieldOrder`]
//! - **Rule-Based Validation**: Per-type, per-field, and general rules with
//!   short-circuit evaluation via [`Validator`]
//! - **Path-Aware Pipeline**: [`ValidatedPipeline`] reports rejected fields
//!   by dotted path (`user.address.zip`), collecting errors or failing fast
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! typed_json = "0.1"
//! ```
//!
//! ### Basic serialization
//!
//! ```rust
//! use typed_json::{record_fields, to_json_with_order, FieldOrder};
//!
//! struct User {
//!     id: u64,
//!     name: String,
//!     active: bool,
//! }
//! record_fields!(User { id, name, active });
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let json = to_json_with_order(&user, FieldOrder::FirstSeen).unwrap();
//! assert_eq!(json, r#"{"id":123,"name":"Alice","active":true}"#);
//! ```
//!
//! ### Validated serialization
//!
//! ```rust
//! use typed_json::{
//!     record_fields, ValidatedPipeline, ValidationOutcome, Validator,
//! };
//!
//! struct Account {
//!     username: String,
//!     age: i64,
//! }
//! record_fields!(Account { username, age });
//!
//! let mut validator = Validator::new();
//! validator.add_field_rule(
//!     "age",
//!     |_name, fragment| {
//!         if fragment.starts_with('-') {
//!             ValidationOutcome::reject("age cannot be negative")
//!         } else {
//!             ValidationOutcome::accept()
//!         }
//!     },
//!     "age >= 0",
//! );
//!
//! let mut pipeline = ValidatedPipeline::new().with_validator(&validator);
//! let account = Account { username: "bob".to_string(), age: -1 };
//! let json = pipeline.serialize(&account).unwrap();
//!
//! // The offending field is omitted and the rejection recorded.
//! assert!(pipeline.has_errors());
//! assert_eq!(pipeline.errors()[0].path, "age");
//! assert!(!json.contains("age"));
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Serialization**: O(n) in the number of fields and elements
//! - **Sorted order**: O(n log n) via ordered-map storage
//! - **Memory**: Documents are assembled into pre-sized buffers
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types
//! - Unknown field types degrade to a placeholder instead of panicking

pub mod builder;
pub mod emit;
pub mod error;
pub mod fragment;
pub mod macros;
pub mod pipeline;
pub mod record;
pub mod validate;

pub use builder::{DocumentBuilder, FieldOrder};
pub use emit::{Emit, ValueKind};
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use pipeline::{ErrorMode, ValidatedPipeline, ValidationError};
pub use record::{record_fragment, record_fragment_with_order, FieldSink, FieldSinkExt, Record};
pub use validate::{ValidationOutcome, Validator};

use std::io;

/// Serialize a record to a JSON string with the default (hash) field order.
///
/// # Examples
///
/// ```rust
/// use typed_json::{record_fields, to_json};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
/// record_fields!(Point { x, y });
///
/// let json = to_json(&Point { x: 1, y: 2 }).unwrap();
/// assert!(json.contains(r#""x":1"#));
/// ```
///
/// # Errors
///
/// Returns an error if a field's dispatch fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json<R>(record: &R) -> Result<String>
where
    R: ?Sized + Record,
{
    Ok(record_fragment(record)?.into_string())
}

/// Serialize a record to a JSON string with an explicit field order.
///
/// # Examples
///
/// ```rust
/// use typed_json::{record_fields, to_json_with_order, FieldOrder};
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
/// record_fields!(Point { y, x });
///
/// let json = to_json_with_order(&Point { x: 1, y: 2 }, FieldOrder::Sorted).unwrap();
/// assert_eq!(json, r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if a field's dispatch fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_json_with_order<R>(record: &R, order: FieldOrder) -> Result<String>
where
    R: ?Sized + Record,
{
    Ok(record_fragment_with_order(record, order)?.into_string())
}

/// Dispatch a single value to its JSON fragment.
///
/// # Examples
///
/// ```rust
/// use typed_json::to_fragment;
///
/// assert_eq!(to_fragment(&true).unwrap().as_str(), "true");
/// assert_eq!(to_fragment(&"hi".to_string()).unwrap().as_str(), r#""hi""#);
/// assert_eq!(to_fragment(&vec![1i64, 2]).unwrap().as_str(), "[1,2]");
/// ```
///
/// # Errors
///
/// Returns an error if dispatch fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_fragment<T>(value: &T) -> Result<Fragment>
where
    T: ?Sized + Emit,
{
    value.to_fragment()
}

/// Serialize a record as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, R>(mut writer: W, record: &R) -> Result<()>
where
    W: io::Write,
    R: ?Sized + Record,
{
    let json = to_json(record)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| Error::message(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Profile {
        name: String,
        level: u32,
        scores: Vec<i64>,
    }

    record_fields!(Profile {
        name,
        level,
        scores,
    });

    #[test]
    fn to_json_produces_parseable_output() {
        let profile = Profile {
            name: "zed".to_string(),
            level: 4,
            scores: vec![10, -3],
        };
        let json = to_json(&profile).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["name"], serde_json::json!("zed"));
        assert_eq!(parsed["level"], serde_json::json!(4));
        assert_eq!(parsed["scores"], serde_json::json!([10, -3]));
    }

    #[test]
    fn orders_agree_on_content() {
        let profile = Profile {
            name: "zed".to_string(),
            level: 4,
            scores: vec![1],
        };
        let mut parsed = Vec::new();
        for order in [
            FieldOrder::Hash,
            FieldOrder::Sorted,
            FieldOrder::FirstSeen,
            FieldOrder::LastSeenReversed,
        ] {
            let json = to_json_with_order(&profile, order).unwrap();
            parsed.push(serde_json::from_str::<serde_json::Value>(&json).unwrap());
        }
        assert!(parsed.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn to_writer_writes_the_document() {
        let profile = Profile {
            name: "io".to_string(),
            level: 1,
            scores: Vec::new(),
        };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &profile).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, serde_json::json!({"name": "io", "level": 1, "scores": []}));
    }
}
