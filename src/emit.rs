//! The type-directed dispatcher.
//!
//! [`Emit`] is the single generic entry point of the engine: implementing it
//! for a type decides, at compile time, which conversion path a value takes
//! (primitive codec, nested record recursion, sequence traversal, or
//! associative traversal). There is no runtime tag inspection anywhere; Rust's
//! trait resolution picks the impl per call site.
//!
//! ## Resolution paths
//!
//! - `bool` → `true`/`false`
//! - `char` → one-character quoted string, escaped
//! - `String` / `&'static str` → quoted, escaped
//! - `i8`–`i64`, `isize`, `u8`–`u64`, `usize` → decimal text
//! - `f32` / `f64` → Rust's `Display`, the shortest decimal that round-trips
//! - records (via [`Record`](crate::Record)) → nested document
//! - `HashMap` / `BTreeMap` / `IndexMap` → `{k0:v0,...}`
//! - `Vec`, `VecDeque`, arrays, `BTreeSet`, `HashSet`, `IndexSet` → `[e0,e1,...]`
//! - anything else, when declared through
//!   [`record_fields!`](crate::record_fields) → the `"[unsupported type]"`
//!   sentinel fragment instead of a build failure
//!
//! Rust's integer types are all nominally distinct (`isize` is not `i64`),
//! so every width gets its own impl and the native/fixed-width aliasing the
//! source design had to disambiguate cannot arise here.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::to_fragment;
//!
//! assert_eq!(to_fragment(&true).unwrap().as_str(), "true");
//! assert_eq!(to_fragment(&vec![1, 2, 3]).unwrap().as_str(), "[1,2,3]");
//! ```

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::fragment::{self, Fragment};
use crate::record::FieldSink;
use crate::Result;

/// The statically-resolved shape of a serializable value.
///
/// Carried alongside each emitted field for error attribution; the dispatcher
/// itself never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    Str,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Record,
    Sequence,
    Map,
    Unsupported,
}

impl ValueKind {
    /// Returns the kind's name as used in validation error reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
            ValueKind::Str => "string",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::Isize => "isize",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::Usize => "usize",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Record => "record",
            ValueKind::Sequence => "sequence",
            ValueKind::Map => "map",
            ValueKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value the dispatcher can convert into a [`Fragment`].
///
/// Implementations exist for every supported primitive, container, and (via
/// [`record_fields!`](crate::record_fields) or a manual impl) record type.
/// The dispatcher is pure: `emit` appends the serialized text and has no
/// other effect.
pub trait Emit: Any {
    /// The statically-known shape of this value.
    fn kind(&self) -> ValueKind;

    /// Appends this value's serialized text to `out`.
    fn emit(&self, out: &mut String) -> Result<()>;

    /// Serializes this value into a standalone [`Fragment`].
    fn to_fragment(&self) -> Result<Fragment> {
        let mut out = String::new();
        self.emit(&mut out)?;
        Ok(Fragment::from_raw(out))
    }

    /// Presents this value as a named field to a sink.
    ///
    /// The default hands the sink a finished fragment; record impls override
    /// this to route through [`FieldSink::accept_record`] so a validated
    /// pipeline can recurse with path tracking.
    fn present(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()>
    where
        Self: Sized,
    {
        let fragment = self.to_fragment()?;
        sink.accept_value(name, self.kind(), self, fragment)
    }
}

impl Emit for bool {
    fn kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        out.push_str(if *self { "true" } else { "false" });
        Ok(())
    }
}

impl Emit for char {
    fn kind(&self) -> ValueKind {
        ValueKind::Char
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        out.push('"');
        fragment::escape_char_into(out, *self);
        out.push('"');
        Ok(())
    }
}

impl Emit for String {
    fn kind(&self) -> ValueKind {
        ValueKind::Str
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        fragment::quote_into(out, self);
        Ok(())
    }
}

impl Emit for &'static str {
    fn kind(&self) -> ValueKind {
        ValueKind::Str
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        fragment::quote_into(out, self);
        Ok(())
    }
}

macro_rules! impl_emit_integer {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Emit for $ty {
                fn kind(&self) -> ValueKind {
                    ValueKind::$kind
                }

                fn emit(&self, out: &mut String) -> Result<()> {
                    out.push_str(&self.to_string());
                    Ok(())
                }
            }
        )*
    };
}

impl_emit_integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

// Display for floats is the shortest decimal string that parses back to the
// same value. Non-finite values render as NaN/inf; rejecting those is a rule
// engine concern, not a dispatcher concern.
impl Emit for f32 {
    fn kind(&self) -> ValueKind {
        ValueKind::F32
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        out.push_str(&self.to_string());
        Ok(())
    }
}

impl Emit for f64 {
    fn kind(&self) -> ValueKind {
        ValueKind::F64
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        out.push_str(&self.to_string());
        Ok(())
    }
}

/// Walks a sequence container in its natural iteration order, dispatching
/// each element and wrapping the results as `[e0,e1,...]`.
pub fn emit_sequence<'a, T, I>(elements: I, out: &mut String) -> Result<()>
where
    T: Emit + 'a,
    I: IntoIterator<Item = &'a T>,
{
    out.push('[');
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        element.emit(out)?;
    }
    out.push(']');
    Ok(())
}

/// Walks a key-value container in its natural iteration order, dispatching
/// each key and value and wrapping the results as `{k0:v0,k1:v1,...}`.
///
/// The key's fragment is used as the object key text verbatim, including any
/// quoting the fragment already carries.
pub fn emit_map<'a, K, V, I>(entries: I, out: &mut String) -> Result<()>
where
    K: Emit + 'a,
    V: Emit + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        key.emit(out)?;
        out.push(':');
        value.emit(out)?;
    }
    out.push('}');
    Ok(())
}

impl<T: Emit> Emit for Vec<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<T: Emit> Emit for VecDeque<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<T: Emit, const N: usize> Emit for [T; N] {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<T: Emit + Ord> Emit for BTreeSet<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<T: Emit + Eq + Hash> Emit for HashSet<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<T: Emit + Eq + Hash> Emit for IndexSet<T> {
    fn kind(&self) -> ValueKind {
        ValueKind::Sequence
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_sequence(self, out)
    }
}

impl<K: Emit, V: Emit> Emit for BTreeMap<K, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Map
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_map(self, out)
    }
}

impl<K: Emit + Eq + Hash, V: Emit> Emit for HashMap<K, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Map
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_map(self, out)
    }
}

impl<K: Emit + Eq + Hash, V: Emit> Emit for IndexMap<K, V> {
    fn kind(&self) -> ValueKind {
        ValueKind::Map
    }

    fn emit(&self, out: &mut String) -> Result<()> {
        emit_map(self, out)
    }
}

/// Wrapper that lets [`record_fields!`](crate::record_fields) degrade
/// gracefully when a field's type has no [`Emit`] impl.
///
/// The macro presents each field through
/// `(&FieldProxy(&value)).present_field(..)`. Method resolution prefers
/// [`PresentSupported`], implemented on `FieldProxy<T>` itself for `T: Emit`;
/// only when that impl does not apply does the extra auto-ref select
/// [`PresentUnsupported`] on `&FieldProxy<T>`, which hands the sink the
/// `"[unsupported type]"` sentinel. The decision is made entirely at compile
/// time from the field's static type.
pub struct FieldProxy<'a, T: ?Sized>(pub &'a T);

/// Dispatch path for fields whose type implements [`Emit`].
pub trait PresentSupported {
    fn present_field(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()>;
}

impl<T: Emit> PresentSupported for FieldProxy<'_, T> {
    fn present_field(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()> {
        self.0.present(name, sink)
    }
}

/// Fallback dispatch path: emits the sentinel fragment instead of refusing
/// to build.
pub trait PresentUnsupported {
    fn present_field(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()>;
}

impl<T: ?Sized> PresentUnsupported for &FieldProxy<'_, T> {
    fn present_field(&self, name: &str, sink: &mut dyn FieldSink) -> Result<()> {
        sink.accept_value(name, ValueKind::Unsupported, &(), Fragment::unsupported())
    }
}
