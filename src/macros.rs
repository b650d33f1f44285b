//! The [`record_fields!`](crate::record_fields) macro.
//!
//! Hand-written [`Record`](crate::Record) impls are a per-field call into the
//! sink; for the common case where a struct exposes fields under their own
//! names, the macro writes that impl (plus the [`Emit`](crate::Emit) impl
//! that lets the type nest inside other records and containers).
//!
//! Three field forms compose freely inside the braces:
//!
//! - `field` exposes `self.field` under the name `"field"`.
//! - `field => "name"` exposes it under a different document name.
//! - `extends base` splices the fields of `self.base` (itself a `Record`)
//!   into this record, flat, before the fields that follow.
//!
//! Fields whose type has no [`Emit`](crate::Emit) impl are not a compile
//! error; they serialize as the `"[unsupported type]"` placeholder.

/// Implements [`Record`](crate::Record) and [`Emit`](crate::Emit) for a
/// struct by listing the fields it exposes.
///
/// Field order in the invocation is presentation order; whether it survives
/// into the document depends on the
/// [`FieldOrder`](crate::FieldOrder) in effect.
///
/// # Examples
///
/// ```rust
/// use typed_json::{record_fields, to_json_with_order, FieldOrder};
///
/// struct Entity {
///     id: u64,
///     name: String,
/// }
/// record_fields!(Entity { id, name });
///
/// struct Player {
///     entity: Entity,
///     score: i64,
///     secret: String,
/// }
/// // `secret` is left out; `score` is renamed; `entity`'s fields are
/// // spliced in flat.
/// record_fields!(Player {
///     extends entity,
///     score => "points",
/// });
///
/// let player = Player {
///     entity: Entity { id: 7, name: "zed".to_string() },
///     score: 1200,
///     secret: "hunter2".to_string(),
/// };
/// let text = to_json_with_order(&player, FieldOrder::FirstSeen).unwrap();
/// assert_eq!(text, r#"{"id":7,"name":"zed","points":1200}"#);
/// # let _ = player.secret;
/// ```
#[macro_export]
macro_rules! record_fields {
    ($ty:ty { $($body:tt)* }) => {
        impl $crate::record::Record for $ty {
            fn present_fields(
                &self,
                sink: &mut dyn $crate::record::FieldSink,
            ) -> $crate::Result<()> {
                $crate::record_fields!(@fields self, sink, $($body)*);
                Ok(())
            }
        }

        impl $crate::emit::Emit for $ty {
            fn kind(&self) -> $crate::emit::ValueKind {
                $crate::emit::ValueKind::Record
            }

            fn emit(&self, out: &mut ::std::string::String) -> $crate::Result<()> {
                out.push_str($crate::record::record_fragment(self)?.as_str());
                Ok(())
            }

            fn present(
                &self,
                name: &str,
                sink: &mut dyn $crate::record::FieldSink,
            ) -> $crate::Result<()> {
                sink.accept_record(
                    name,
                    self,
                    &|nested: &mut dyn $crate::record::FieldSink| {
                        $crate::record::Record::present_fields(self, nested)
                    },
                )
            }
        }
    };

    (@fields $self_:ident, $sink:ident,) => {};
    (@fields $self_:ident, $sink:ident, extends $base:ident $(, $($rest:tt)*)?) => {
        $crate::record::Record::present_fields(&$self_.$base, $sink)?;
        $crate::record_fields!(@fields $self_, $sink, $($($rest)*)?);
    };
    (@fields $self_:ident, $sink:ident, $field:ident => $name:literal $(, $($rest:tt)*)?) => {
        $crate::record_fields!(@one $self_, $sink, $field, $name);
        $crate::record_fields!(@fields $self_, $sink, $($($rest)*)?);
    };
    (@fields $self_:ident, $sink:ident, $field:ident $(, $($rest:tt)*)?) => {
        $crate::record_fields!(@one $self_, $sink, $field, stringify!($field));
        $crate::record_fields!(@fields $self_, $sink, $($($rest)*)?);
    };

    (@one $self_:ident, $sink:ident, $field:ident, $name:expr) => {{
        #[allow(unused_imports)]
        use $crate::emit::{PresentSupported as _, PresentUnsupported as _};
        (&$crate::emit::FieldProxy(&$self_.$field)).present_field($name, $sink)?;
    }};
}
