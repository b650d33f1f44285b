//! Serialized fragments and the JSON string escaping codec.
//!
//! A [`Fragment`] holds the already-serialized textual form of exactly one
//! value: `42`, `"abc"`, `[1,2,3]`, `{"a":1}`. Fragments compose (an
//! object's fragment is built from its children's fragments), so everything
//! downstream of the dispatcher works purely in terms of this type.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::{to_fragment, Fragment};
//!
//! let frag = to_fragment(&"he said \"hi\"").unwrap();
//! assert_eq!(frag.as_str(), r#""he said \"hi\"""#);
//! ```

use std::fmt;

/// The serialized text of exactly one value.
///
/// Immutable once constructed. Comparing fragments compares their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Wraps already-serialized text. The caller is responsible for the text
    /// being a complete serialized value.
    #[must_use]
    pub fn from_raw(text: impl Into<String>) -> Self {
        Fragment(text.into())
    }

    /// The sentinel emitted for values no conversion path applies to.
    #[must_use]
    pub fn unsupported() -> Self {
        Fragment("\"[unsupported type]\"".to_string())
    }

    /// Returns the fragment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fragment, returning the underlying text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the length of the fragment text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the fragment text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Fragment> for String {
    fn from(fragment: Fragment) -> Self {
        fragment.0
    }
}

/// Appends `s` to `out` with JSON string escaping applied.
///
/// Escapes `"`, `\`, backspace, form feed, `\n`, `\r`, `\t`; any other
/// character below 0x20 becomes a `\u00XX` sequence with uppercase hex.
pub fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        escape_char_into(out, ch);
    }
}

/// Appends one character to `out` with JSON string escaping applied.
pub fn escape_char_into(out: &mut String, ch: char) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\u{0008}' => out.push_str("\\b"),
        '\u{000C}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if (c as u32) < 0x20 => {
            out.push_str(&format!("\\u{:04X}", c as u32));
        }
        c => out.push(c),
    }
}

/// Appends `s` to `out` as a double-quoted, escaped JSON string.
pub fn quote_into(out: &mut String, s: &str) {
    out.push('"');
    escape_into(out, s);
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(s: &str) -> String {
        let mut out = String::new();
        escape_into(&mut out, s);
        out
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escaped("hello world"), "hello world");
        assert_eq!(escaped(""), "");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escaped("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escaped("a\\b"), "a\\\\b");
    }

    #[test]
    fn named_control_characters_use_short_escapes() {
        assert_eq!(escaped("a\nb"), "a\\nb");
        assert_eq!(escaped("a\rb"), "a\\rb");
        assert_eq!(escaped("a\tb"), "a\\tb");
        assert_eq!(escaped("a\u{0008}b"), "a\\bb");
        assert_eq!(escaped("a\u{000C}b"), "a\\fb");
    }

    #[test]
    fn other_control_characters_use_unicode_escapes() {
        assert_eq!(escaped("\u{0001}"), "\\u0001");
        assert_eq!(escaped("\u{001F}"), "\\u001F");
        assert_eq!(escaped("\u{0000}"), "\\u0000");
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        assert_eq!(escaped("héllo"), "héllo");
        assert_eq!(escaped("日本"), "日本");
    }

    #[test]
    fn quote_into_wraps_and_escapes() {
        let mut out = String::new();
        quote_into(&mut out, "line\nbreak");
        assert_eq!(out, "\"line\\nbreak\"");
    }

    #[test]
    fn fragment_accessors() {
        let frag = Fragment::from_raw("42");
        assert_eq!(frag.as_str(), "42");
        assert_eq!(frag.to_string(), "42");
        assert_eq!(frag.len(), 2);
        assert!(!frag.is_empty());
        assert_eq!(String::from(frag), "42");
    }

    #[test]
    fn unsupported_sentinel_text() {
        assert_eq!(Fragment::unsupported().as_str(), "\"[unsupported type]\"");
    }
}
