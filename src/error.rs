//! Error types for JSON emission and validation.
//!
//! The dispatcher and container traversal never fail on their own; the only
//! error source in this crate is a validation rejection surfaced by a
//! fail-fast [`ValidatedPipeline`](crate::ValidatedPipeline). The
//! [`Error::Validation`] variant carries the dotted field path, the rule's
//! message, and the name of the rejected value's kind.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::Error;
//!
//! let err = Error::validation("user.age", "must be non-negative", "i64");
//! assert!(err.to_string().contains("user.age"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during serialization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A validation rule rejected a field.
    #[error("validation failed for field `{path}`: {message} (kind: {kind})")]
    Validation {
        /// Dotted path locating the field inside nested records.
        path: String,
        /// The rejecting rule's message.
        message: String,
        /// Name of the rejected value's kind.
        kind: String,
    },

    /// Generic message for errors raised by user record implementations.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a validation error for a rejected field.
    pub fn validation(
        path: impl Into<String>,
        message: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Error::Validation {
            path: path.into(),
            message: message.into(),
            kind: kind.into(),
        }
    }

    /// Creates an error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typed_json::Error;
    ///
    /// let err = Error::message("something went wrong");
    /// assert_eq!(err.to_string(), "something went wrong");
    /// ```
    pub fn message<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_triple() {
        let err = Error::validation("data.id", "must be non-negative", "i32");
        let text = err.to_string();
        assert!(text.contains("data.id"));
        assert!(text.contains("must be non-negative"));
        assert!(text.contains("i32"));
    }
}
