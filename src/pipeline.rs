//! The validated serialization pipeline.
//!
//! A [`ValidatedPipeline`] wraps dispatch and assembly per field: before a
//! field's fragment is committed to the document, the field name is pushed
//! onto a dotted path stack and the attached [`Validator`] (if any) is
//! consulted with the field's typed value and computed fragment. Nested
//! records push and pop their name around their entire sub-serialization, so
//! a rejected leaf three levels down reports `outer.inner.field`.
//!
//! Two surfacing modes:
//!
//! - [`ErrorMode::Collect`] (default): rejections are recorded as
//!   [`ValidationError`] triples, the rejected field is omitted from the
//!   output, and serialization continues with the siblings. Callers must
//!   check [`ValidatedPipeline::has_errors`] afterwards, since a non-erroring
//!   return does not by itself mean every field was accepted.
//! - [`ErrorMode::FailFast`]: the first rejection aborts the serialize call
//!   with [`Error::Validation`](crate::Error) describing that field.
//!
//! A pipeline is owned by one in-flight serialize call; it may be reused
//! sequentially, since each `serialize` resets the path, errors, and builder.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::{
//!     record_fields, ErrorMode, ValidatedPipeline, ValidationOutcome, Validator,
//! };
//!
//! struct Account {
//!     username: String,
//!     age: i64,
//! }
//! record_fields!(Account { username, age });
//!
//! let mut validator = Validator::new();
//! validator.add_type_rule::<String, _>(
//!     |_n, value, _f| {
//!         if value.len() >= 3 {
//!             ValidationOutcome::accept()
//!         } else {
//!             ValidationOutcome::reject("string must be at least 3 characters long")
//!         }
//!     },
//!     "string length >= 3",
//! );
//!
//! let mut pipeline = ValidatedPipeline::new().with_validator(&validator);
//! let account = Account { username: "ab".to_string(), age: 30 };
//! let text = pipeline.serialize(&account).unwrap();
//!
//! assert!(pipeline.has_errors());
//! assert_eq!(pipeline.errors()[0].path, "username");
//! assert!(!text.contains("username"));
//! ```

use std::any::Any;
use std::mem;

use crate::builder::{DocumentBuilder, FieldOrder};
use crate::emit::ValueKind;
use crate::fragment::Fragment;
use crate::record::{FieldSink, Record};
use crate::validate::Validator;
use crate::{Error, Result};

/// How validation rejections surface from a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Collect rejections, omit the rejected fields, keep serializing.
    #[default]
    Collect,
    /// Abort the serialize call on the first rejection.
    FailFast,
}

/// One collected validation rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path locating the rejected field inside nested records.
    pub path: String,
    /// The rejecting rule's message.
    pub message: String,
    /// Name of the rejected value's kind.
    pub kind: String,
}

/// Serializes records through a validator, tracking field paths and
/// collecting rejections.
pub struct ValidatedPipeline<'v> {
    validator: Option<&'v Validator>,
    mode: ErrorMode,
    order: FieldOrder,
    builder: DocumentBuilder,
    path: Vec<String>,
    errors: Vec<ValidationError>,
}

impl<'v> ValidatedPipeline<'v> {
    /// Creates a pipeline with no validator, collect mode, and hash field
    /// order.
    #[must_use]
    pub fn new() -> Self {
        let order = FieldOrder::default();
        ValidatedPipeline {
            validator: None,
            mode: ErrorMode::default(),
            order,
            builder: DocumentBuilder::new(order),
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Attaches a validator. The pipeline borrows it read-only; one validator
    /// may serve many pipelines concurrently.
    #[must_use]
    pub fn with_validator(mut self, validator: &'v Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Sets the document field order. Nested records use the same order.
    #[must_use]
    pub fn with_order(mut self, order: FieldOrder) -> Self {
        self.order = order;
        self.builder = DocumentBuilder::new(order);
        self
    }

    /// Sets the error surfacing mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switches the pipeline to fail-fast mode.
    #[must_use]
    pub fn fail_fast(self) -> Self {
        self.with_mode(ErrorMode::FailFast)
    }

    /// Serializes a record into document text.
    ///
    /// In collect mode this returns `Ok` even when fields were rejected;
    /// check [`ValidatedPipeline::has_errors`] afterwards. In fail-fast mode
    /// the first rejection returns `Err` with that field's path, message,
    /// and kind.
    pub fn serialize<R: Record>(&mut self, record: &R) -> Result<String> {
        self.builder.clear();
        self.path.clear();
        self.errors.clear();
        record.present_fields(self)?;
        Ok(self.builder.finalize().into_string())
    }

    /// Returns `true` if the last serialize call collected any rejections.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The rejections collected by the last serialize call, in encounter
    /// order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    fn current_path(&self) -> String {
        self.path.join(".")
    }

    /// Validates the field at the top of the path; `Ok(true)` means append.
    fn check(
        &mut self,
        name: &str,
        kind: ValueKind,
        value: &dyn Any,
        fragment: &str,
    ) -> Result<bool> {
        let validator = match self.validator {
            Some(validator) => validator,
            None => return Ok(true),
        };
        let outcome = validator.validate(name, value, fragment);
        if outcome.accepted {
            return Ok(true);
        }
        match self.mode {
            ErrorMode::Collect => {
                self.errors.push(ValidationError {
                    path: self.current_path(),
                    message: outcome.message,
                    kind: kind.name().to_string(),
                });
                Ok(false)
            }
            ErrorMode::FailFast => Err(Error::Validation {
                path: self.current_path(),
                message: outcome.message,
                kind: kind.name().to_string(),
            }),
        }
    }
}

impl Default for ValidatedPipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSink for ValidatedPipeline<'_> {
    fn accept_value(
        &mut self,
        name: &str,
        kind: ValueKind,
        value: &dyn Any,
        fragment: Fragment,
    ) -> Result<()> {
        self.path.push(name.to_string());
        let result = self.check(name, kind, value, fragment.as_str());
        let keep = match result {
            Ok(keep) => keep,
            Err(err) => {
                self.path.pop();
                return Err(err);
            }
        };
        if keep {
            self.builder.append(name, fragment);
        }
        self.path.pop();
        Ok(())
    }

    fn accept_record(
        &mut self,
        name: &str,
        value: &dyn Any,
        present: &dyn Fn(&mut dyn FieldSink) -> Result<()>,
    ) -> Result<()> {
        self.path.push(name.to_string());

        // Serialize the nested record into its own builder while this
        // pipeline keeps collecting paths and errors.
        let parent = mem::replace(&mut self.builder, DocumentBuilder::new(self.order));
        let presented = present(self);
        let nested = mem::replace(&mut self.builder, parent);
        if let Err(err) = presented {
            self.path.pop();
            return Err(err);
        }

        let fragment = nested.finalize();
        match self.check(name, ValueKind::Record, value, fragment.as_str()) {
            Ok(true) => self.builder.append(name, fragment),
            Ok(false) => {}
            Err(err) => {
                self.path.pop();
                return Err(err);
            }
        }
        self.path.pop();
        Ok(())
    }
}
