//! The rule engine.
//!
//! A [`Validator`] holds three independent rule classes and evaluates them
//! against a field's typed value and its serialized fragment:
//!
//! - **Type rules** are bound to one concrete value type and receive the
//!   typed value, the field name, and the fragment.
//! - **Field rules** are bound to one field name and receive the name and
//!   the fragment.
//! - **General rules** apply to every field and receive the name and the
//!   fragment.
//!
//! Evaluation runs type rules, then field rules, then general rules, and
//! short-circuits on the first rejection. A type rule bound to a type the
//! queried value does not have is skipped silently.
//!
//! Rules are append-only; the only removal is [`Validator::clear_rules`].
//! They must be pure predicates: a populated validator is shared read-only
//! across any number of concurrent serialize calls, and provides no internal
//! locking for mutation after sharing has begun.
//!
//! ## Examples
//!
//! ```rust
//! use typed_json::{ValidationOutcome, Validator};
//!
//! let mut validator = Validator::new();
//! validator.add_type_rule::<String, _>(
//!     |_name, value, _fragment| {
//!         if value.len() >= 3 {
//!             ValidationOutcome::accept()
//!         } else {
//!             ValidationOutcome::reject("string must be at least 3 characters long")
//!         }
//!     },
//!     "string length >= 3",
//! );
//!
//! let outcome = validator.validate("username", &"ab".to_string(), "\"ab\"");
//! assert!(!outcome.accepted);
//!
//! // A value of another type skips the string rule silently.
//! let outcome = validator.validate("age", &30i64, "30");
//! assert!(outcome.accepted);
//! ```

use std::any::{Any, TypeId};

use indexmap::IndexMap;

/// The result of evaluating rules against one field.
///
/// `accepted == true` means every applicable rule passed; the message is then
/// conventionally empty or informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub message: String,
}

impl ValidationOutcome {
    /// An accepting outcome with an empty message.
    #[must_use]
    pub fn accept() -> Self {
        ValidationOutcome {
            accepted: true,
            message: String::new(),
        }
    }

    /// A rejecting outcome carrying the rule's message.
    #[must_use]
    pub fn reject(message: impl Into<String>) -> Self {
        ValidationOutcome {
            accepted: false,
            message: message.into(),
        }
    }
}

type TypeCheck = Box<dyn Fn(&str, &dyn Any, &str) -> ValidationOutcome + Send + Sync>;
type FragmentCheck = Box<dyn Fn(&str, &str) -> ValidationOutcome + Send + Sync>;

struct TypeRule {
    check: TypeCheck,
    description: String,
}

struct FieldRule {
    field: String,
    check: FragmentCheck,
    description: String,
}

struct GeneralRule {
    check: FragmentCheck,
    description: String,
}

/// Holds validation rules and evaluates them against emitted fields.
///
/// Construct once, populate, then share read-only across serialize calls.
#[derive(Default)]
pub struct Validator {
    type_rules: IndexMap<TypeId, Vec<TypeRule>>,
    field_rules: Vec<FieldRule>,
    general_rules: Vec<GeneralRule>,
}

impl Validator {
    /// Creates a validator with no rules.
    #[must_use]
    pub fn new() -> Self {
        Validator::default()
    }

    /// Adds a rule bound to values of type `T`.
    ///
    /// The rule receives the field name, the typed value, and the serialized
    /// fragment. It runs only for fields whose value is exactly a `T`.
    pub fn add_type_rule<T, F>(&mut self, rule: F, description: impl Into<String>)
    where
        T: Any,
        F: Fn(&str, &T, &str) -> ValidationOutcome + Send + Sync + 'static,
    {
        let check = Box::new(move |name: &str, value: &dyn Any, fragment: &str| {
            match value.downcast_ref::<T>() {
                Some(typed) => rule(name, typed, fragment),
                // Unreachable through validate(), which looks rules up by the
                // value's TypeId; kept as a guard for direct callers.
                None => ValidationOutcome::reject(format!(
                    "type mismatch in validation rule for field `{}`",
                    name
                )),
            }
        });
        self.type_rules
            .entry(TypeId::of::<T>())
            .or_default()
            .push(TypeRule {
                check,
                description: description.into(),
            });
    }

    /// Adds a rule bound to one field name.
    ///
    /// The rule receives the field name and the serialized fragment; it runs
    /// only for fields with exactly that name.
    pub fn add_field_rule<F>(
        &mut self,
        field: impl Into<String>,
        rule: F,
        description: impl Into<String>,
    ) where
        F: Fn(&str, &str) -> ValidationOutcome + Send + Sync + 'static,
    {
        self.field_rules.push(FieldRule {
            field: field.into(),
            check: Box::new(rule),
            description: description.into(),
        });
    }

    /// Adds a rule that applies to every field.
    pub fn add_general_rule<F>(&mut self, rule: F, description: impl Into<String>)
    where
        F: Fn(&str, &str) -> ValidationOutcome + Send + Sync + 'static,
    {
        self.general_rules.push(GeneralRule {
            check: Box::new(rule),
            description: description.into(),
        });
    }

    /// Evaluates all applicable rules against one field.
    ///
    /// Runs type rules matching the value's type, then field rules matching
    /// `name`, then general rules, stopping at the first rejection.
    pub fn validate(&self, name: &str, value: &dyn Any, fragment: &str) -> ValidationOutcome {
        if let Some(rules) = self.type_rules.get(&value.type_id()) {
            for rule in rules {
                let outcome = (rule.check)(name, value, fragment);
                if !outcome.accepted {
                    return outcome;
                }
            }
        }
        self.validate_named(name, fragment)
    }

    /// Evaluates field and general rules when no typed value is available.
    ///
    /// Type rules are necessarily skipped: there is nothing to match them
    /// against.
    pub fn validate_serialized(&self, name: &str, fragment: &str) -> ValidationOutcome {
        self.validate_named(name, fragment)
    }

    fn validate_named(&self, name: &str, fragment: &str) -> ValidationOutcome {
        for rule in &self.field_rules {
            if rule.field != name {
                continue;
            }
            let outcome = (rule.check)(name, fragment);
            if !outcome.accepted {
                return outcome;
            }
        }
        for rule in &self.general_rules {
            let outcome = (rule.check)(name, fragment);
            if !outcome.accepted {
                return outcome;
            }
        }
        ValidationOutcome::accept()
    }

    /// Removes every rule.
    pub fn clear_rules(&mut self) {
        self.type_rules.clear();
        self.field_rules.clear();
        self.general_rules.clear();
    }

    /// Returns a description line per rule: type rules first (registration
    /// order within each type), then field rules, then general rules.
    #[must_use]
    pub fn rule_descriptions(&self) -> Vec<String> {
        let mut descriptions = Vec::new();
        for rules in self.type_rules.values() {
            for rule in rules {
                descriptions.push(format!("Type rule: {}", rule.description));
            }
        }
        for rule in &self.field_rules {
            descriptions.push(format!("Field `{}` rule: {}", rule.field, rule.description));
        }
        for rule in &self.general_rules {
            descriptions.push(format!("General rule: {}", rule.description));
        }
        descriptions
    }
}
