//! Building a validator and reading the pipeline's error report.
//!
//! Run with: cargo run --example validation

use typed_json::{
    record_fields, FieldOrder, ValidatedPipeline, ValidationOutcome, Validator,
};

struct Address {
    street: String,
    zip: String,
}

record_fields!(Address { street, zip });

struct Customer {
    name: String,
    age: i64,
    address: Address,
}

record_fields!(Customer { name, age, address });

fn main() {
    let mut validator = Validator::new();

    // Applies to every String field, wherever it appears.
    validator.add_type_rule::<String, _>(
        |_name, value, _fragment| {
            if value.is_empty() {
                ValidationOutcome::reject("string must not be empty")
            } else {
                ValidationOutcome::accept()
            }
        },
        "non-empty strings",
    );

    // Applies to fields named `age`, whatever their type.
    validator.add_field_rule(
        "age",
        |_name, fragment| {
            if fragment.starts_with('-') {
                ValidationOutcome::reject("age cannot be negative")
            } else {
                ValidationOutcome::accept()
            }
        },
        "age >= 0",
    );

    println!("Registered rules:");
    for description in validator.rule_descriptions() {
        println!("  - {description}");
    }

    let customer = Customer {
        name: String::new(),
        age: -3,
        address: Address {
            street: "12 Main St".to_string(),
            zip: "90210".to_string(),
        },
    };

    let mut pipeline = ValidatedPipeline::new()
        .with_validator(&validator)
        .with_order(FieldOrder::FirstSeen);
    let json = pipeline.serialize(&customer).unwrap();

    println!("\nSerialized (rejected fields omitted):\n  {json}");
    println!("\nRejections:");
    for error in pipeline.errors() {
        println!("  {} ({}): {}", error.path, error.kind, error.message);
    }

    // Fail-fast mode turns the first rejection into a hard error instead.
    let mut strict = ValidatedPipeline::new()
        .with_validator(&validator)
        .fail_fast();
    match strict.serialize(&customer) {
        Ok(_) => unreachable!("the sample customer is invalid"),
        Err(err) => println!("\nFail-fast: {err}"),
    }
}
