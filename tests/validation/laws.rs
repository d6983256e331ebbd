//! Properties every validation pass upholds, over generated responses.

use crate::common::fixtures;
use form_schema::response::ResponseDocument;
use form_schema::validation::{ErrorKind, FormValidator};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::BTreeSet;

const JOB_FIELDS: &[&str] = &[
    "job_reference",
    "completed_at",
    "hours_on_site",
    "outcome",
    "tasks_done",
    "notes",
    "site_photo",
    "customer_email",
    "customer_satisfied",
    "customer_signature",
    "not_in_schema",
];

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-100i64..100).prop_map(Value::from),
        "[ a-zA-Z0-9@.:-]{0,12}".prop_map(Value::from),
        prop::collection::vec(
            prop::sample::select(vec!["Inspection", "Repair", "Cleaning", "Unknown"]),
            0..4
        )
        .prop_map(|items| json!(items)),
        Just(json!({"name": "photo.png", "size": 2048})),
        Just(json!({})),
    ]
}

fn arb_document() -> impl Strategy<Value = ResponseDocument> {
    prop::collection::vec((prop::sample::select(JOB_FIELDS), arb_value()), 0..12).prop_map(
        |entries| {
            let mut document = ResponseDocument::new();
            for (name, value) in entries {
                document.set(name, value);
            }
            document
        },
    )
}

proptest! {
    #[test]
    fn validation_is_deterministic(document in arb_document()) {
        let schema = fixtures::job_completion();
        let validator = FormValidator::standard();
        let before = document.clone();

        let first = validator.validate(&schema, &document);
        let second = validator.validate(&schema, &document);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&document, &before);
    }

    #[test]
    fn errors_only_name_schema_fields(document in arb_document()) {
        let schema = fixtures::job_completion();
        let report = FormValidator::standard().validate(&schema, &document);
        let names: BTreeSet<&str> = schema
            .flatten_fields()
            .map(|flat| flat.field.name.as_str())
            .collect();

        for (name, errors) in report.field_errors() {
            prop_assert!(names.contains(name.as_str()), "error keyed by {}", name);
            prop_assert!(!errors.is_empty());
        }
        prop_assert_eq!(report.is_submittable(), report.field_errors().is_empty());
    }

    #[test]
    fn missing_required_values_report_only_required(document in arb_document()) {
        let schema = fixtures::job_completion();
        let report = FormValidator::standard().validate(&schema, &document);

        for flat in schema.flatten_fields().filter(|flat| flat.field.required) {
            if !document.contains(&flat.field.name) {
                prop_assert_eq!(report.errors_for(&flat.field.name), &[ErrorKind::Required]);
            }
        }
        for flat in schema.flatten_fields().filter(|flat| !flat.field.required) {
            if !document.contains(&flat.field.name) {
                prop_assert!(report.errors_for(&flat.field.name).is_empty());
            }
        }
    }
}
