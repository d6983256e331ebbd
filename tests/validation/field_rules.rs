//! Per-kind value rules, exercised through realistic forms.

use crate::common::builders::{ResponseBuilder, SchemaBuilder};
use crate::common::{fixtures, init_logging};
use crate::{assert_constraint, assert_field_errors};
use form_schema::config::ValidatorConfig;
use form_schema::field_type::{
    ControlKind, FieldKind, FieldTypeRegistry, InputType, KindDescriptor, ValueShape,
};
use form_schema::response::FileReference;
use form_schema::validation::{Constraint, ErrorKind, FormValidator, ValidationWarning, validate};
use serde_json::json;

#[test]
fn test_complete_forms_are_submittable() {
    init_logging();

    let report = validate(&fixtures::job_completion(), &fixtures::complete_job_document());
    assert!(report.is_submittable(), "{:?}", report.field_errors());

    let report = validate(
        &fixtures::asset_inspection(),
        &fixtures::complete_inspection_document(),
    );
    assert!(report.is_submittable(), "{:?}", report.field_errors());
}

#[test]
fn test_empty_response_lists_every_required_field() {
    let schema = fixtures::job_completion();
    let report = validate(&schema, &ResponseBuilder::new().build());

    let required: Vec<&str> = schema
        .flatten_fields()
        .filter(|flat| flat.field.required)
        .map(|flat| flat.field.name.as_str())
        .collect();
    let failing: Vec<&str> = report.field_errors().keys().map(String::as_str).collect();

    let mut expected = required.clone();
    expected.sort_unstable();
    assert_eq!(failing, expected);
    for name in required {
        assert_field_errors!(report, name, [ErrorKind::Required]);
    }
}

#[test]
fn test_one_bad_field_does_not_affect_others() {
    let mut document = fixtures::complete_job_document();
    document.set("hours_on_site", json!("three"));
    document.set("outcome", json!("Abandoned"));

    let report = validate(&fixtures::job_completion(), &document);
    assert_eq!(report.error_count(), 2);
    assert_field_errors!(
        report,
        "hours_on_site",
        [ErrorKind::type_mismatch("number", "non-numeric string")]
    );
    assert_constraint!(report, "outcome", Constraint::NotAnOption { .. });
    assert_field_errors!(report, "job_reference", []);
}

#[test]
fn test_number_rules() {
    let schema = SchemaBuilder::new()
        .field("hours", "number")
        .required()
        .min_max(0.0, 24.0)
        .build();

    for ok in [json!(0), json!(24), json!("7.25"), json!(" 12 ")] {
        let report = validate(&schema, &ResponseBuilder::new().with("hours", ok.clone()).build());
        assert!(report.is_submittable(), "{ok} should pass");
    }

    let report = validate(&schema, &ResponseBuilder::new().with("hours", json!(-1)).build());
    assert_constraint!(report, "hours", Constraint::BelowMinimum { .. });

    let report = validate(&schema, &ResponseBuilder::new().text("hours", "25").build());
    assert_constraint!(report, "hours", Constraint::AboveMaximum { .. });

    let report = validate(&schema, &ResponseBuilder::new().with("hours", json!(true)).build());
    assert_field_errors!(report, "hours", [ErrorKind::type_mismatch("number", "boolean")]);
}

#[test]
fn test_text_and_email_rules() {
    let schema = fixtures::asset_inspection();
    let mut document = fixtures::complete_inspection_document();

    document.set("asset_tag", json!("P1"));
    let report = validate(&schema, &document);
    assert_constraint!(report, "asset_tag", Constraint::TooShort { min_length: 4, length: 2 });

    document.set("asset_tag", json!("   "));
    let report = validate(&schema, &document);
    assert_field_errors!(report, "asset_tag", [ErrorKind::Required]);

    let mut job = fixtures::complete_job_document();
    for bad in ["facilities", "facilities@", "@example.com", "a b@example.com"] {
        job.set("customer_email", json!(bad));
        let report = validate(&fixtures::job_completion(), &job);
        assert_constraint!(report, "customer_email", Constraint::InvalidEmail { .. });
    }
}

#[test]
fn test_date_rules() {
    let schema = fixtures::asset_inspection();
    let mut document = fixtures::complete_inspection_document();

    for bad in ["03/06/2024", "2024-02-30", "yesterday"] {
        document.set("inspection_date", json!(bad));
        let report = validate(&schema, &document);
        assert_constraint!(report, "inspection_date", Constraint::InvalidDate { .. });
    }

    let mut job = fixtures::complete_job_document();
    for ok in ["2024-06-03T16:45", "2024-06-03T16:45:10", "2024-06-03T16:45:00+12:00"] {
        job.set("completed_at", json!(ok));
        assert!(validate(&fixtures::job_completion(), &job).is_submittable(), "{ok}");
    }
    job.set("completed_at", json!("2024-06-03"));
    let report = validate(&fixtures::job_completion(), &job);
    assert_constraint!(report, "completed_at", Constraint::InvalidDateTime { .. });
}

#[test]
fn test_checkbox_rules() {
    let schema = fixtures::job_completion();
    let mut document = fixtures::complete_job_document();

    // Any non-empty subset satisfies required
    document.set("tasks_done", json!(["Repair"]));
    assert!(validate(&schema, &document).is_submittable());

    document.set("tasks_done", json!([]));
    let report = validate(&schema, &document);
    assert_field_errors!(report, "tasks_done", [ErrorKind::Required]);

    document.set("tasks_done", json!(["Repair", "Painting", "Polishing"]));
    let report = validate(&schema, &document);
    assert_eq!(report.errors_for("tasks_done").len(), 2);

    document.set("tasks_done", json!("Repair"));
    let report = validate(&schema, &document);
    assert_field_errors!(
        report,
        "tasks_done",
        [ErrorKind::type_mismatch("array of strings", "string")]
    );
}

#[test]
fn test_file_rules() {
    let schema = SchemaBuilder::new()
        .field("evidence", "file")
        .required()
        .accept(&["pdf", ".PNG"], Some(100))
        .build();

    let ok = ResponseBuilder::new()
        .file("evidence", FileReference::new("scan.png").with_size(50 * 1024))
        .build();
    assert!(validate(&schema, &ok).is_submittable());

    let wrong_type = ResponseBuilder::new().text("evidence", "uploads/scan.exe").build();
    let report = validate(&schema, &wrong_type);
    assert_constraint!(report, "evidence", Constraint::ExtensionNotAccepted { .. });

    let too_big = ResponseBuilder::new()
        .file("evidence", FileReference::new("scan.pdf").with_size(101 * 1024))
        .build();
    let report = validate(&schema, &too_big);
    assert_constraint!(
        report,
        "evidence",
        Constraint::FileTooLarge {
            size_kb: 101,
            max_size_kb: 100
        }
    );

    let unsized_file = ResponseBuilder::new()
        .file("evidence", FileReference::new("scan.pdf"))
        .build();
    assert!(validate(&schema, &unsized_file).is_submittable());

    let not_a_file = ResponseBuilder::new().with("evidence", json!(42)).build();
    let report = validate(&schema, &not_a_file);
    assert_eq!(report.errors_for("evidence")[0].code(), "type_mismatch");
}

#[test]
fn test_signature_only_needs_presence() {
    let schema = SchemaBuilder::new().field("sign", "signature").required().build();

    for payload in [json!("data:image/png;base64,AAAA"), json!({"strokes": []}), json!(1)] {
        let document = ResponseBuilder::new().with("sign", payload.clone()).build();
        assert!(validate(&schema, &document).is_submittable(), "{payload}");
    }

    let report = validate(&schema, &ResponseBuilder::new().with("sign", json!({})).build());
    assert_field_errors!(report, "sign", [ErrorKind::Required]);
}

#[test]
fn test_warnings_never_block() {
    let schema = SchemaBuilder::new()
        .section("Survey")
        .field("stars", "rating")
        .required()
        .field("comment", "textarea")
        .build();
    let document = ResponseBuilder::new()
        .text("comment", "Quick and tidy")
        .text("legacy_field", "from an older draft")
        .build();

    let report = validate(&schema, &document);
    assert!(report.is_submittable());
    assert_eq!(
        report.warnings(),
        &[
            ValidationWarning::UnsupportedKind {
                field: "stars".into(),
                kind: "rating".into()
            },
            ValidationWarning::UnknownKey {
                key: "legacy_field".into()
            },
        ]
    );

    let quiet = FormValidator::standard().with_config(ValidatorConfig {
        report_unknown_keys: false,
        ..ValidatorConfig::default()
    });
    assert_eq!(quiet.validate(&schema, &document).warnings().len(), 1);
}

#[test]
fn test_registered_kind_is_validated() {
    let mut registry = FieldTypeRegistry::with_standard_kinds();
    registry
        .register(KindDescriptor::new(
            FieldKind::from("contact_email"),
            "Contact Email",
            ValueShape::Email,
            ControlKind::Input(InputType::Email),
        ))
        .unwrap();
    let schema = SchemaBuilder::new().field("contact", "contact_email").required().build();
    let document = ResponseBuilder::new().text("contact", "not an email").build();

    let validator = FormValidator::new(&registry);
    let report = validator.validate(&schema, &document);
    assert_constraint!(report, "contact", Constraint::InvalidEmail { .. });

    // The standard registry does not know the kind and skips it
    assert!(validate(&schema, &document).is_submittable());
}
