//! The draft, submit and reopen lifecycle of a response.

use crate::assert_error_message_contains;
use crate::common::{fixtures, init_logging};
use chrono::{TimeZone, Utc};
use form_schema::error::{FormError, ResponseError};
use form_schema::response::{FormResponse, ResponseDocument};
use form_schema::schema::SchemaVersion;
use form_schema::validation::{ErrorKind, FormValidator};
use serde_json::json;

fn filled_job_response() -> FormResponse {
    let schema = fixtures::job_completion();
    FormResponse::from_draft(
        SchemaVersion::of(&schema).unwrap(),
        fixtures::complete_job_document(),
    )
}

#[test]
fn test_submit_finalizes_valid_response() {
    init_logging();
    let schema = fixtures::job_completion();
    let mut response = filled_job_response();
    let at = Utc.with_ymd_and_hms(2024, 6, 3, 17, 0, 0).unwrap();

    let report = response
        .submit_at(&schema, &FormValidator::standard(), at)
        .unwrap();
    assert!(report.is_submittable());
    assert!(response.is_submitted());
    assert_eq!(response.submitted_at(), Some(at));
}

#[test]
fn test_submitted_response_is_frozen_until_reopened() {
    let schema = fixtures::job_completion();
    let validator = FormValidator::standard();
    let mut response = filled_job_response();
    response.submit(&schema, &validator).unwrap();

    assert!(matches!(
        response.set_value("notes", json!("late edit")),
        Err(ResponseError::AlreadySubmitted)
    ));
    assert!(matches!(
        response.toggle_option("tasks_done", "Repair"),
        Err(ResponseError::AlreadySubmitted)
    ));
    assert!(matches!(
        response.clear_value("notes"),
        Err(ResponseError::AlreadySubmitted)
    ));
    assert!(matches!(
        response.submit(&schema, &validator),
        Err(FormError::Response(ResponseError::AlreadySubmitted))
    ));

    response.reopen();
    assert!(!response.is_submitted());
    assert_eq!(response.submitted_at(), None);
    response.set_value("notes", json!("late edit")).unwrap();
    assert_eq!(response.data().get("notes"), Some(&json!("late edit")));
}

#[test]
fn test_invalid_response_is_rejected_with_report() {
    let schema = fixtures::job_completion();
    let mut response = FormResponse::new(&schema).unwrap();
    response.set_value("job_reference", json!("JOB-7")).unwrap();
    response.toggle_option("tasks_done", "Repair").unwrap();

    let advisory = response.check(&schema, &FormValidator::standard());
    assert!(!advisory.is_submittable());

    match response.submit(&schema, &FormValidator::standard()) {
        Err(FormError::Response(ResponseError::Rejected(report))) => {
            assert_eq!(*report, advisory);
            assert_eq!(report.errors_for("outcome"), &[ErrorKind::Required]);
            assert!(report.errors_for("tasks_done").is_empty());
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(!response.is_submitted());
}

#[test]
fn test_schema_change_invalidates_draft() {
    let mut schema = fixtures::job_completion();
    let mut response = filled_job_response();

    schema.sections[0].fields[0].label = "Work Order".into();
    let result = response.submit(&schema, &FormValidator::standard());
    assert!(matches!(
        result,
        Err(FormError::Response(ResponseError::SchemaMismatch { .. }))
    ));
    assert_error_message_contains!(result, "schema version");
}

#[test]
fn test_response_serializes_with_envelope() {
    let schema = fixtures::asset_inspection();
    let mut response = FormResponse::new(&schema).unwrap();
    response.set_value("asset_tag", json!("PUMP-0042")).unwrap();

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["data"], json!({"asset_tag": "PUMP-0042"}));
    assert_eq!(value["is_submitted"], json!(false));
    assert_eq!(
        value["schema_version"],
        json!(SchemaVersion::of(&schema).unwrap().as_str())
    );

    let restored: FormResponse = serde_json::from_value(value).unwrap();
    assert_eq!(restored, response);
}

#[test]
fn test_response_document_must_be_object() {
    assert!(matches!(
        ResponseDocument::from_value(json!(["asset_tag"])),
        Err(ResponseError::NotAnObject)
    ));
}
