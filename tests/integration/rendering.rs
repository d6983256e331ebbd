//! Filling a form in through rendered descriptors, then validating and
//! submitting what was entered.

use crate::common::{fixtures, init_logging};
use form_schema::error::RenderError;
use form_schema::render::{
    Control, FormRenderer, InputDescriptor, InputEvent, RenderMode, apply_input,
};
use form_schema::response::{FileReference, FormResponse, ResponseDocument};
use form_schema::validation::{Constraint, ErrorKind, FieldErrors, FormValidator};
use serde_json::json;

fn descriptor<'a>(descriptors: &'a [InputDescriptor], name: &str) -> &'a InputDescriptor {
    descriptors
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("no descriptor for '{name}'"))
}

#[test]
fn test_fill_in_validate_and_submit() {
    init_logging();
    let schema = fixtures::job_completion();
    let renderer = FormRenderer::standard();
    let validator = FormValidator::standard();
    let mut document = ResponseDocument::new();

    let form = renderer.render(&schema, &document, &FieldErrors::new(), RenderMode::Edit);
    assert_eq!(form.len(), schema.field_count());
    assert!(form.iter().all(InputDescriptor::is_interactive));

    let events = [
        ("job_reference", InputEvent::SetText("JOB-2001".into())),
        ("completed_at", InputEvent::SetText("2024-06-03T16:45".into())),
        ("hours_on_site", InputEvent::SetText("2.5".into())),
        ("outcome", InputEvent::Choose("Completed".into())),
        ("tasks_done", InputEvent::Toggle("Repair".into())),
        ("tasks_done", InputEvent::Toggle("Cleaning".into())),
        (
            "site_photo",
            InputEvent::AttachFile(FileReference::new("valve.jpg").with_size(300 * 1024)),
        ),
        ("customer_satisfied", InputEvent::Choose("Yes".into())),
        (
            "customer_signature",
            InputEvent::CaptureSignature(json!({"strokes": [[[1, 2], [3, 4]]]})),
        ),
    ];
    for (name, event) in events {
        apply_input(descriptor(&form, name), &mut document, event).unwrap();
    }

    assert_eq!(document.selected_options("tasks_done"), ["Repair", "Cleaning"]);
    assert_eq!(document.get("hours_on_site"), Some(&json!("2.5")));

    let report = validator.validate(&schema, &document);
    assert!(report.is_submittable(), "{:?}", report.field_errors());

    let mut response = FormResponse::new(&schema).unwrap();
    *response.data_mut().unwrap() = document;
    response.submit(&schema, &validator).unwrap();
    assert!(response.is_submitted());

    let shown = renderer.render(
        &schema,
        response.data(),
        report.field_errors(),
        RenderMode::Readonly,
    );
    assert!(shown.iter().all(|d| !d.is_interactive() && !d.has_errors()));
    assert_eq!(
        descriptor(&shown, "job_reference").control,
        Control::Input {
            input_type: form_schema::field_type::InputType::Text,
            value: "JOB-2001".into()
        }
    );
}

#[test]
fn test_errors_render_next_to_their_fields() {
    let schema = fixtures::job_completion();
    let renderer = FormRenderer::standard();
    let mut document = fixtures::complete_job_document();
    document.set("hours_on_site", json!("40"));
    document.remove("outcome");

    let report = FormValidator::standard().validate(&schema, &document);
    let form = renderer.render(&schema, &document, report.field_errors(), RenderMode::Edit);

    let hours = descriptor(&form, "hours_on_site");
    assert!(matches!(
        hours.errors.as_slice(),
        [ErrorKind::Constraint(Constraint::AboveMaximum { .. })]
    ));
    // The raw text is shown as entered, not the coerced number
    assert!(matches!(&hours.control, Control::Input { value, .. } if value == "40"));

    assert_eq!(descriptor(&form, "outcome").errors, [ErrorKind::Required]);
    let with_errors: Vec<&str> = form
        .iter()
        .filter(|d| d.has_errors())
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(with_errors, ["hours_on_site", "outcome"]);
}

#[test]
fn test_checkbox_toggles_through_descriptor() {
    let schema = fixtures::job_completion();
    let renderer = FormRenderer::standard();
    let mut document = ResponseDocument::new();
    document.set("tasks_done", json!(["Inspection"]));

    let form = renderer.render(&schema, &document, &FieldErrors::new(), RenderMode::Edit);
    let tasks = descriptor(&form, "tasks_done");

    apply_input(tasks, &mut document, InputEvent::Toggle("Repair".into())).unwrap();
    assert_eq!(document.selected_options("tasks_done"), ["Inspection", "Repair"]);

    apply_input(tasks, &mut document, InputEvent::Toggle("Inspection".into())).unwrap();
    assert_eq!(document.selected_options("tasks_done"), ["Repair"]);

    let result = apply_input(tasks, &mut document, InputEvent::Toggle("Polishing".into()));
    assert_eq!(
        result,
        Err(RenderError::UnknownOption {
            field: "tasks_done".into(),
            value: "Polishing".into()
        })
    );
    assert_eq!(document.selected_options("tasks_done"), ["Repair"]);
}

#[test]
fn test_preview_of_builder_snapshot_is_inert() {
    let schema = fixtures::asset_inspection();
    let renderer = FormRenderer::standard();
    let mut document = ResponseDocument::new();

    let preview = renderer.render(&schema, &document, &FieldErrors::new(), RenderMode::Preview);
    let edit = renderer.render(&schema, &document, &FieldErrors::new(), RenderMode::Edit);
    for (shown, live) in preview.iter().zip(&edit) {
        assert_eq!(shown.control, live.control);
        assert_eq!(shown.name, live.name);
    }

    let result = apply_input(
        descriptor(&preview, "asset_tag"),
        &mut document,
        InputEvent::SetText("PUMP-1".into()),
    );
    assert!(matches!(result, Err(RenderError::NotInteractive { .. })));
    assert!(document.is_empty());
}

#[test]
fn test_unsupported_field_does_not_block_the_form() {
    let mut schema = fixtures::asset_inspection();
    let stars: form_schema::schema::Field = serde_json::from_value(json!({
        "name": "stars",
        "type": "rating",
        "label": "Overall rating",
        "required": true
    }))
    .unwrap();
    schema.sections[0].fields.insert(1, stars);

    let renderer = FormRenderer::standard();
    let mut document = fixtures::complete_inspection_document();
    let form = renderer.render(&schema, &document, &FieldErrors::new(), RenderMode::Edit);

    assert_eq!(form.len(), schema.field_count());
    let placeholder = descriptor(&form, "stars");
    assert_eq!(
        placeholder.control,
        Control::Unsupported {
            kind: "rating".into()
        }
    );
    assert!(!placeholder.is_interactive());

    apply_input(
        descriptor(&form, "asset_tag"),
        &mut document,
        InputEvent::SetText("PUMP-0099".into()),
    )
    .unwrap();
    let report = FormValidator::standard().validate(&schema, &document);
    assert!(report.is_submittable());
    assert_eq!(report.warnings().len(), 1);
}
