//! Built-in form documents.
//!
//! Provided as static JSON strings in the storage shape, for seeding new
//! tenants, demos and tests without external files.

/// A one-section form with no fields, as a new builder session starts.
pub fn blank_form() -> &'static str {
    r#"{
  "sections": [
    {
      "title": "General Information",
      "fields": []
    }
  ]
}"#
}

/// Job completion report filled in by a field worker on site.
pub fn job_completion_form() -> &'static str {
    r#"{
  "sections": [
    {
      "title": "Job Details",
      "fields": [
        {
          "name": "job_reference",
          "type": "text",
          "label": "Job Reference",
          "required": true,
          "placeholder": "e.g. JOB-1042"
        },
        {
          "name": "completed_at",
          "type": "datetime",
          "label": "Completed At",
          "required": true
        },
        {
          "name": "hours_on_site",
          "type": "number",
          "label": "Hours on Site",
          "required": true,
          "validation": { "min": 0, "max": 24 }
        },
        {
          "name": "outcome",
          "type": "select",
          "label": "Outcome",
          "required": true,
          "options": ["Completed", "Partially completed", "Could not access site"]
        }
      ]
    },
    {
      "title": "Work Performed",
      "fields": [
        {
          "name": "tasks_done",
          "type": "checkbox",
          "label": "Tasks Performed",
          "required": true,
          "options": ["Inspection", "Repair", "Replacement", "Cleaning"]
        },
        {
          "name": "notes",
          "type": "textarea",
          "label": "Notes",
          "required": false,
          "description": "Anything the next visit should know"
        },
        {
          "name": "site_photo",
          "type": "file",
          "label": "Site Photo",
          "required": false,
          "validation": { "accept": ["jpg", "jpeg", "png"], "max_size_kb": 5120 }
        }
      ]
    },
    {
      "title": "Sign-off",
      "fields": [
        {
          "name": "customer_email",
          "type": "email",
          "label": "Customer Email",
          "required": false
        },
        {
          "name": "customer_satisfied",
          "type": "radio",
          "label": "Customer Satisfied",
          "required": true,
          "options": ["Yes", "No"]
        },
        {
          "name": "customer_signature",
          "type": "signature",
          "label": "Customer Signature",
          "required": true
        }
      ]
    }
  ]
}"#
}

/// Periodic asset inspection checklist.
pub fn asset_inspection_form() -> &'static str {
    r#"{
  "sections": [
    {
      "title": "Asset",
      "fields": [
        {
          "name": "asset_tag",
          "type": "text",
          "label": "Asset Tag",
          "required": true,
          "validation": { "min_length": 4, "max_length": 32 }
        },
        {
          "name": "inspection_date",
          "type": "date",
          "label": "Inspection Date",
          "required": true
        },
        {
          "name": "condition",
          "type": "radio",
          "label": "Condition",
          "required": true,
          "options": ["Good", "Fair", "Poor", "Out of service"]
        }
      ]
    },
    {
      "title": "Findings",
      "fields": [
        {
          "name": "defects",
          "type": "checkbox",
          "label": "Defects Found",
          "required": false,
          "options": ["Corrosion", "Leak", "Wear", "Electrical fault"]
        },
        {
          "name": "report",
          "type": "file",
          "label": "Inspection Report",
          "required": false,
          "validation": { "accept": [".pdf"] }
        }
      ]
    }
  ]
}"#
}
