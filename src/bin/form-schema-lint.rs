//! # Form Schema Lint
//!
//! Checks form schema documents for the structural problems that would stop
//! the builder from saving them: missing sections, empty or duplicate field
//! names, choice fields without options, options on fields that take none.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin form-schema-lint forms/job_completion.json
//! cargo run --bin form-schema-lint ./forms/
//! ```
//!
//! ## Output
//!
//! ```text
//! Checking form schema: forms/job_completion.json
//! ✓ Schema is structurally valid
//!
//! Schema Summary:
//!   Version: hZ2m1Vq9XcU0aL7b
//!   Sections: 3
//!   Fields: 10
//!   Field types:
//!     - checkbox: 1
//!     - text: 1
//!   Required field names: job_reference, completed_at
//! ```
//!
//! Fields whose type this build does not know are listed as warnings; they
//! do not fail the check.
//!
//! ## Exit Codes
//!
//! - `0`: every schema is structurally valid
//! - `1`: one or more schemas failed to parse or are structurally invalid

use form_schema::field_type::FieldTypeRegistry;
use form_schema::schema::{Schema, SchemaVersion};
use form_schema::{FormError, FormResult};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} forms/job_completion.json", args[0]);
        eprintln!("  {} ./forms/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    let ok = if path.is_file() {
        lint_single_file(path)
    } else if path.is_dir() {
        lint_directory(path)
    } else {
        eprintln!("Error: '{}' is not a valid file or directory", path.display());
        false
    };

    if !ok {
        process::exit(1);
    }
}

fn lint_single_file(file_path: &Path) -> bool {
    println!("Checking form schema: {}", file_path.display());

    match load_and_check(file_path) {
        Ok(schema) => {
            println!("✓ Schema is structurally valid");
            print_schema_summary(&schema);
            true
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            false
        }
    }
}

fn lint_directory(dir_path: &Path) -> bool {
    println!("Checking form schemas in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            return false;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;

    for path in &paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nChecking: {}", name);

        match load_and_check(path) {
            Ok(schema) => {
                println!(
                    "  ✓ Valid - {} section(s), {} field(s)",
                    schema.sections.len(),
                    schema.field_count()
                );
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nLint Summary:");
    println!("  Valid schemas: {}", valid_count);
    println!("  Invalid schemas: {}", error_count);

    error_count == 0
}

fn load_and_check(file_path: &Path) -> FormResult<Schema> {
    let content = fs::read_to_string(file_path)?;
    let schema = Schema::from_json_str(&content)?;

    let errors = schema.validate_structure();
    if !errors.is_empty() {
        return Err(FormError::structural(errors));
    }

    Ok(schema)
}

fn print_schema_summary(schema: &Schema) {
    let registry = FieldTypeRegistry::standard();

    println!();
    println!("Schema Summary:");
    match SchemaVersion::of(schema) {
        Ok(version) => println!("  Version: {}", version),
        Err(e) => println!("  Version: unavailable ({})", e),
    }
    println!("  Sections: {}", schema.sections.len());
    println!("  Fields: {}", schema.field_count());

    let mut kind_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut unsupported = Vec::new();
    for flat in schema.flatten_fields() {
        *kind_counts.entry(flat.field.kind.to_string()).or_insert(0) += 1;
        if !registry.is_supported(&flat.field.kind) {
            unsupported.push(format!("{} ({})", flat.field.name, flat.field.kind));
        }
    }

    println!("  Field types:");
    for (kind, count) in &kind_counts {
        println!("    - {}: {}", kind, count);
    }

    let required: Vec<&str> = schema
        .flatten_fields()
        .filter(|flat| flat.field.required)
        .map(|flat| flat.field.name.as_str())
        .collect();
    if !required.is_empty() {
        println!("  Required field names: {}", required.join(", "));
    }

    if !unsupported.is_empty() {
        println!("  ⚠ Unsupported field types: {}", unsupported.join(", "));
    }
}
