//! Common test utilities.
//!
//! Logging setup, assertion macros, and the `builders` / `fixtures` helpers
//! shared by the validation and integration suites.

use std::sync::Once;

pub mod builders;

static LOGGING: Once = Once::new();

/// Route library logs through the test harness. Safe to call from every test.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Assert the exact error list a report holds for one field.
#[macro_export]
macro_rules! assert_field_errors {
    ($report:expr, $field:expr, [$($error:expr),* $(,)?]) => {{
        let expected: Vec<form_schema::validation::ErrorKind> = vec![$($error),*];
        assert_eq!(
            $report.errors_for($field),
            expected.as_slice(),
            "unexpected errors for field '{}'",
            $field
        );
    }};
}

/// Assert that a report holds a constraint error of the given shape.
#[macro_export]
macro_rules! assert_constraint {
    ($report:expr, $field:expr, $pattern:pat) => {{
        let errors = $report.errors_for($field);
        assert!(
            errors.iter().any(|error| matches!(
                error,
                form_schema::validation::ErrorKind::Constraint($pattern)
            )),
            "expected constraint {} on '{}', got {:?}",
            stringify!($pattern),
            $field,
            errors
        );
    }};
}

/// Assert that a structural error list contains an error of the given shape.
#[macro_export]
macro_rules! assert_structural_error {
    ($errors:expr, $pattern:pat) => {{
        let errors = &$errors;
        assert!(
            errors.iter().any(|error| matches!(error, $pattern)),
            "expected structural error {}, got {:?}",
            stringify!($pattern),
            errors
        );
    }};
}

/// Assert that a result failed with a message containing `$substring`.
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err,
                $substring
            ),
            Ok(_) => panic!("Expected error containing '{}', but call succeeded", $substring),
        }
    };
}
