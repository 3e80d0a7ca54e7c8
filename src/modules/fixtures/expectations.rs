use serde_json::{Map, Value};

use super::models::ExpectedResponse;
use crate::core::{E2eError, Result};

/// Body fields whose presence in an expected response marks the step as an
/// expected failure
pub const ERROR_FIELDS: [&str; 3] = ["error", "error_code", "error_message"];

/// Compare an actual response against a fixture expectation
///
/// Status must match exactly. Every key in the expected body must deep-equal
/// the actual value; keys the fixture does not mention are ignored.
pub fn check_response(actual_status: u16, actual_body: &Value, expected: &ExpectedResponse) -> Result<()> {
    if actual_status != expected.status {
        return Err(E2eError::mismatch(format!(
            "expected status {}, got {}: {}",
            expected.status, actual_status, actual_body
        )));
    }

    let mismatches: Vec<String> = expected
        .body
        .iter()
        .filter_map(|(key, want)| match actual_body.get(key) {
            Some(got) if got == want => None,
            Some(got) => Some(format!("'{}': expected {}, got {}", key, want, got)),
            None => Some(format!("'{}': expected {}, field absent", key, want)),
        })
        .collect();

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(E2eError::mismatch(mismatches.join("; ")))
    }
}

/// Panicking form of [`check_response`] for use directly in test bodies
///
/// # Panics
/// If the status differs or any expected body field mismatches
pub fn assert_response(actual_status: u16, actual_body: &Value, expected: &ExpectedResponse) {
    if let Err(e) = check_response(actual_status, actual_body, expected) {
        panic!("{}", e);
    }
}

/// Whether steps after this one should still run
///
/// False when the expected body carries any of [`ERROR_FIELDS`]: a step that is
/// expected to fail leaves nothing for a capture or refund to act on. This also
/// halts flows that would legitimately continue after a failure (retrying or
/// refunding a failed payment); such flows need their own suite.
pub fn should_continue_next_step(expected: &ExpectedResponse) -> bool {
    !contains_error_field(&expected.body)
}

fn contains_error_field(body: &Map<String, Value>) -> bool {
    ERROR_FIELDS.iter().any(|field| body.contains_key(*field))
}
