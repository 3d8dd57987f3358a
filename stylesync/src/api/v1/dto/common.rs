//! Shared DTO helpers used across v1 endpoints.

use validator::{Validate, ValidationErrors};

use crate::error::StyleSyncError;

/// Run `validator` rules and flatten failures into one readable message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), StyleSyncError> {
    request
        .validate()
        .map_err(|errors| StyleSyncError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value ({})", failure.code),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Invalid request".to_string()
    } else {
        messages.join("; ")
    }
}
