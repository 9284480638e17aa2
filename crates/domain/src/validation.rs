// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that a required string field is non-empty after trimming.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The value to check
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the trimmed value is empty.
pub fn validate_required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// Validates a complaint topic.
///
/// # Errors
///
/// Returns an error if the topic is empty after trimming.
pub fn validate_topic(topic: &str) -> Result<(), DomainError> {
    validate_required("topic", topic)
}

/// Validates a reply message.
///
/// # Errors
///
/// Returns an error if the message is empty after trimming.
pub fn validate_message(message: &str) -> Result<(), DomainError> {
    validate_required("message", message)
}

/// Validates the basic shape of an email address.
///
/// This is a structural check only (non-empty, contains exactly one `@`
/// with text on both sides). Deliverability is out of scope.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the shape is wrong.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    let mut parts = trimmed.splitn(2, '@');
    let local: &str = parts.next().unwrap_or_default();
    let domain: &str = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is not a valid address"
        )));
    }
    Ok(())
}
