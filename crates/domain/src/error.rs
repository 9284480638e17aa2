// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is empty or missing.
    EmptyField {
        /// The name of the field.
        field: &'static str,
    },
    /// An email address failed basic shape validation.
    InvalidEmail(String),
    /// A complaint status string is not a recognized status value.
    InvalidComplaintStatus(String),
    /// A role string is not a recognized role.
    InvalidRole(String),
    /// An account status string is not a recognized account status.
    InvalidAccountStatus(String),
    /// The weekly window could not be resolved in the local time zone.
    ///
    /// This can only occur when a week boundary falls inside a time zone
    /// transition gap, which no real-world zone does for local midnight.
    WeekWindowUnrepresentable {
        /// Description of the unresolvable instant.
        detail: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::InvalidComplaintStatus(value) => {
                write!(f, "Invalid complaint status: '{value}'")
            }
            Self::InvalidRole(value) => write!(f, "Invalid role: '{value}'"),
            Self::InvalidAccountStatus(value) => {
                write!(f, "Invalid account status: '{value}'")
            }
            Self::WeekWindowUnrepresentable { detail } => {
                write!(f, "Weekly window is unrepresentable in local time: {detail}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
