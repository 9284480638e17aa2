// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_desk_domain::{DomainError, WEEKLY_COMPLAINT_LIMIT};

/// Errors that can occur while applying a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor's role does not permit the attempted operation.
    Forbidden {
        /// The operation that was attempted.
        action: &'static str,
        /// Why the actor may not perform it.
        reason: String,
    },
    /// A caller-supplied value was missing or malformed.
    InvalidArgument {
        /// The offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },
    /// The student has already filed the weekly maximum of complaints.
    QuotaExceeded {
        /// Complaints filed so far in the current week window.
        count: u32,
        /// The weekly limit, [`WEEKLY_COMPLAINT_LIMIT`].
        limit: u32,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden to {action}: {reason}")
            }
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid argument '{field}': {message}")
            }
            Self::QuotaExceeded { count, limit } => {
                write!(
                    f,
                    "Weekly complaint limit reached: {count} of {limit} complaints this week"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl CoreError {
    /// Builds a quota error from the observed in-window count.
    #[must_use]
    pub const fn quota_exceeded(count: u32) -> Self {
        Self::QuotaExceeded {
            count,
            limit: WEEKLY_COMPLAINT_LIMIT,
        }
    }
}
