// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use campus_desk::CoreError;
use campus_desk_domain::DomainError;
use campus_desk_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The credentials are valid but the account awaits admin approval.
    PendingApproval,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::PendingApproval => {
                write!(f, "Account is pending admin approval")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The account awaits admin approval.
    PendingApproval,
    /// Authorization failed - the actor does not have permission.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of why it was refused.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The weekly complaint quota is exhausted.
    QuotaExceeded {
        /// Complaints filed so far in the current week window.
        count: u32,
        /// The weekly limit.
        limit: u32,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::PendingApproval => {
                write!(f, "Account is pending admin approval")
            }
            Self::Forbidden { action, message } => {
                write!(f, "Forbidden: '{action}': {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::QuotaExceeded { count, limit } => {
                write!(
                    f,
                    "Weekly complaint limit reached: {count} of {limit} complaints this week"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::PendingApproval => Self::PendingApproval,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyField { field } => ApiError::InvalidInput {
            field: field.to_owned(),
            message: format!("{field} cannot be empty"),
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidComplaintStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{value}' is not a valid complaint status"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("'{value}' is not a valid role"),
        },
        DomainError::InvalidAccountStatus(value) => ApiError::InvalidInput {
            field: String::from("account_status"),
            message: format!("'{value}' is not a valid account status"),
        },
        DomainError::WeekWindowUnrepresentable { detail } => ApiError::Internal {
            message: format!("Could not resolve the current week window: {detail}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Forbidden { action, reason } => ApiError::Forbidden {
            action: action.to_owned(),
            message: reason,
        },
        CoreError::InvalidArgument { field, message } => ApiError::InvalidInput {
            field: field.to_owned(),
            message,
        },
        CoreError::QuotaExceeded { count, limit } => ApiError::QuotaExceeded { count, limit },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage detail stays behind the boundary; callers see the API
/// contract only.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmailAlreadyRegistered(email) => ApiError::Conflict {
            message: format!("Email already registered: {email}"),
        },
        PersistenceError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        PersistenceError::ComplaintNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: format!("Complaint {id} does not exist"),
        },
        PersistenceError::SessionNotFound(msg) | PersistenceError::SessionExpired(msg) => {
            ApiError::AuthenticationFailed { reason: msg }
        }
        _ => ApiError::Internal {
            message: format!("Database error: {err}"),
        },
    }
}
