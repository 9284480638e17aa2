// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod quota;
mod types;
mod validation;
mod visibility;
mod week_window;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use quota::{QuotaStatus, WEEKLY_COMPLAINT_LIMIT, evaluate_quota};
pub use types::{
    AccountStatus, Complaint, ComplaintStatus, MEETING_REQUEST_MARKER, Reply, Role,
    StudentIdentity, UNKNOWN_DEPARTMENT, User, is_meeting_request, resolve_department,
};
pub use validation::{validate_email, validate_message, validate_required, validate_topic};
pub use visibility::professor_can_access;
pub use week_window::WeekWindow;
