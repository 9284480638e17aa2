// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The literal topic prefix that marks a complaint as a meeting request.
///
/// Meeting requests are routed to admin assignment instead of professor
/// assignment. The trailing space is part of the marker.
pub const MEETING_REQUEST_MARKER: &str = "[MEETING REQUEST] ";

/// Sentinel department used when neither an explicit department nor a
/// course is available for a complaint.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown Department";

/// Checks whether a complaint topic marks the meeting-request sub-flow.
#[must_use]
pub fn is_meeting_request(topic: &str) -> bool {
    topic.starts_with(MEETING_REQUEST_MARKER)
}

/// Resolves the department for a complaint.
///
/// The department falls back to the course when unset, and to the
/// [`UNKNOWN_DEPARTMENT`] sentinel when both are blank. The result is
/// always non-empty.
#[must_use]
pub fn resolve_department(department: Option<&str>, course: &str) -> String {
    match department {
        Some(dept) if !dept.trim().is_empty() => dept.to_owned(),
        _ if !course.trim().is_empty() => course.to_owned(),
        _ => UNKNOWN_DEPARTMENT.to_owned(),
    }
}

/// The role of a registered user.
///
/// Roles are a closed set. All authorization decisions in the lifecycle
/// engine dispatch on this enum rather than on scattered string checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A student: files complaints and participates in their own threads.
    Student,
    /// A professor: triages complaints assigned to them or filed in
    /// their department.
    Professor,
    /// An admin: full authority, including rejection and assignment.
    Admin,
}

impl Role {
    /// Returns the string representation of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "professor" => Ok(Self::Professor),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The approval state of a user account.
///
/// Non-admin accounts start `Pending` and may only authenticate once an
/// admin approves them. Admin accounts bypass the gate entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Initial state after registration. Awaiting admin review.
    #[default]
    Pending,
    /// Approved by an admin. The account may authenticate.
    Approved,
    /// Rejected by an admin. The account may not authenticate.
    Rejected,
}

impl AccountStatus {
    /// Returns the string representation of this account status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidAccountStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of a complaint.
///
/// There is no fixed transition graph between these states; authority to
/// set a value is role-dependent instead. `Rejected` is reserved to
/// admins, and assignment by an admin always forces `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Initial state on creation.
    #[default]
    Submitted,
    /// Awaiting review by the assigned professor. Forced on assignment.
    Pending,
    /// Actively being worked.
    InProgress,
    /// Resolved. When set by a professor, attribution is recorded.
    Solved,
    /// Dismissed. Only admins may set this value.
    Rejected,
}

impl ComplaintStatus {
    /// Returns the string representation of this complaint status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Solved => "solved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "solved" => Ok(Self::Solved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidComplaintStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user of the portal.
///
/// `user_id` is the canonical internal identifier, assigned by the
/// persistence layer. Email is unique across all users. Role-specific
/// attributes are optional and populated according to the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Canonical internal identifier. `None` before first persistence.
    pub user_id: Option<i64>,
    /// The user's full name (informational, not unique).
    pub name: String,
    /// The user's email address (unique, normalized to lowercase).
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// The approval state of the account.
    pub status: AccountStatus,
    /// Student attribute: the institution-issued college ID.
    pub college_id: Option<String>,
    /// Student attribute: the enrolled course.
    pub course: Option<String>,
    /// Professor attribute: the institution-issued professor ID.
    pub professor_id: Option<String>,
    /// Professor attribute: the department the professor belongs to.
    pub department: Option<String>,
}

impl User {
    /// Creates a new student account in the `Pending` state.
    #[must_use]
    pub fn new_student(name: String, email: String, college_id: String, course: String) -> Self {
        Self {
            user_id: None,
            name,
            email: email.to_lowercase(),
            role: Role::Student,
            status: AccountStatus::Pending,
            college_id: Some(college_id),
            course: Some(course),
            professor_id: None,
            department: None,
        }
    }

    /// Creates a new professor account in the `Pending` state.
    #[must_use]
    pub fn new_professor(
        name: String,
        email: String,
        professor_id: String,
        department: String,
    ) -> Self {
        Self {
            user_id: None,
            name,
            email: email.to_lowercase(),
            role: Role::Professor,
            status: AccountStatus::Pending,
            college_id: None,
            course: None,
            professor_id: Some(professor_id),
            department: Some(department),
        }
    }

    /// Creates a new admin account.
    ///
    /// Admins are created `Approved`; the approval gate never applies
    /// to them.
    #[must_use]
    pub fn new_admin(name: String, email: String) -> Self {
        Self {
            user_id: None,
            name,
            email: email.to_lowercase(),
            role: Role::Admin,
            status: AccountStatus::Approved,
            college_id: None,
            course: None,
            professor_id: None,
            department: None,
        }
    }

    /// Returns whether this account is allowed to authenticate.
    ///
    /// Admin accounts bypass the approval gate; every other role must
    /// be `Approved`.
    #[must_use]
    pub fn can_authenticate(&self) -> bool {
        self.role == Role::Admin || self.status == AccountStatus::Approved
    }
}

/// The denormalized student identity snapshot carried by a complaint.
///
/// Captured at creation time so the complaint preserves its historical
/// student-facing identity even if the user record later changes. This
/// is intentional; do not replace it with a live join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    /// The student's canonical user ID.
    pub id: i64,
    /// The student's name at creation time.
    pub name: String,
    /// The student's email at creation time.
    pub email: String,
}

impl StudentIdentity {
    /// Creates a new student identity snapshot.
    #[must_use]
    pub const fn new(id: i64, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}

/// A reply in a complaint thread.
///
/// Replies are owned by their parent complaint, appended and never
/// edited or removed. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// The canonical user ID of the author.
    pub author_id: i64,
    /// The author's name at reply time.
    pub author_name: String,
    /// The author's role at reply time.
    pub author_role: Role,
    /// The reply body (trimmed, non-empty).
    pub message: String,
    /// Server-assigned creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A complaint filed by or on behalf of a student.
///
/// The single trackable entity of the portal. Created by a student (for
/// themselves) or an admin (on behalf of a named student); mutated by
/// status updates, assignment, and reply appends; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    /// Canonical internal identifier. `None` before first persistence.
    pub complaint_id: Option<i64>,
    /// Denormalized student identity captured at creation time.
    pub student: StudentIdentity,
    /// The complaint topic. A [`MEETING_REQUEST_MARKER`] prefix routes
    /// the complaint through the meeting-request sub-flow.
    pub topic: String,
    /// The complaint body.
    pub description: String,
    /// The course the complaint concerns. Drives professor visibility.
    pub course: String,
    /// The department. Always non-empty; see [`resolve_department`].
    pub department: String,
    /// The lifecycle state.
    pub status: ComplaintStatus,
    /// The assigned professor, if any.
    pub assigned_professor_id: Option<i64>,
    /// The assigned professor's name, if any.
    pub assigned_professor_name: Option<String>,
    /// The assigned admin (meeting requests only), if any.
    pub assigned_admin_id: Option<i64>,
    /// The assigned admin's name, if any.
    pub assigned_admin_name: Option<String>,
    /// The professor who solved the complaint, if a professor did.
    ///
    /// Distinct from the assignment: a department colleague who was
    /// never assigned may solve a complaint.
    pub solved_by_professor_id: Option<i64>,
    /// The solving professor's name, if any.
    pub solved_by_professor_name: Option<String>,
    /// The reply thread, in insertion order.
    pub replies: Vec<Reply>,
    /// Opaque attachment references, in insertion order.
    pub attachments: Vec<String>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last mutation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Complaint {
    /// Returns whether this complaint is a meeting request.
    #[must_use]
    pub fn is_meeting_request(&self) -> bool {
        is_meeting_request(&self.topic)
    }
}
