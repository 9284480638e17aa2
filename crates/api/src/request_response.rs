// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Timestamps cross the boundary as RFC 3339 strings.

use time::OffsetDateTime;

use campus_desk_domain::{Complaint, Reply, User};

/// API request to register a student account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RegisterStudentRequest {
    /// The student's full name.
    pub name: String,
    /// The student's email address.
    pub email: String,
    /// The plain-text password.
    pub password: String,
    /// The institution-issued college ID.
    pub college_id: String,
    /// The enrolled course.
    pub course: String,
}

/// API request to register a professor account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RegisterProfessorRequest {
    /// The professor's full name.
    pub name: String,
    /// The professor's email address.
    pub email: String,
    /// The plain-text password.
    pub password: String,
    /// The institution-issued professor ID.
    pub professor_id: String,
    /// The department the professor belongs to.
    pub department: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// The canonical ID assigned to the new account.
    pub user_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to authenticate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The opaque bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub user: UserInfo,
}

/// A user as exposed by the API. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The canonical user ID.
    pub user_id: i64,
    /// The user's full name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: String,
    /// The approval state of the account.
    pub status: String,
    /// Student attribute: the institution-issued college ID.
    pub college_id: Option<String>,
    /// Student attribute: the enrolled course.
    pub course: Option<String>,
    /// Professor attribute: the institution-issued professor ID.
    pub professor_id: Option<String>,
    /// Professor attribute: the department.
    pub department: Option<String>,
}

impl UserInfo {
    /// Builds the API view of a persisted user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id.unwrap_or_default(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            status: user.status.as_str().to_owned(),
            college_id: user.college_id.clone(),
            course: user.course.clone(),
            professor_id: user.professor_id.clone(),
            department: user.department.clone(),
        }
    }
}

/// API response identifying the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The authenticated account.
    pub user: UserInfo,
}

/// API response for an account approval or rejection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserStatusResponse {
    /// The affected user.
    pub user_id: i64,
    /// The account status after the change.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response listing users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersResponse {
    /// The users, in ascending ID order.
    pub users: Vec<UserInfo>,
}

/// API request to create a complaint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateComplaintRequest {
    /// The complaint topic.
    pub topic: String,
    /// The complaint body.
    pub description: String,
    /// The course the complaint concerns.
    pub course: String,
    /// Explicit department; falls back to the course when absent.
    #[serde(default)]
    pub department: Option<String>,
    /// Opaque attachment references.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Admin-only: the student the complaint is filed on behalf of.
    #[serde(default)]
    pub student_id: Option<i64>,
}

/// A reply as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplyInfo {
    /// The canonical user ID of the author.
    pub author_id: i64,
    /// The author's name at reply time.
    pub author_name: String,
    /// The author's role at reply time.
    pub author_role: String,
    /// The reply body.
    pub message: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

/// A complaint as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplaintInfo {
    /// The canonical complaint ID.
    pub complaint_id: i64,
    /// The filing student's canonical user ID.
    pub student_id: i64,
    /// The filing student's name at creation time.
    pub student_name: String,
    /// The filing student's email at creation time.
    pub student_email: String,
    /// The complaint topic.
    pub topic: String,
    /// The complaint body.
    pub description: String,
    /// The course the complaint concerns.
    pub course: String,
    /// The department.
    pub department: String,
    /// The lifecycle state.
    pub status: String,
    /// Whether the topic marks a meeting request.
    pub is_meeting_request: bool,
    /// The assigned professor, if any.
    pub assigned_professor_id: Option<i64>,
    /// The assigned professor's name, if any.
    pub assigned_professor_name: Option<String>,
    /// The assigned admin (meeting requests only), if any.
    pub assigned_admin_id: Option<i64>,
    /// The assigned admin's name, if any.
    pub assigned_admin_name: Option<String>,
    /// The professor who solved the complaint, if a professor did.
    pub solved_by_professor_id: Option<i64>,
    /// The solving professor's name, if any.
    pub solved_by_professor_name: Option<String>,
    /// The reply thread, in insertion order.
    pub replies: Vec<ReplyInfo>,
    /// Opaque attachment references.
    pub attachments: Vec<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last mutation timestamp, RFC 3339.
    pub updated_at: String,
}

impl ComplaintInfo {
    /// Builds the API view of a persisted complaint.
    #[must_use]
    pub fn from_complaint(complaint: &Complaint) -> Self {
        Self {
            complaint_id: complaint.complaint_id.unwrap_or_default(),
            student_id: complaint.student.id,
            student_name: complaint.student.name.clone(),
            student_email: complaint.student.email.clone(),
            topic: complaint.topic.clone(),
            description: complaint.description.clone(),
            course: complaint.course.clone(),
            department: complaint.department.clone(),
            status: complaint.status.as_str().to_owned(),
            is_meeting_request: complaint.is_meeting_request(),
            assigned_professor_id: complaint.assigned_professor_id,
            assigned_professor_name: complaint.assigned_professor_name.clone(),
            assigned_admin_id: complaint.assigned_admin_id,
            assigned_admin_name: complaint.assigned_admin_name.clone(),
            solved_by_professor_id: complaint.solved_by_professor_id,
            solved_by_professor_name: complaint.solved_by_professor_name.clone(),
            replies: complaint.replies.iter().map(ReplyInfo::from_reply).collect(),
            attachments: complaint.attachments.clone(),
            created_at: format_rfc3339(complaint.created_at),
            updated_at: format_rfc3339(complaint.updated_at),
        }
    }
}

impl ReplyInfo {
    /// Builds the API view of a reply.
    #[must_use]
    pub fn from_reply(reply: &Reply) -> Self {
        Self {
            author_id: reply.author_id,
            author_name: reply.author_name.clone(),
            author_role: reply.author_role.as_str().to_owned(),
            message: reply.message.clone(),
            created_at: format_rfc3339(reply.created_at),
        }
    }
}

/// API response carrying a single complaint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComplaintResponse {
    /// The complaint.
    pub complaint: ComplaintInfo,
    /// A success message.
    pub message: String,
}

/// API response listing complaints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListComplaintsResponse {
    /// The complaints visible to the caller, newest first.
    pub complaints: Vec<ComplaintInfo>,
}

/// API request to append a reply.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AddReplyRequest {
    /// The reply body.
    pub message: String,
}

/// API request to update a complaint's status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateStatusRequest {
    /// The requested status value.
    pub status: String,
}

/// API request to assign a complaint to a professor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AssignComplaintRequest {
    /// The professor's canonical user ID.
    pub professor_id: i64,
}

/// API response for a weekly complaint count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeeklyCountResponse {
    /// The student the count is for.
    pub student_id: i64,
    /// Complaints filed in the current week window.
    pub count: u32,
    /// The weekly limit.
    pub limit: u32,
}

/// API response for a student's quota status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuotaStatusResponse {
    /// The student the status is for.
    pub student_id: i64,
    /// Whether the quota is exhausted.
    pub exceeded: bool,
    /// Complaints filed in the current week window.
    pub count: u32,
    /// The weekly limit.
    pub limit: u32,
}

fn format_rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
