// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers for the complaint portal API.
//!
//! Each handler authenticates nothing itself: the server layer resolves
//! the bearer token to a [`User`] first and passes it in. Handlers
//! translate DTOs into engine inputs, run the lifecycle engine, apply
//! the outcome through persistence, and dispatch notifications after
//! the mutation is committed.

use std::str::FromStr;

use time::OffsetDateTime;
use tracing::info;

use campus_desk::{ActorContext, AssignOutcome, CreationResult, ProfessorRef, ReplyOutcome,
    StatusOutcome, can_access};
use campus_desk_domain::{
    AccountStatus, Complaint, ComplaintStatus, QuotaStatus, Role, StudentIdentity, User,
    WeekWindow, evaluate_quota, is_meeting_request, validate_email, validate_required,
};
use campus_desk_notify::{EventKind, Notification, NotificationSink, Recipient, dispatch};
use campus_desk_persistence::SqlitePersistence;

use crate::auth::AuthenticationService;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AddReplyRequest, AssignComplaintRequest, ComplaintInfo, ComplaintResponse,
    CreateComplaintRequest, ListComplaintsResponse, ListUsersResponse, LoginRequest, LoginResponse,
    QuotaStatusResponse, RegisterProfessorRequest, RegisterResponse, RegisterStudentRequest,
    UpdateStatusRequest, UserInfo, UserStatusResponse, WeeklyCountResponse, WhoAmIResponse,
};

/// Registers a student account, left in the pending state until an
/// admin approves it.
///
/// # Errors
///
/// Returns an error if a required field is empty, the email is
/// malformed, or the email is already registered.
pub fn register_student(
    persistence: &mut SqlitePersistence,
    request: RegisterStudentRequest,
) -> Result<RegisterResponse, ApiError> {
    validate_required("name", &request.name).map_err(translate_domain_error)?;
    validate_email(&request.email).map_err(translate_domain_error)?;
    validate_required("password", &request.password).map_err(translate_domain_error)?;
    validate_required("college_id", &request.college_id).map_err(translate_domain_error)?;
    validate_required("course", &request.course).map_err(translate_domain_error)?;

    let user: User = User::new_student(
        request.name,
        request.email,
        request.college_id,
        request.course,
    );
    let user_id: i64 = persistence
        .create_user(&user, &request.password)
        .map_err(translate_persistence_error)?;

    info!(user_id, role = "student", "registered new account");
    Ok(RegisterResponse {
        user_id,
        message: String::from("Registration submitted; awaiting admin approval"),
    })
}

/// Registers a professor account, left in the pending state until an
/// admin approves it.
///
/// # Errors
///
/// Returns an error if a required field is empty, the email is
/// malformed, or the email is already registered.
pub fn register_professor(
    persistence: &mut SqlitePersistence,
    request: RegisterProfessorRequest,
) -> Result<RegisterResponse, ApiError> {
    validate_required("name", &request.name).map_err(translate_domain_error)?;
    validate_email(&request.email).map_err(translate_domain_error)?;
    validate_required("password", &request.password).map_err(translate_domain_error)?;
    validate_required("professor_id", &request.professor_id).map_err(translate_domain_error)?;
    validate_required("department", &request.department).map_err(translate_domain_error)?;

    let user: User = User::new_professor(
        request.name,
        request.email,
        request.professor_id,
        request.department,
    );
    let user_id: i64 = persistence
        .create_user(&user, &request.password)
        .map_err(translate_persistence_error)?;

    info!(user_id, role = "professor", "registered new account");
    Ok(RegisterResponse {
        user_id,
        message: String::from("Registration submitted; awaiting admin approval"),
    })
}

/// Authenticates a user and opens a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the account is not
/// approved.
pub fn login(
    persistence: &mut SqlitePersistence,
    request: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, user): (String, User) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    info!(user_id = user.user_id, "user logged in");
    Ok(LoginResponse {
        token,
        user: UserInfo::from_user(&user),
    })
}

/// Closes the session identified by the given token.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(
    persistence: &mut SqlitePersistence,
    session_token: &str,
) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the identity of the authenticated caller.
#[must_use]
pub fn whoami(actor: &User) -> WhoAmIResponse {
    WhoAmIResponse {
        user: UserInfo::from_user(actor),
    }
}

/// Approves a pending account. Admin-only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the user does not
/// exist.
pub fn approve_user(
    persistence: &mut SqlitePersistence,
    actor: &User,
    user_id: i64,
    sink: &dyn NotificationSink,
) -> Result<UserStatusResponse, ApiError> {
    set_account_status(
        persistence,
        actor,
        user_id,
        AccountStatus::Approved,
        sink,
    )
}

/// Rejects a pending account. Admin-only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the user does not
/// exist.
pub fn reject_user(
    persistence: &mut SqlitePersistence,
    actor: &User,
    user_id: i64,
    sink: &dyn NotificationSink,
) -> Result<UserStatusResponse, ApiError> {
    set_account_status(
        persistence,
        actor,
        user_id,
        AccountStatus::Rejected,
        sink,
    )
}

/// Lists every registered account. Admin-only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_users(
    persistence: &mut SqlitePersistence,
    actor: &User,
) -> Result<ListUsersResponse, ApiError> {
    require_admin(actor, "list users")?;
    let users: Vec<User> = persistence
        .list_users()
        .map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        users: users.iter().map(UserInfo::from_user).collect(),
    })
}

/// Lists accounts awaiting approval. Admin-only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_pending_users(
    persistence: &mut SqlitePersistence,
    actor: &User,
) -> Result<ListUsersResponse, ApiError> {
    require_admin(actor, "list pending users")?;
    let users: Vec<User> = persistence
        .list_pending_users()
        .map_err(translate_persistence_error)?;
    Ok(ListUsersResponse {
        users: users.iter().map(UserInfo::from_user).collect(),
    })
}

/// Creates a complaint.
///
/// Students file for themselves, subject to the weekly quota. Admins
/// file on behalf of the student named by `student_id` and bypass the
/// quota. Non-meeting-request complaints are auto-assigned to the first
/// matching approved professor when one exists.
///
/// # Errors
///
/// Returns an error if the actor may not create complaints, a field is
/// invalid, the named student does not exist, or the quota is
/// exhausted.
pub fn create_complaint(
    persistence: &mut SqlitePersistence,
    actor: &User,
    request: CreateComplaintRequest,
    sink: &dyn NotificationSink,
) -> Result<ComplaintResponse, ApiError> {
    let context: ActorContext = actor_context(actor)?;

    let on_behalf_of: Option<StudentIdentity> = if context.is_admin() {
        match request.student_id {
            Some(student_id) => Some(lookup_student_identity(persistence, student_id)?),
            // The engine rejects an admin creation with no named
            // student; let it produce the error.
            None => None,
        }
    } else {
        None
    };

    let weekly_count: u32 = if context.is_student() {
        count_weekly_complaints(persistence, context.user_id)?
    } else {
        0
    };

    let auto_assign: Option<ProfessorRef> = if is_meeting_request(&request.topic) {
        None
    } else {
        persistence
            .find_auto_assign_candidate(&request.course)
            .map_err(translate_persistence_error)?
            .map(|(user_id, name)| ProfessorRef::new(user_id, name))
    };

    let intent = campus_desk::CreateComplaintIntent {
        topic: request.topic,
        description: request.description,
        course: request.course,
        department: request.department,
        attachments: request.attachments,
        on_behalf_of,
    };

    let result: CreationResult = campus_desk::create_complaint(
        &context,
        intent,
        weekly_count,
        auto_assign,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let complaint_id: i64 = persistence
        .insert_complaint(&result.complaint)
        .map_err(translate_persistence_error)?;
    dispatch(sink, &result.notifications);

    let mut complaint: Complaint = result.complaint;
    complaint.complaint_id = Some(complaint_id);

    info!(
        complaint_id,
        student_id = complaint.student.id,
        meeting_request = complaint.is_meeting_request(),
        "complaint created"
    );
    Ok(ComplaintResponse {
        complaint: ComplaintInfo::from_complaint(&complaint),
        message: String::from("Complaint submitted"),
    })
}

/// Retrieves a complaint visible to the caller.
///
/// # Errors
///
/// Returns an error if the complaint does not exist or the actor cannot
/// see it.
pub fn get_complaint(
    persistence: &mut SqlitePersistence,
    actor: &User,
    complaint_id: i64,
) -> Result<ComplaintInfo, ApiError> {
    let context: ActorContext = actor_context(actor)?;
    let complaint: Complaint = fetch_complaint(persistence, complaint_id)?;

    if !can_access(&context, &complaint) {
        return Err(ApiError::Forbidden {
            action: String::from("view complaint"),
            message: String::from("you do not have access to this complaint"),
        });
    }

    Ok(ComplaintInfo::from_complaint(&complaint))
}

/// Lists the complaints visible to the caller, newest first.
///
/// Admins see every complaint, students their own, professors those
/// assigned to them or filed in their department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_complaints(
    persistence: &mut SqlitePersistence,
    actor: &User,
) -> Result<ListComplaintsResponse, ApiError> {
    let context: ActorContext = actor_context(actor)?;
    let complaints: Vec<Complaint> = match context.role {
        Role::Admin => persistence.list_complaints(),
        Role::Student => persistence.list_complaints_for_student(context.user_id),
        Role::Professor => persistence
            .list_complaints_for_professor(context.user_id, context.department.as_deref()),
    }
    .map_err(translate_persistence_error)?;

    Ok(ListComplaintsResponse {
        complaints: complaints.iter().map(ComplaintInfo::from_complaint).collect(),
    })
}

/// Lists a specific student's complaints, newest first.
///
/// A student may list their own; admins may list any student's.
///
/// # Errors
///
/// Returns an error if the actor may not see the listing or the
/// student does not exist.
pub fn list_student_complaints(
    persistence: &mut SqlitePersistence,
    actor: &User,
    student_id: i64,
) -> Result<ListComplaintsResponse, ApiError> {
    let is_self: bool = actor.user_id == Some(student_id);
    if !is_self && actor.role != Role::Admin {
        return Err(ApiError::Forbidden {
            action: String::from("list student complaints"),
            message: String::from("only the student themselves or an admin may view this list"),
        });
    }
    if !is_self {
        lookup_student_identity(persistence, student_id)?;
    }

    let complaints: Vec<Complaint> = persistence
        .list_complaints_for_student(student_id)
        .map_err(translate_persistence_error)?;
    Ok(ListComplaintsResponse {
        complaints: complaints.iter().map(ComplaintInfo::from_complaint).collect(),
    })
}

/// Appends a reply to a complaint thread.
///
/// When an admin replies to an unclaimed meeting request, the reply
/// claims it in the same transaction.
///
/// # Errors
///
/// Returns an error if the complaint does not exist, the actor cannot
/// see it, or the message is blank.
pub fn add_reply(
    persistence: &mut SqlitePersistence,
    actor: &User,
    complaint_id: i64,
    request: AddReplyRequest,
    sink: &dyn NotificationSink,
) -> Result<ComplaintResponse, ApiError> {
    let context: ActorContext = actor_context(actor)?;
    let complaint: Complaint = fetch_complaint(persistence, complaint_id)?;

    let outcome: ReplyOutcome = campus_desk::add_reply(
        &context,
        &complaint,
        &request.message,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    persistence
        .append_reply(complaint_id, &outcome.reply, outcome.admin_claim.as_ref())
        .map_err(translate_persistence_error)?;
    dispatch(sink, &outcome.notifications);

    let updated: Complaint = fetch_complaint(persistence, complaint_id)?;
    Ok(ComplaintResponse {
        complaint: ComplaintInfo::from_complaint(&updated),
        message: String::from("Reply added"),
    })
}

/// Updates the status of a complaint.
///
/// A permitted same-value update succeeds silently: nothing is written
/// and nothing is notified.
///
/// # Errors
///
/// Returns an error if the status value is unknown, the complaint does
/// not exist, the actor cannot see it, or a non-admin requests the
/// rejected status.
pub fn update_status(
    persistence: &mut SqlitePersistence,
    actor: &User,
    complaint_id: i64,
    request: UpdateStatusRequest,
    sink: &dyn NotificationSink,
) -> Result<ComplaintResponse, ApiError> {
    let new_status: ComplaintStatus =
        ComplaintStatus::from_str(&request.status).map_err(translate_domain_error)?;
    let context: ActorContext = actor_context(actor)?;
    let complaint: Complaint = fetch_complaint(persistence, complaint_id)?;

    let outcome: StatusOutcome = campus_desk::update_status(&context, &complaint, new_status)
        .map_err(translate_core_error)?;

    if outcome.changed {
        persistence
            .update_complaint_status(
                complaint_id,
                outcome.new,
                outcome.solved_by.as_ref(),
                OffsetDateTime::now_utc(),
            )
            .map_err(translate_persistence_error)?;
        info!(
            complaint_id,
            old = outcome.old.as_str(),
            new = outcome.new.as_str(),
            "complaint status updated"
        );
    }
    dispatch(sink, &outcome.notifications);

    let updated: Complaint = fetch_complaint(persistence, complaint_id)?;
    Ok(ComplaintResponse {
        complaint: ComplaintInfo::from_complaint(&updated),
        message: if outcome.changed {
            String::from("Status updated")
        } else {
            String::from("Status unchanged")
        },
    })
}

/// Assigns a complaint to a professor. Admin-only.
///
/// Assignment forces the status to pending and notifies both the new
/// assignee and, on reassignment, the displaced professor.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the complaint does
/// not exist, or the referenced user is not an approved professor.
pub fn assign_complaint(
    persistence: &mut SqlitePersistence,
    actor: &User,
    complaint_id: i64,
    request: AssignComplaintRequest,
    sink: &dyn NotificationSink,
) -> Result<ComplaintResponse, ApiError> {
    let context: ActorContext = actor_context(actor)?;
    let complaint: Complaint = fetch_complaint(persistence, complaint_id)?;

    let professor: User = persistence
        .get_user_by_id(request.professor_id)
        .map_err(translate_persistence_error)?
        .filter(|user| user.role == Role::Professor && user.status == AccountStatus::Approved)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Professor"),
            message: format!(
                "Professor {} does not exist or is not approved",
                request.professor_id
            ),
        })?;

    let outcome: AssignOutcome = campus_desk::assign_professor(
        &context,
        &complaint,
        ProfessorRef::new(request.professor_id, professor.name),
    )
    .map_err(translate_core_error)?;

    persistence
        .assign_complaint(
            complaint_id,
            outcome.professor.user_id,
            &outcome.professor.name,
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_persistence_error)?;
    dispatch(sink, &outcome.notifications);

    info!(
        complaint_id,
        professor_id = outcome.professor.user_id,
        displaced = outcome.previous_professor_id,
        "complaint assigned"
    );

    let updated: Complaint = fetch_complaint(persistence, complaint_id)?;
    Ok(ComplaintResponse {
        complaint: ComplaintInfo::from_complaint(&updated),
        message: String::from("Complaint assigned"),
    })
}

/// Returns how many complaints a student has filed in the current week
/// window.
///
/// A student may query their own count; admins may query any student's.
///
/// # Errors
///
/// Returns an error if the actor may not see the count or the student
/// does not exist.
pub fn get_weekly_count(
    persistence: &mut SqlitePersistence,
    actor: &User,
    student_id: i64,
) -> Result<WeeklyCountResponse, ApiError> {
    let is_self: bool = actor.user_id == Some(student_id);
    if !is_self && actor.role != Role::Admin {
        return Err(ApiError::Forbidden {
            action: String::from("view weekly count"),
            message: String::from("only the student themselves or an admin may view this count"),
        });
    }
    if !is_self {
        lookup_student_identity(persistence, student_id)?;
    }

    let count: u32 = count_weekly_complaints(persistence, student_id)?;
    Ok(WeeklyCountResponse {
        student_id,
        count,
        limit: campus_desk_domain::WEEKLY_COMPLAINT_LIMIT,
    })
}

/// Returns a student's full quota status. Admin-only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the student does
/// not exist.
pub fn get_quota_status(
    persistence: &mut SqlitePersistence,
    actor: &User,
    student_id: i64,
) -> Result<QuotaStatusResponse, ApiError> {
    require_admin(actor, "view quota status")?;
    lookup_student_identity(persistence, student_id)?;

    let count: u32 = count_weekly_complaints(persistence, student_id)?;
    let quota: QuotaStatus = evaluate_quota(count);
    Ok(QuotaStatusResponse {
        student_id,
        exceeded: quota.exceeded,
        count: quota.count,
        limit: quota.limit,
    })
}

fn actor_context(actor: &User) -> Result<ActorContext, ApiError> {
    ActorContext::from_user(actor).ok_or_else(|| ApiError::Internal {
        message: String::from("Authenticated account has no canonical ID"),
    })
}

fn require_admin(actor: &User, action: &str) -> Result<(), ApiError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            action: action.to_owned(),
            message: String::from("only admins may perform this action"),
        })
    }
}

fn fetch_complaint(
    persistence: &mut SqlitePersistence,
    complaint_id: i64,
) -> Result<Complaint, ApiError> {
    persistence
        .get_complaint(complaint_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Complaint"),
            message: format!("Complaint {complaint_id} does not exist"),
        })
}

fn lookup_student_identity(
    persistence: &mut SqlitePersistence,
    student_id: i64,
) -> Result<StudentIdentity, ApiError> {
    persistence
        .get_user_by_id(student_id)
        .map_err(translate_persistence_error)?
        .filter(|user| user.role == Role::Student)
        .map(|user| StudentIdentity::new(student_id, user.name, user.email))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Student"),
            message: format!("Student {student_id} does not exist"),
        })
}

/// Counts the student's complaints inside the current Monday-to-Sunday
/// window.
fn count_weekly_complaints(
    persistence: &mut SqlitePersistence,
    student_id: i64,
) -> Result<u32, ApiError> {
    let window: WeekWindow = WeekWindow::current().map_err(translate_domain_error)?;
    let count: i64 = persistence
        .count_complaints_for_student_between(
            student_id,
            window.start_millis(),
            window.end_millis(),
        )
        .map_err(translate_persistence_error)?;
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

fn set_account_status(
    persistence: &mut SqlitePersistence,
    actor: &User,
    user_id: i64,
    status: AccountStatus,
    sink: &dyn NotificationSink,
) -> Result<UserStatusResponse, ApiError> {
    let action: &str = match status {
        AccountStatus::Approved => "approve user",
        _ => "reject user",
    };
    require_admin(actor, action)?;

    // Existence check first so the caller gets a 404-shaped error
    // instead of a bare update failure.
    let target: User = persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })?;

    persistence
        .set_user_status(user_id, status)
        .map_err(translate_persistence_error)?;

    let (kind, subject, body): (EventKind, String, String) = match status {
        AccountStatus::Approved => (
            EventKind::AccountApproved,
            String::from("Account Approved"),
            format!("Hello {}, your registration has been approved. You can now log in.", target.name),
        ),
        _ => (
            EventKind::AccountRejected,
            String::from("Account Rejected"),
            format!("Hello {}, your registration has been rejected.", target.name),
        ),
    };
    dispatch(
        sink,
        &[Notification::new(
            kind,
            vec![Recipient::User { user_id }],
            subject,
            body,
        )],
    );

    info!(user_id, status = status.as_str(), "account status set");
    Ok(UserStatusResponse {
        user_id,
        status: status.as_str().to_owned(),
        message: format!("User {user_id} {}", status.as_str()),
    })
}
