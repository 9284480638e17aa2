// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::actor::{ActorContext, ProfessorRef};
use crate::authorize::{authorize_assign, authorize_create, authorize_status_value, can_access};
use crate::error::CoreError;
use campus_desk_domain::{
    Complaint, ComplaintStatus, QuotaStatus, Reply, StudentIdentity, evaluate_quota,
    is_meeting_request, resolve_department, validate_email, validate_message, validate_required,
    validate_topic,
};
use campus_desk_notify::{EventKind, Notification, Recipient};
use time::OffsetDateTime;

/// The caller-supplied content of a new complaint.
///
/// `on_behalf_of` is only honored for admin actors; student actors
/// always file for themselves regardless of what the field carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateComplaintIntent {
    /// The complaint topic. A meeting-request prefix routes the
    /// complaint to admin handling.
    pub topic: String,
    /// The complaint body.
    pub description: String,
    /// The course the complaint concerns.
    pub course: String,
    /// Explicit department, if the caller supplied one.
    pub department: Option<String>,
    /// Opaque attachment references.
    pub attachments: Vec<String>,
    /// Admin-only: the student the complaint is filed on behalf of.
    pub on_behalf_of: Option<StudentIdentity>,
}

/// The result of creating a complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationResult {
    /// The new complaint, ready for persistence. `complaint_id` is
    /// `None` until the persistence layer assigns one.
    pub complaint: Complaint,
    /// Notifications to dispatch after the complaint is persisted.
    pub notifications: Vec<Notification>,
}

/// The admin self-claim applied when an admin replies to an unassigned
/// meeting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminClaim {
    /// The claiming admin's canonical user ID.
    pub admin_id: i64,
    /// The claiming admin's name.
    pub admin_name: String,
}

/// The result of appending a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    /// The reply to append to the thread.
    pub reply: Reply,
    /// Set when the replying admin claims the meeting request.
    pub admin_claim: Option<AdminClaim>,
    /// Notifications to dispatch after the reply is persisted.
    pub notifications: Vec<Notification>,
}

/// Attribution recorded when a professor marks a complaint solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedBy {
    /// The solving professor's canonical user ID.
    pub professor_id: i64,
    /// The solving professor's name.
    pub professor_name: String,
}

/// The result of a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome {
    /// The status before the update.
    pub old: ComplaintStatus,
    /// The status after the update.
    pub new: ComplaintStatus,
    /// Whether anything changed. A same-value update is a silent
    /// success: nothing is written and nothing is notified.
    pub changed: bool,
    /// Solver attribution, when a professor set the status to solved.
    pub solved_by: Option<SolvedBy>,
    /// Notifications to dispatch after the update is persisted.
    pub notifications: Vec<Notification>,
}

/// The result of assigning a complaint to a professor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignOutcome {
    /// The professor now assigned.
    pub professor: ProfessorRef,
    /// The previously assigned professor, if the assignment displaced
    /// a different one.
    pub previous_professor_id: Option<i64>,
    /// The status to write. Assignment always forces `Pending`.
    pub status: ComplaintStatus,
    /// Notifications to dispatch after the assignment is persisted.
    pub notifications: Vec<Notification>,
}

/// Creates a complaint on behalf of the actor.
///
/// Students file for themselves and are subject to the weekly quota,
/// evaluated against `weekly_count` (the number of complaints the
/// student has already filed in the current week window, counted by the
/// caller). Admins file on behalf of a named student and bypass the
/// quota. Professors may not create complaints.
///
/// For non-meeting-request complaints the caller passes the
/// auto-assignment candidate in `auto_assign`: the first approved
/// professor, in ascending ID order, whose department matches the
/// complaint's course or who shares the student's course. Meeting
/// requests are never auto-assigned to a professor; when an admin files
/// one, that admin is recorded as the handling admin immediately.
///
/// # Arguments
///
/// * `actor` - The authenticated user creating the complaint
/// * `intent` - The complaint content
/// * `weekly_count` - Complaints already filed by the student this week
/// * `auto_assign` - The auto-assignment candidate, if one exists
/// * `now` - The server timestamp to record
///
/// # Errors
///
/// Returns an error if:
/// - The actor is a professor
/// - A required field is empty
/// - The actor is an admin and `on_behalf_of` is missing or malformed
/// - The actor is a student and the weekly quota is exhausted
pub fn create_complaint(
    actor: &ActorContext,
    intent: CreateComplaintIntent,
    weekly_count: u32,
    auto_assign: Option<ProfessorRef>,
    now: OffsetDateTime,
) -> Result<CreationResult, CoreError> {
    authorize_create(actor)?;

    validate_topic(&intent.topic)?;
    validate_required("description", &intent.description)?;
    validate_required("course", &intent.course)?;

    let student: StudentIdentity = if actor.is_admin() {
        let Some(on_behalf_of) = intent.on_behalf_of else {
            return Err(CoreError::InvalidArgument {
                field: "student",
                message: String::from(
                    "admins must name the student the complaint is filed for",
                ),
            });
        };
        validate_required("student name", &on_behalf_of.name)?;
        validate_email(&on_behalf_of.email)?;
        on_behalf_of
    } else {
        // Students always file for themselves; any on_behalf_of payload
        // is ignored.
        let quota: QuotaStatus = evaluate_quota(weekly_count);
        if quota.exceeded {
            return Err(CoreError::quota_exceeded(quota.count));
        }
        StudentIdentity::new(actor.user_id, actor.name.clone(), actor.email.clone())
    };

    let department: String = resolve_department(intent.department.as_deref(), &intent.course);
    let meeting_request: bool = is_meeting_request(&intent.topic);

    let assigned_professor: Option<ProfessorRef> = if meeting_request {
        None
    } else {
        auto_assign
    };
    let assigned_admin: Option<(i64, String)> = if meeting_request && actor.is_admin() {
        Some((actor.user_id, actor.name.clone()))
    } else {
        None
    };

    let mut notifications: Vec<Notification> = vec![Notification::new(
        EventKind::ComplaintCreated,
        vec![Recipient::AllApprovedAdmins],
        String::from("New Complaint Submitted"),
        format!(
            "{} filed a new complaint: {}",
            student.name, intent.topic
        ),
    )];

    if !meeting_request {
        notifications.push(Notification::new(
            EventKind::ComplaintCreated,
            vec![Recipient::DepartmentProfessors {
                department: department.clone(),
                exclude: assigned_professor.as_ref().map(|prof| prof.user_id),
            }],
            String::from("New Complaint in Your Department"),
            format!(
                "A new complaint was filed in {}: {}",
                department, intent.topic
            ),
        ));
        if let Some(prof) = &assigned_professor {
            notifications.push(Notification::new(
                EventKind::ComplaintCreatedAssigned,
                vec![Recipient::User {
                    user_id: prof.user_id,
                }],
                String::from("New Complaint Assigned to You"),
                format!("You have been assigned the complaint: {}", intent.topic),
            ));
        }
    }

    let complaint: Complaint = Complaint {
        complaint_id: None,
        student,
        topic: intent.topic,
        description: intent.description,
        course: intent.course,
        department,
        status: ComplaintStatus::Submitted,
        assigned_professor_id: assigned_professor.as_ref().map(|prof| prof.user_id),
        assigned_professor_name: assigned_professor.map(|prof| prof.name),
        assigned_admin_id: assigned_admin.as_ref().map(|(id, _)| *id),
        assigned_admin_name: assigned_admin.map(|(_, name)| name),
        solved_by_professor_id: None,
        solved_by_professor_name: None,
        replies: Vec::new(),
        attachments: intent.attachments,
        created_at: now,
        updated_at: now,
    };

    Ok(CreationResult {
        complaint,
        notifications,
    })
}

/// Appends a reply to a complaint thread.
///
/// Any user who can see the complaint may reply. When an admin replies
/// to a meeting request that no admin has claimed yet, the reply claims
/// it: the outcome carries an [`AdminClaim`] the persistence layer
/// applies in the same transaction as the reply.
///
/// A reply notifies the student and the assigned professor (each unless
/// they authored it) and all approved admins. Regular complaints also
/// broadcast to the department's professors; meeting requests do not.
///
/// # Arguments
///
/// * `actor` - The authenticated user replying
/// * `complaint` - The current complaint snapshot
/// * `message` - The reply body
/// * `now` - The server timestamp to record
///
/// # Errors
///
/// Returns an error if:
/// - The actor cannot see the complaint
/// - The message is empty after trimming
pub fn add_reply(
    actor: &ActorContext,
    complaint: &Complaint,
    message: &str,
    now: OffsetDateTime,
) -> Result<ReplyOutcome, CoreError> {
    if !can_access(actor, complaint) {
        return Err(CoreError::Forbidden {
            action: "reply to complaint",
            reason: String::from("you do not have access to this complaint"),
        });
    }
    validate_message(message)?;

    let reply: Reply = Reply {
        author_id: actor.user_id,
        author_name: actor.name.clone(),
        author_role: actor.role,
        message: message.trim().to_owned(),
        created_at: now,
    };

    let admin_claim: Option<AdminClaim> =
        if actor.is_admin() && complaint.is_meeting_request() && complaint.assigned_admin_id.is_none()
        {
            Some(AdminClaim {
                admin_id: actor.user_id,
                admin_name: actor.name.clone(),
            })
        } else {
            None
        };

    let mut recipients: Vec<Recipient> = Vec::new();
    if complaint.student.id != actor.user_id {
        recipients.push(Recipient::Student {
            user_id: complaint.student.id,
            email: complaint.student.email.clone(),
        });
    }
    if let Some(professor_id) = complaint.assigned_professor_id
        && professor_id != actor.user_id
    {
        recipients.push(Recipient::User {
            user_id: professor_id,
        });
    }
    recipients.push(Recipient::AllApprovedAdmins);
    if !complaint.is_meeting_request() {
        recipients.push(Recipient::DepartmentProfessors {
            department: complaint.department.clone(),
            exclude: Some(actor.user_id),
        });
    }

    let notifications: Vec<Notification> = vec![Notification::new(
        EventKind::ComplaintReplied,
        recipients,
        format!("New Reply to Complaint: {}", complaint.topic),
        format!("{} replied: {}", actor.name, reply.message),
    )];

    Ok(ReplyOutcome {
        reply,
        admin_claim,
        notifications,
    })
}

/// Updates the status of a complaint.
///
/// Permission is checked before anything else: an actor without access
/// (or a non-admin setting `rejected`) is refused even when the
/// requested value equals the current one. A permitted same-value
/// update succeeds silently with `changed = false` and no
/// notifications.
///
/// When a professor sets the status to `solved`, the outcome records
/// solver attribution, whether or not that professor was the assignee.
///
/// A real change notifies the student, all approved admins, and the
/// assigned professor when they are not the actor.
///
/// # Arguments
///
/// * `actor` - The authenticated user updating the status
/// * `complaint` - The current complaint snapshot
/// * `new_status` - The requested status value
///
/// # Errors
///
/// Returns an error if:
/// - The actor cannot see the complaint
/// - A non-admin requests the `rejected` status
pub fn update_status(
    actor: &ActorContext,
    complaint: &Complaint,
    new_status: ComplaintStatus,
) -> Result<StatusOutcome, CoreError> {
    if !can_access(actor, complaint) {
        return Err(CoreError::Forbidden {
            action: "update complaint status",
            reason: String::from("you do not have access to this complaint"),
        });
    }
    authorize_status_value(actor, new_status)?;

    let old: ComplaintStatus = complaint.status;
    if new_status == old {
        return Ok(StatusOutcome {
            old,
            new: new_status,
            changed: false,
            solved_by: None,
            notifications: Vec::new(),
        });
    }

    let solved_by: Option<SolvedBy> =
        if new_status == ComplaintStatus::Solved && actor.is_professor() {
            Some(SolvedBy {
                professor_id: actor.user_id,
                professor_name: actor.name.clone(),
            })
        } else {
            None
        };

    let mut recipients: Vec<Recipient> = vec![
        Recipient::Student {
            user_id: complaint.student.id,
            email: complaint.student.email.clone(),
        },
        Recipient::AllApprovedAdmins,
    ];
    if let Some(professor_id) = complaint.assigned_professor_id
        && professor_id != actor.user_id
    {
        recipients.push(Recipient::User {
            user_id: professor_id,
        });
    }

    let notifications: Vec<Notification> = vec![Notification::new(
        EventKind::ComplaintStatusChanged {
            old: old.as_str().to_owned(),
            new: new_status.as_str().to_owned(),
        },
        recipients,
        format!("Complaint Status Updated: {}", complaint.topic),
        format!(
            "The status of the complaint '{}' changed from {} to {}",
            complaint.topic,
            old.as_str(),
            new_status.as_str()
        ),
    )];

    Ok(StatusOutcome {
        old,
        new: new_status,
        changed: true,
        solved_by,
        notifications,
    })
}

/// Assigns a complaint to a professor.
///
/// Admin-only. Assignment always forces the status to `Pending`, no
/// matter what it was before. The caller is responsible for having
/// verified that the referenced professor exists and is approved. The
/// new assignee and the student are notified; if a different professor
/// was previously assigned, they are notified of the reassignment.
///
/// # Arguments
///
/// * `actor` - The authenticated admin performing the assignment
/// * `complaint` - The current complaint snapshot
/// * `professor` - The professor to assign
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is not an admin.
pub fn assign_professor(
    actor: &ActorContext,
    complaint: &Complaint,
    professor: ProfessorRef,
) -> Result<AssignOutcome, CoreError> {
    authorize_assign(actor)?;

    let previous_professor_id: Option<i64> = complaint
        .assigned_professor_id
        .filter(|&prev| prev != professor.user_id);

    let mut notifications: Vec<Notification> = vec![
        Notification::new(
            EventKind::ComplaintAssigned,
            vec![Recipient::User {
                user_id: professor.user_id,
            }],
            String::from("New Complaint Assigned to You"),
            format!("You have been assigned the complaint: {}", complaint.topic),
        ),
        Notification::new(
            EventKind::ComplaintAssigned,
            vec![Recipient::Student {
                user_id: complaint.student.id,
                email: complaint.student.email.clone(),
            }],
            format!("Complaint Assigned: {}", complaint.topic),
            format!(
                "Your complaint '{}' has been assigned to {}",
                complaint.topic, professor.name
            ),
        ),
    ];
    if let Some(prev) = previous_professor_id {
        notifications.push(Notification::new(
            EventKind::ComplaintReassignedAway,
            vec![Recipient::User { user_id: prev }],
            format!("Complaint Reassigned: {}", complaint.topic),
            format!(
                "The complaint '{}' has been reassigned to {}",
                complaint.topic, professor.name
            ),
        ));
    }

    Ok(AssignOutcome {
        professor,
        previous_professor_id,
        status: ComplaintStatus::Pending,
        notifications,
    })
}
