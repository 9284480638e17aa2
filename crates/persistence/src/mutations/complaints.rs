// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint mutations.
//!
//! Each mutation writes only the columns its lifecycle operation owns,
//! so concurrent operations on the same complaint never clobber each
//! other's fields. Reply appends are row inserts and are atomic by
//! construction.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use campus_desk::{AdminClaim, SolvedBy};
use campus_desk_domain::{Complaint, ComplaintStatus, Reply};

use crate::data_models::to_epoch_millis;
use crate::diesel_schema::{complaints, replies};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a newly created complaint.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `complaint` - The complaint produced by the lifecycle engine
///
/// # Returns
///
/// The canonical ID assigned to the new complaint.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_complaint(
    conn: &mut SqliteConnection,
    complaint: &Complaint,
) -> Result<i64, PersistenceError> {
    let attachments_json: String = serde_json::to_string(&complaint.attachments)?;
    let created_at_ms: i64 = to_epoch_millis(complaint.created_at)?;
    let updated_at_ms: i64 = to_epoch_millis(complaint.updated_at)?;

    diesel::insert_into(complaints::table)
        .values((
            complaints::student_id.eq(complaint.student.id),
            complaints::student_name.eq(&complaint.student.name),
            complaints::student_email.eq(&complaint.student.email),
            complaints::topic.eq(&complaint.topic),
            complaints::description.eq(&complaint.description),
            complaints::course.eq(&complaint.course),
            complaints::department.eq(&complaint.department),
            complaints::status.eq(complaint.status.as_str()),
            complaints::assigned_professor_id.eq(complaint.assigned_professor_id),
            complaints::assigned_professor_name.eq(&complaint.assigned_professor_name),
            complaints::assigned_admin_id.eq(complaint.assigned_admin_id),
            complaints::assigned_admin_name.eq(&complaint.assigned_admin_name),
            complaints::solved_by_professor_id.eq(complaint.solved_by_professor_id),
            complaints::solved_by_professor_name.eq(&complaint.solved_by_professor_name),
            complaints::attachments_json.eq(&attachments_json),
            complaints::created_at_ms.eq(created_at_ms),
            complaints::updated_at_ms.eq(updated_at_ms),
        ))
        .execute(conn)?;

    let complaint_id: i64 = get_last_insert_rowid(conn)?;

    info!(
        complaint_id,
        student_id = complaint.student.id,
        "Complaint created"
    );

    Ok(complaint_id)
}

/// Appends a reply to a complaint thread.
///
/// The reply insert, the `updated_at` bump, and the optional admin
/// claim of a meeting request all commit in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `complaint_id` - The complaint to append to
/// * `reply` - The reply produced by the lifecycle engine
/// * `admin_claim` - The meeting-request claim to apply, if any
///
/// # Errors
///
/// Returns `PersistenceError::ComplaintNotFound` if no such complaint
/// exists, or another error if a write fails.
pub fn append_reply(
    conn: &mut SqliteConnection,
    complaint_id: i64,
    reply: &Reply,
    admin_claim: Option<&AdminClaim>,
) -> Result<(), PersistenceError> {
    let created_at_ms: i64 = to_epoch_millis(reply.created_at)?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(complaints::table)
            .filter(complaints::complaint_id.eq(complaint_id))
            .set(complaints::updated_at_ms.eq(created_at_ms))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::ComplaintNotFound(complaint_id));
        }

        diesel::insert_into(replies::table)
            .values((
                replies::complaint_id.eq(complaint_id),
                replies::author_id.eq(reply.author_id),
                replies::author_name.eq(&reply.author_name),
                replies::author_role.eq(reply.author_role.as_str()),
                replies::message.eq(&reply.message),
                replies::created_at_ms.eq(created_at_ms),
            ))
            .execute(conn)?;

        if let Some(claim) = admin_claim {
            diesel::update(complaints::table)
                .filter(complaints::complaint_id.eq(complaint_id))
                .set((
                    complaints::assigned_admin_id.eq(Some(claim.admin_id)),
                    complaints::assigned_admin_name.eq(Some(claim.admin_name.clone())),
                ))
                .execute(conn)?;
            debug!(
                complaint_id,
                admin_id = claim.admin_id,
                "Meeting request claimed by replying admin"
            );
        }

        Ok(())
    })?;

    info!(complaint_id, author_id = reply.author_id, "Reply appended");
    Ok(())
}

/// Updates the status of a complaint.
///
/// Writes the status column, the `updated_at` bump, and solver
/// attribution when present; nothing else.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `complaint_id` - The complaint to update
/// * `status` - The new status
/// * `solved_by` - Solver attribution, when a professor solved it
/// * `updated_at_ms` - The new `updated_at`, epoch milliseconds
///
/// # Errors
///
/// Returns `PersistenceError::ComplaintNotFound` if no such complaint
/// exists.
pub fn update_status(
    conn: &mut SqliteConnection,
    complaint_id: i64,
    status: ComplaintStatus,
    solved_by: Option<&SolvedBy>,
    updated_at_ms: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = match solved_by {
        Some(solver) => diesel::update(complaints::table)
            .filter(complaints::complaint_id.eq(complaint_id))
            .set((
                complaints::status.eq(status.as_str()),
                complaints::solved_by_professor_id.eq(Some(solver.professor_id)),
                complaints::solved_by_professor_name.eq(Some(solver.professor_name.clone())),
                complaints::updated_at_ms.eq(updated_at_ms),
            ))
            .execute(conn)?,
        None => diesel::update(complaints::table)
            .filter(complaints::complaint_id.eq(complaint_id))
            .set((
                complaints::status.eq(status.as_str()),
                complaints::updated_at_ms.eq(updated_at_ms),
            ))
            .execute(conn)?,
    };

    if updated == 0 {
        return Err(PersistenceError::ComplaintNotFound(complaint_id));
    }

    info!(complaint_id, status = status.as_str(), "Status updated");
    Ok(())
}

/// Assigns a complaint to a professor.
///
/// Assignment always forces the status to `pending`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `complaint_id` - The complaint to assign
/// * `professor_id` - The professor's canonical user ID
/// * `professor_name` - The professor's name
/// * `updated_at_ms` - The new `updated_at`, epoch milliseconds
///
/// # Errors
///
/// Returns `PersistenceError::ComplaintNotFound` if no such complaint
/// exists.
pub fn assign_professor(
    conn: &mut SqliteConnection,
    complaint_id: i64,
    professor_id: i64,
    professor_name: &str,
    updated_at_ms: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(complaints::table)
        .filter(complaints::complaint_id.eq(complaint_id))
        .set((
            complaints::assigned_professor_id.eq(Some(professor_id)),
            complaints::assigned_professor_name.eq(Some(professor_name.to_owned())),
            complaints::status.eq(ComplaintStatus::Pending.as_str()),
            complaints::updated_at_ms.eq(updated_at_ms),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ComplaintNotFound(complaint_id));
    }

    info!(complaint_id, professor_id, "Complaint assigned");
    Ok(())
}
