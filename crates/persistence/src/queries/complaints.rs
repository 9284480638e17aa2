// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint and reply queries.

use std::str::FromStr;

use diesel::prelude::*;
use diesel::SqliteConnection;

use campus_desk_domain::{Complaint, ComplaintStatus, Reply, Role, StudentIdentity};

use crate::data_models::from_epoch_millis;
use crate::diesel_schema::{complaints, replies};
use crate::error::PersistenceError;

/// Diesel Queryable struct for complaint rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = complaints)]
pub(crate) struct ComplaintRow {
    pub complaint_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub topic: String,
    pub description: String,
    pub course: String,
    pub department: String,
    pub status: String,
    pub assigned_professor_id: Option<i64>,
    pub assigned_professor_name: Option<String>,
    pub assigned_admin_id: Option<i64>,
    pub assigned_admin_name: Option<String>,
    pub solved_by_professor_id: Option<i64>,
    pub solved_by_professor_name: Option<String>,
    pub attachments_json: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// Diesel Queryable struct for reply rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = replies)]
struct ReplyRow {
    author_id: i64,
    author_name: String,
    author_role: String,
    message: String,
    created_at_ms: i64,
}

impl ReplyRow {
    fn into_reply(self) -> Result<Reply, PersistenceError> {
        Ok(Reply {
            author_id: self.author_id,
            author_name: self.author_name,
            author_role: Role::from_str(&self.author_role)?,
            message: self.message,
            created_at: from_epoch_millis(self.created_at_ms)?,
        })
    }
}

impl ComplaintRow {
    /// Converts a stored row plus its reply thread into the domain
    /// complaint.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if a stored status,
    /// timestamp, or the attachment list cannot be interpreted.
    fn into_complaint(self, replies: Vec<Reply>) -> Result<Complaint, PersistenceError> {
        let attachments: Vec<String> = serde_json::from_str(&self.attachments_json)?;
        Ok(Complaint {
            complaint_id: Some(self.complaint_id),
            student: StudentIdentity::new(self.student_id, self.student_name, self.student_email),
            topic: self.topic,
            description: self.description,
            course: self.course,
            department: self.department,
            status: ComplaintStatus::from_str(&self.status)?,
            assigned_professor_id: self.assigned_professor_id,
            assigned_professor_name: self.assigned_professor_name,
            assigned_admin_id: self.assigned_admin_id,
            assigned_admin_name: self.assigned_admin_name,
            solved_by_professor_id: self.solved_by_professor_id,
            solved_by_professor_name: self.solved_by_professor_name,
            replies,
            attachments,
            created_at: from_epoch_millis(self.created_at_ms)?,
            updated_at: from_epoch_millis(self.updated_at_ms)?,
        })
    }
}

/// Loads the reply thread for a complaint, in insertion order.
fn load_replies(
    conn: &mut SqliteConnection,
    complaint_id: i64,
) -> Result<Vec<Reply>, PersistenceError> {
    let rows: Vec<ReplyRow> = replies::table
        .filter(replies::complaint_id.eq(complaint_id))
        .order(replies::reply_id.asc())
        .select(ReplyRow::as_select())
        .load(conn)?;

    rows.into_iter().map(ReplyRow::into_reply).collect()
}

/// Assembles full complaints from a set of rows by loading each reply
/// thread.
fn assemble(
    conn: &mut SqliteConnection,
    rows: Vec<ComplaintRow>,
) -> Result<Vec<Complaint>, PersistenceError> {
    let mut result: Vec<Complaint> = Vec::with_capacity(rows.len());
    for row in rows {
        let thread: Vec<Reply> = load_replies(conn, row.complaint_id)?;
        result.push(row.into_complaint(thread)?);
    }
    Ok(result)
}

/// Retrieves a complaint by ID, including its reply thread.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
/// Returns `Ok(None)` if no such complaint exists.
pub fn get_complaint(
    conn: &mut SqliteConnection,
    complaint_id: i64,
) -> Result<Option<Complaint>, PersistenceError> {
    let row: Option<ComplaintRow> = complaints::table
        .filter(complaints::complaint_id.eq(complaint_id))
        .select(ComplaintRow::as_select())
        .first(conn)
        .optional()?;

    match row {
        Some(row) => {
            let thread: Vec<Reply> = load_replies(conn, complaint_id)?;
            Ok(Some(row.into_complaint(thread)?))
        }
        None => Ok(None),
    }
}

/// Lists every complaint, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Complaint>, PersistenceError> {
    let rows: Vec<ComplaintRow> = complaints::table
        .order(complaints::created_at_ms.desc())
        .select(ComplaintRow::as_select())
        .load(conn)?;

    assemble(conn, rows)
}

/// Lists the complaints filed by a student, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<Complaint>, PersistenceError> {
    let rows: Vec<ComplaintRow> = complaints::table
        .filter(complaints::student_id.eq(student_id))
        .order(complaints::created_at_ms.desc())
        .select(ComplaintRow::as_select())
        .load(conn)?;

    assemble(conn, rows)
}

/// Lists the complaints visible to a professor, newest first.
///
/// A professor sees complaints assigned to them plus complaints whose
/// course matches their department.
///
/// # Errors
///
/// Returns an error if the query fails or a stored record is corrupt.
pub fn list_for_professor(
    conn: &mut SqliteConnection,
    professor_id: i64,
    department: Option<&str>,
) -> Result<Vec<Complaint>, PersistenceError> {
    let rows: Vec<ComplaintRow> = match department {
        Some(dept) => complaints::table
            .filter(
                complaints::assigned_professor_id
                    .eq(professor_id)
                    .or(complaints::course.eq(dept.to_owned())),
            )
            .order(complaints::created_at_ms.desc())
            .select(ComplaintRow::as_select())
            .load(conn)?,
        None => complaints::table
            .filter(complaints::assigned_professor_id.eq(professor_id))
            .order(complaints::created_at_ms.desc())
            .select(ComplaintRow::as_select())
            .load(conn)?,
    };

    assemble(conn, rows)
}

/// Counts the complaints a student filed inside a time window.
///
/// Both bounds are inclusive epoch milliseconds; this is the weekly
/// quota count.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_for_student_between(
    conn: &mut SqliteConnection,
    student_id: i64,
    start_ms: i64,
    end_ms: i64,
) -> Result<i64, PersistenceError> {
    let count: i64 = complaints::table
        .filter(complaints::student_id.eq(student_id))
        .filter(complaints::created_at_ms.ge(start_ms))
        .filter(complaints::created_at_ms.le(end_ms))
        .count()
        .get_result(conn)?;

    Ok(count)
}
