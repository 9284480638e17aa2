// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Campus Desk complaint portal.
//!
//! This crate stores users, complaints, reply threads, and sessions in
//! `SQLite` via Diesel, with embedded migrations. Complaint and reply
//! timestamps are stored as epoch milliseconds so range filters (the
//! weekly quota window) compare numerically rather than
//! lexicographically; user and session timestamps are RFC 3339 text.
//!
//! Mutations are targeted: each lifecycle operation writes only the
//! columns it owns, and reply appends are row inserts, so concurrent
//! operations on the same complaint never overwrite each other's
//! fields.
//!
//! ## Testing
//!
//! Standard tests run against unique in-memory databases. Each call to
//! `new_in_memory()` receives a sequential database name from an atomic
//! counter, so tests are isolated without time-based collisions.

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
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use time::OffsetDateTime;

use campus_desk::{AdminClaim, SolvedBy};
use campus_desk_domain::{AccountStatus, Complaint, ComplaintStatus, Role, User};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::SessionData;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the complaint portal.
pub struct SqlitePersistence {
    pub(crate) conn: SqliteConnection,
}

impl SqlitePersistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic
    /// counter, ensuring deterministic test isolation without
    /// time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or
    /// initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a new user with the given plain-text password.
    ///
    /// # Returns
    ///
    /// The canonical ID assigned to the new user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmailAlreadyRegistered` if the email
    /// is taken, or another error if the insert fails.
    pub fn create_user(&mut self, user: &User, password: &str) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user, password)
    }

    /// Retrieves a user by canonical ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the record is corrupt.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Retrieves a user by email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the record is corrupt.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the record is corrupt.
    pub fn get_credentials_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<(User, String)>, PersistenceError> {
        queries::users::get_credentials_by_email(&mut self.conn, email)
    }

    /// Lists all users, in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Lists users awaiting approval, in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_pending_users(&mut self) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_pending_users(&mut self.conn)
    }

    /// Lists approved users of a role, in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_approved_by_role(&mut self, role: Role) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_approved_by_role(&mut self.conn, role)
    }

    /// Sets the approval status of a user account.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UserNotFound` if no such user exists.
    pub fn set_user_status(
        &mut self,
        user_id: i64,
        status: AccountStatus,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_user_status(&mut self.conn, user_id, status)
    }

    /// Finds the auto-assignment candidate for a new complaint.
    ///
    /// The first approved professor, in ascending ID order, whose
    /// department or recorded course matches the given course.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_auto_assign_candidate(
        &mut self,
        course: &str,
    ) -> Result<Option<(i64, String)>, PersistenceError> {
        queries::users::find_auto_assign_candidate(&mut self.conn, course)
    }

    // ========================================================================
    // Complaints
    // ========================================================================

    /// Inserts a newly created complaint.
    ///
    /// # Returns
    ///
    /// The canonical ID assigned to the new complaint.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_complaint(&mut self, complaint: &Complaint) -> Result<i64, PersistenceError> {
        mutations::complaints::insert_complaint(&mut self.conn, complaint)
    }

    /// Retrieves a complaint by ID, including its reply thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn get_complaint(
        &mut self,
        complaint_id: i64,
    ) -> Result<Option<Complaint>, PersistenceError> {
        queries::complaints::get_complaint(&mut self.conn, complaint_id)
    }

    /// Lists every complaint, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_complaints(&mut self) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_all(&mut self.conn)
    }

    /// Lists the complaints filed by a student, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_complaints_for_student(
        &mut self,
        student_id: i64,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_for_student(&mut self.conn, student_id)
    }

    /// Lists the complaints visible to a professor, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a record is corrupt.
    pub fn list_complaints_for_professor(
        &mut self,
        professor_id: i64,
        department: Option<&str>,
    ) -> Result<Vec<Complaint>, PersistenceError> {
        queries::complaints::list_for_professor(&mut self.conn, professor_id, department)
    }

    /// Counts the complaints a student filed inside a time window.
    ///
    /// Both bounds are inclusive epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_complaints_for_student_between(
        &mut self,
        student_id: i64,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<i64, PersistenceError> {
        queries::complaints::count_for_student_between(&mut self.conn, student_id, start_ms, end_ms)
    }

    /// Appends a reply, bumping `updated_at` and applying any admin
    /// claim in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if no such
    /// complaint exists.
    pub fn append_reply(
        &mut self,
        complaint_id: i64,
        reply: &campus_desk_domain::Reply,
        admin_claim: Option<&AdminClaim>,
    ) -> Result<(), PersistenceError> {
        mutations::complaints::append_reply(&mut self.conn, complaint_id, reply, admin_claim)
    }

    /// Updates the status of a complaint.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if no such
    /// complaint exists.
    pub fn update_complaint_status(
        &mut self,
        complaint_id: i64,
        status: ComplaintStatus,
        solved_by: Option<&SolvedBy>,
        updated_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        let updated_at_ms: i64 = data_models::to_epoch_millis(updated_at)?;
        mutations::complaints::update_status(
            &mut self.conn,
            complaint_id,
            status,
            solved_by,
            updated_at_ms,
        )
    }

    /// Assigns a complaint to a professor, forcing the status to
    /// `pending`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ComplaintNotFound` if no such
    /// complaint exists.
    pub fn assign_complaint(
        &mut self,
        complaint_id: i64,
        professor_id: i64,
        professor_name: &str,
        updated_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        let updated_at_ms: i64 = data_models::to_epoch_millis(updated_at)?;
        mutations::complaints::assign_professor(
            &mut self.conn,
            complaint_id,
            professor_id,
            professor_name,
            updated_at_ms,
        )
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a new session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        user_id: i64,
        token: &str,
        created_at: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(&mut self.conn, user_id, token, created_at, expires_at)
    }

    /// Retrieves a session by its bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, token)
    }

    /// Deletes a session by token, returning whether one was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, token: &str) -> Result<bool, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, token)
    }
}

/// Parses a stored RFC 3339 session timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` if the text does not
/// parse.
pub fn parse_session_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    data_models::parse_timestamp(text)
}

/// Formats a session timestamp as RFC 3339 for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_session_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    data_models::format_timestamp(ts)
}
