// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_desk_domain::{User, WEEKLY_COMPLAINT_LIMIT};
use campus_desk_notify::MemorySink;
use campus_desk_persistence::SqlitePersistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::CreateComplaintRequest;
use crate::tests::helpers::{approved_student, file_complaint, new_db, seed_admin};

fn fill_quota(db: &mut SqlitePersistence, student: &User) {
    for n in 0..WEEKLY_COMPLAINT_LIMIT {
        file_complaint(db, student, &format!("Complaint {n}"), "CS101");
    }
}

#[test]
fn test_student_is_stopped_at_the_weekly_limit() {
    let mut db: SqlitePersistence = new_db();
    let admin: User = seed_admin(&mut db);
    let student: User = approved_student(&mut db, &admin, "sam@campus.edu", "CS101");
    fill_quota(&mut db, &student);
    let sink: MemorySink = MemorySink::new();

    let result = handlers::create_complaint(
        &mut db,
        &student,
        CreateComplaintRequest {
            topic: String::from("One too many"),
            description: String::from("This one should not go through."),
            course: String::from("CS101"),
            department: None,
            attachments: Vec::new(),
            student_id: None,
        },
        &sink,
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::QuotaExceeded {
            count: WEEKLY_COMPLAINT_LIMIT,
            limit: WEEKLY_COMPLAINT_LIMIT,
        }
    );
    assert!(sink.delivered().is_empty());
}

#[test]
fn test_admin_filing_bypasses_the_quota() {
    let mut db: SqlitePersistence = new_db();
    let admin: User = seed_admin(&mut db);
    let student: User = approved_student(&mut db, &admin, "sam@campus.edu", "CS101");
    fill_quota(&mut db, &student);
    let sink: MemorySink = MemorySink::new();

    let result = handlers::create_complaint(
        &mut db,
        &admin,
        CreateComplaintRequest {
            topic: String::from("Filed at the front desk"),
            description: String::from("Raised in person during office hours."),
            course: String::from("CS101"),
            department: None,
            attachments: Vec::new(),
            student_id: student.user_id,
        },
        &sink,
    );
    assert!(result.is_ok());
}

#[test]
fn test_weekly_count_is_visible_to_self_and_admin() {
    let mut db: SqlitePersistence = new_db();
    let admin: User = seed_admin(&mut db);
    let student: User = approved_student(&mut db, &admin, "sam@campus.edu", "CS101");
    let other: User = approved_student(&mut db, &admin, "other@campus.edu", "EE200");
    file_complaint(&mut db, &student, "Broken projector", "CS101");
    file_complaint(&mut db, &student, "Lab access denied", "CS101");
    let student_id: i64 = student.user_id.unwrap();

    let own = handlers::get_weekly_count(&mut db, &student, student_id)
        .expect("self lookup should succeed");
    assert_eq!(own.count, 2);
    assert_eq!(own.limit, WEEKLY_COMPLAINT_LIMIT);

    let admins = handlers::get_weekly_count(&mut db, &admin, student_id)
        .expect("admin lookup should succeed");
    assert_eq!(admins.count, 2);

    assert!(matches!(
        handlers::get_weekly_count(&mut db, &other, student_id).unwrap_err(),
        ApiError::Forbidden { .. }
    ));
}

#[test]
fn test_quota_status_is_admin_only() {
    let mut db: SqlitePersistence = new_db();
    let admin: User = seed_admin(&mut db);
    let student: User = approved_student(&mut db, &admin, "sam@campus.edu", "CS101");
    let student_id: i64 = student.user_id.unwrap();
    file_complaint(&mut db, &student, "Broken projector", "CS101");

    assert!(matches!(
        handlers::get_quota_status(&mut db, &student, student_id).unwrap_err(),
        ApiError::Forbidden { .. }
    ));

    let status = handlers::get_quota_status(&mut db, &admin, student_id)
        .expect("admin lookup should succeed");
    assert!(!status.exceeded);
    assert_eq!(status.count, 1);

    for n in 1..WEEKLY_COMPLAINT_LIMIT {
        file_complaint(&mut db, &student, &format!("Complaint {n}"), "CS101");
    }
    let status = handlers::get_quota_status(&mut db, &admin, student_id)
        .expect("admin lookup should succeed");
    assert!(status.exceeded);
    assert_eq!(status.count, WEEKLY_COMPLAINT_LIMIT);
}

#[test]
fn test_quota_lookups_for_unknown_students_are_not_found() {
    let mut db: SqlitePersistence = new_db();
    let admin: User = seed_admin(&mut db);

    assert!(matches!(
        handlers::get_weekly_count(&mut db, &admin, 9999).unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        handlers::get_quota_status(&mut db, &admin, 9999).unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}
