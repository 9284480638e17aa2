// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

use crate::{Complaint, ComplaintStatus, StudentIdentity, professor_can_access};

fn sample_complaint(course: &str, assigned_professor_id: Option<i64>) -> Complaint {
    let now: OffsetDateTime = OffsetDateTime::UNIX_EPOCH;
    Complaint {
        complaint_id: Some(1),
        student: StudentIdentity::new(10, String::from("Ada"), String::from("ada@example.edu")),
        topic: String::from("Lab access"),
        description: String::from("Card reader rejects my ID"),
        course: course.to_owned(),
        department: course.to_owned(),
        status: ComplaintStatus::Submitted,
        assigned_professor_id,
        assigned_professor_name: assigned_professor_id.map(|_| String::from("Prof")),
        assigned_admin_id: None,
        assigned_admin_name: None,
        solved_by_professor_id: None,
        solved_by_professor_name: None,
        replies: Vec::new(),
        attachments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_assigned_professor_has_access_regardless_of_department() {
    let complaint = sample_complaint("CS", Some(42));
    assert!(professor_can_access(42, Some("History"), &complaint));
    assert!(professor_can_access(42, None, &complaint));
}

#[test]
fn test_department_match_grants_access_without_assignment() {
    let complaint = sample_complaint("CS", Some(42));
    assert!(professor_can_access(7, Some("CS"), &complaint));
}

#[test]
fn test_department_matches_course_not_department_field() {
    let mut complaint = sample_complaint("CS", None);
    complaint.department = String::from("Engineering");
    // The predicate compares against the course field.
    assert!(professor_can_access(7, Some("CS"), &complaint));
    assert!(!professor_can_access(7, Some("Engineering"), &complaint));
}

#[test]
fn test_unrelated_professor_has_no_access() {
    let complaint = sample_complaint("CS", Some(42));
    assert!(!professor_can_access(7, Some("History"), &complaint));
    assert!(!professor_can_access(7, None, &complaint));
}
