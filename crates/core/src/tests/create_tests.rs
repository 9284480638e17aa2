// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{admin_actor, basic_intent, professor_actor, student_actor, test_now};
use crate::{CoreError, CreateComplaintIntent, CreationResult, ProfessorRef, create_complaint};
use campus_desk_domain::{
    ComplaintStatus, DomainError, StudentIdentity, UNKNOWN_DEPARTMENT, WEEKLY_COMPLAINT_LIMIT,
};
use campus_desk_notify::{EventKind, Recipient};

#[test]
fn test_student_creates_complaint_for_themselves() {
    let result: Result<CreationResult, CoreError> =
        create_complaint(&student_actor(), basic_intent(), 0, None, test_now());

    let creation: CreationResult = result.unwrap();
    assert_eq!(creation.complaint.complaint_id, None);
    assert_eq!(creation.complaint.student.id, 10);
    assert_eq!(creation.complaint.student.name, "Sam Student");
    assert_eq!(creation.complaint.student.email, "sam@campus.edu");
    assert_eq!(creation.complaint.status, ComplaintStatus::Submitted);
    assert_eq!(creation.complaint.created_at, test_now());
    assert_eq!(creation.complaint.updated_at, test_now());
}

#[test]
fn test_student_on_behalf_of_payload_is_ignored() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.on_behalf_of = Some(StudentIdentity::new(
        99,
        String::from("Somebody Else"),
        String::from("else@campus.edu"),
    ));

    let creation: CreationResult =
        create_complaint(&student_actor(), intent, 0, None, test_now()).unwrap();
    assert_eq!(creation.complaint.student.id, 10);
}

#[test]
fn test_professor_cannot_create_complaint() {
    let result: Result<CreationResult, CoreError> =
        create_complaint(&professor_actor(), basic_intent(), 0, None, test_now());

    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_quota_blocks_at_limit() {
    let result: Result<CreationResult, CoreError> = create_complaint(
        &student_actor(),
        basic_intent(),
        WEEKLY_COMPLAINT_LIMIT,
        None,
        test_now(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::QuotaExceeded {
            count: WEEKLY_COMPLAINT_LIMIT,
            limit: WEEKLY_COMPLAINT_LIMIT,
        }
    );
}

#[test]
fn test_quota_allows_one_below_limit() {
    let result: Result<CreationResult, CoreError> = create_complaint(
        &student_actor(),
        basic_intent(),
        WEEKLY_COMPLAINT_LIMIT - 1,
        None,
        test_now(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_admin_bypasses_quota() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.on_behalf_of = Some(StudentIdentity::new(
        10,
        String::from("Sam Student"),
        String::from("sam@campus.edu"),
    ));

    let result: Result<CreationResult, CoreError> = create_complaint(
        &admin_actor(),
        intent,
        WEEKLY_COMPLAINT_LIMIT + 5,
        None,
        test_now(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_admin_must_name_a_student() {
    let result: Result<CreationResult, CoreError> =
        create_complaint(&admin_actor(), basic_intent(), 0, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::InvalidArgument { field: "student", .. })
    ));
}

#[test]
fn test_admin_on_behalf_of_requires_valid_email() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.on_behalf_of = Some(StudentIdentity::new(
        10,
        String::from("Sam Student"),
        String::from("not-an-email"),
    ));

    let result: Result<CreationResult, CoreError> =
        create_complaint(&admin_actor(), intent, 0, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidEmail(_)))
    ));
}

#[test]
fn test_empty_topic_is_rejected() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.topic = String::from("   ");

    let result: Result<CreationResult, CoreError> =
        create_complaint(&student_actor(), intent, 0, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptyField {
            field: "topic"
        }))
    ));
}

#[test]
fn test_department_falls_back_to_course() {
    let creation: CreationResult =
        create_complaint(&student_actor(), basic_intent(), 0, None, test_now()).unwrap();
    assert_eq!(creation.complaint.department, "Computer Science");
}

#[test]
fn test_explicit_department_wins() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.department = Some(String::from("Engineering"));

    let creation: CreationResult =
        create_complaint(&student_actor(), intent, 0, None, test_now()).unwrap();
    assert_eq!(creation.complaint.department, "Engineering");
}

#[test]
fn test_blank_department_falls_back_to_course() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.department = Some(String::from("  "));
    intent.course = String::from("General");

    let creation: CreationResult =
        create_complaint(&student_actor(), intent, 0, None, test_now()).unwrap();
    assert_eq!(creation.complaint.department, "General");
    assert_ne!(creation.complaint.department, UNKNOWN_DEPARTMENT);
}

#[test]
fn test_auto_assignment_sets_professor_and_keeps_submitted() {
    let candidate: ProfessorRef = ProfessorRef::new(20, String::from("Pat Professor"));
    let creation: CreationResult = create_complaint(
        &student_actor(),
        basic_intent(),
        0,
        Some(candidate),
        test_now(),
    )
    .unwrap();

    assert_eq!(creation.complaint.assigned_professor_id, Some(20));
    assert_eq!(
        creation.complaint.assigned_professor_name.as_deref(),
        Some("Pat Professor")
    );
    assert_eq!(creation.complaint.status, ComplaintStatus::Submitted);
}

#[test]
fn test_auto_assignment_notifies_the_assignee() {
    let candidate: ProfessorRef = ProfessorRef::new(20, String::from("Pat Professor"));
    let creation: CreationResult = create_complaint(
        &student_actor(),
        basic_intent(),
        0,
        Some(candidate),
        test_now(),
    )
    .unwrap();

    let assigned = creation
        .notifications
        .iter()
        .find(|n| n.kind == EventKind::ComplaintCreatedAssigned)
        .unwrap();
    assert_eq!(assigned.recipients, vec![Recipient::User { user_id: 20 }]);

    // The department broadcast excludes the assignee.
    let broadcast = creation
        .notifications
        .iter()
        .find_map(|n| {
            n.recipients.iter().find(|r| {
                matches!(r, Recipient::DepartmentProfessors { .. })
            })
        })
        .unwrap();
    assert_eq!(
        broadcast,
        &Recipient::DepartmentProfessors {
            department: String::from("Computer Science"),
            exclude: Some(20),
        }
    );
}

#[test]
fn test_explicit_department_keys_the_broadcast() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.department = Some(String::from("Engineering"));

    let creation: CreationResult =
        create_complaint(&student_actor(), intent, 0, None, test_now()).unwrap();

    // The broadcast follows the resolved department, not the course.
    let broadcast = creation
        .notifications
        .iter()
        .find_map(|n| {
            n.recipients.iter().find(|r| {
                matches!(r, Recipient::DepartmentProfessors { .. })
            })
        })
        .unwrap();
    assert_eq!(
        broadcast,
        &Recipient::DepartmentProfessors {
            department: String::from("Engineering"),
            exclude: None,
        }
    );
}

#[test]
fn test_creation_always_notifies_admins() {
    let creation: CreationResult =
        create_complaint(&student_actor(), basic_intent(), 0, None, test_now()).unwrap();

    assert!(
        creation
            .notifications
            .iter()
            .any(|n| n.recipients.contains(&Recipient::AllApprovedAdmins))
    );
}

#[test]
fn test_meeting_request_is_never_auto_assigned() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.topic = String::from("[MEETING REQUEST] Discuss grade appeal");
    let candidate: ProfessorRef = ProfessorRef::new(20, String::from("Pat Professor"));

    let creation: CreationResult = create_complaint(
        &student_actor(),
        intent,
        0,
        Some(candidate),
        test_now(),
    )
    .unwrap();

    assert!(creation.complaint.is_meeting_request());
    assert_eq!(creation.complaint.assigned_professor_id, None);
    assert!(
        !creation
            .notifications
            .iter()
            .any(|n| n.kind == EventKind::ComplaintCreatedAssigned)
    );
}

#[test]
fn test_admin_filing_meeting_request_claims_it() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.topic = String::from("[MEETING REQUEST] Discuss grade appeal");
    intent.on_behalf_of = Some(StudentIdentity::new(
        10,
        String::from("Sam Student"),
        String::from("sam@campus.edu"),
    ));

    let creation: CreationResult =
        create_complaint(&admin_actor(), intent, 0, None, test_now()).unwrap();

    assert_eq!(creation.complaint.assigned_admin_id, Some(1));
    assert_eq!(
        creation.complaint.assigned_admin_name.as_deref(),
        Some("Alex Admin")
    );
}

#[test]
fn test_marker_without_trailing_space_is_not_a_meeting_request() {
    let mut intent: CreateComplaintIntent = basic_intent();
    intent.topic = String::from("[MEETING REQUEST]about grades");

    let creation: CreationResult =
        create_complaint(&student_actor(), intent, 0, None, test_now()).unwrap();
    assert!(!creation.complaint.is_meeting_request());
}
