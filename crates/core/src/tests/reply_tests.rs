// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    admin_actor, basic_complaint, meeting_request_complaint, professor_actor, student_actor,
    test_now,
};
use crate::{ActorContext, CoreError, ReplyOutcome, add_reply};
use campus_desk_domain::{Complaint, DomainError, Role};
use campus_desk_notify::Recipient;

#[test]
fn test_student_replies_to_own_complaint() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome = add_reply(
        &student_actor(),
        &complaint,
        "Any update on this?",
        test_now(),
    )
    .unwrap();

    assert_eq!(outcome.reply.author_id, 10);
    assert_eq!(outcome.reply.author_role, Role::Student);
    assert_eq!(outcome.reply.message, "Any update on this?");
    assert_eq!(outcome.reply.created_at, test_now());
    assert!(outcome.admin_claim.is_none());
}

#[test]
fn test_reply_message_is_trimmed() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome =
        add_reply(&student_actor(), &complaint, "  trimmed  ", test_now()).unwrap();

    assert_eq!(outcome.reply.message, "trimmed");
}

#[test]
fn test_blank_reply_is_rejected() {
    let complaint: Complaint = basic_complaint();
    let result: Result<ReplyOutcome, CoreError> =
        add_reply(&student_actor(), &complaint, "   ", test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptyField {
            field: "message"
        }))
    ));
}

#[test]
fn test_other_student_cannot_reply() {
    let complaint: Complaint = basic_complaint();
    let other: ActorContext = ActorContext::new(
        11,
        String::from("Other Student"),
        String::from("other@campus.edu"),
        Role::Student,
        None,
        Some(String::from("Computer Science")),
    );

    let result: Result<ReplyOutcome, CoreError> =
        add_reply(&other, &complaint, "let me in", test_now());
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_department_professor_can_reply_without_assignment() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome = add_reply(
        &professor_actor(),
        &complaint,
        "Looking into it.",
        test_now(),
    )
    .unwrap();

    assert_eq!(outcome.reply.author_role, Role::Professor);
}

#[test]
fn test_unrelated_professor_cannot_reply() {
    let complaint: Complaint = basic_complaint();
    let outsider: ActorContext = ActorContext::new(
        21,
        String::from("Other Professor"),
        String::from("other.prof@campus.edu"),
        Role::Professor,
        Some(String::from("History")),
        None,
    );

    let result: Result<ReplyOutcome, CoreError> =
        add_reply(&outsider, &complaint, "hello", test_now());
    assert!(matches!(result, Err(CoreError::Forbidden { .. })));
}

#[test]
fn test_assigned_professor_outside_department_can_reply() {
    let mut complaint: Complaint = basic_complaint();
    complaint.assigned_professor_id = Some(21);
    complaint.assigned_professor_name = Some(String::from("Other Professor"));
    let assignee: ActorContext = ActorContext::new(
        21,
        String::from("Other Professor"),
        String::from("other.prof@campus.edu"),
        Role::Professor,
        Some(String::from("History")),
        None,
    );

    let result: Result<ReplyOutcome, CoreError> =
        add_reply(&assignee, &complaint, "On it.", test_now());
    assert!(result.is_ok());
}

#[test]
fn test_admin_reply_claims_unassigned_meeting_request() {
    let complaint: Complaint = meeting_request_complaint();
    let outcome: ReplyOutcome = add_reply(
        &admin_actor(),
        &complaint,
        "I can meet Thursday.",
        test_now(),
    )
    .unwrap();

    let claim = outcome.admin_claim.unwrap();
    assert_eq!(claim.admin_id, 1);
    assert_eq!(claim.admin_name, "Alex Admin");
}

#[test]
fn test_admin_reply_does_not_reclaim_meeting_request() {
    let mut complaint: Complaint = meeting_request_complaint();
    complaint.assigned_admin_id = Some(2);
    complaint.assigned_admin_name = Some(String::from("Another Admin"));

    let outcome: ReplyOutcome =
        add_reply(&admin_actor(), &complaint, "Adding a note.", test_now()).unwrap();
    assert!(outcome.admin_claim.is_none());
}

#[test]
fn test_admin_reply_to_regular_complaint_claims_nothing() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome =
        add_reply(&admin_actor(), &complaint, "Noted.", test_now()).unwrap();
    assert!(outcome.admin_claim.is_none());
}

#[test]
fn test_professor_reply_notifies_student_not_author() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome = add_reply(
        &professor_actor(),
        &complaint,
        "Looking into it.",
        test_now(),
    )
    .unwrap();

    let notification = &outcome.notifications[0];
    assert!(notification.recipients.contains(&Recipient::Student {
        user_id: 10,
        email: String::from("sam@campus.edu"),
    }));
    assert!(
        notification
            .recipients
            .contains(&Recipient::DepartmentProfessors {
                department: String::from("Computer Science"),
                exclude: Some(20),
            })
    );
    assert!(notification.recipients.contains(&Recipient::AllApprovedAdmins));
}

#[test]
fn test_student_reply_does_not_notify_themselves() {
    let complaint: Complaint = basic_complaint();
    let outcome: ReplyOutcome =
        add_reply(&student_actor(), &complaint, "Bumping this.", test_now()).unwrap();

    let notification = &outcome.notifications[0];
    assert!(
        !notification
            .recipients
            .iter()
            .any(|r| matches!(r, Recipient::Student { user_id: 10, .. }))
    );
}

#[test]
fn test_meeting_request_reply_goes_to_admins() {
    let complaint: Complaint = meeting_request_complaint();
    let outcome: ReplyOutcome = add_reply(
        &student_actor(),
        &complaint,
        "Is Thursday still on?",
        test_now(),
    )
    .unwrap();

    let notification = &outcome.notifications[0];
    assert!(notification.recipients.contains(&Recipient::AllApprovedAdmins));
    assert!(
        !notification
            .recipients
            .iter()
            .any(|r| matches!(r, Recipient::DepartmentProfessors { .. }))
    );
}
