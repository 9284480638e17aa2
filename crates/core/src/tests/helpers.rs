// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ActorContext, CreateComplaintIntent};
use campus_desk_domain::{Complaint, ComplaintStatus, Role, StudentIdentity};
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn test_now() -> OffsetDateTime {
    datetime!(2026-08-26 10:30:00 UTC)
}

pub fn student_actor() -> ActorContext {
    ActorContext::new(
        10,
        String::from("Sam Student"),
        String::from("sam@campus.edu"),
        Role::Student,
        None,
        Some(String::from("Computer Science")),
    )
}

pub fn professor_actor() -> ActorContext {
    ActorContext::new(
        20,
        String::from("Pat Professor"),
        String::from("pat@campus.edu"),
        Role::Professor,
        Some(String::from("Computer Science")),
        None,
    )
}

pub fn admin_actor() -> ActorContext {
    ActorContext::new(
        1,
        String::from("Alex Admin"),
        String::from("admin@campus.edu"),
        Role::Admin,
        None,
        None,
    )
}

pub fn basic_intent() -> CreateComplaintIntent {
    CreateComplaintIntent {
        topic: String::from("Broken projector in CS-101"),
        description: String::from("The projector has been out for a week."),
        course: String::from("Computer Science"),
        department: None,
        attachments: Vec::new(),
        on_behalf_of: None,
    }
}

pub fn basic_complaint() -> Complaint {
    Complaint {
        complaint_id: Some(100),
        student: StudentIdentity::new(
            10,
            String::from("Sam Student"),
            String::from("sam@campus.edu"),
        ),
        topic: String::from("Broken projector in CS-101"),
        description: String::from("The projector has been out for a week."),
        course: String::from("Computer Science"),
        department: String::from("Computer Science"),
        status: ComplaintStatus::Submitted,
        assigned_professor_id: None,
        assigned_professor_name: None,
        assigned_admin_id: None,
        assigned_admin_name: None,
        solved_by_professor_id: None,
        solved_by_professor_name: None,
        replies: Vec::new(),
        attachments: Vec::new(),
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn meeting_request_complaint() -> Complaint {
    let mut complaint: Complaint = basic_complaint();
    complaint.topic = String::from("[MEETING REQUEST] Discuss grade appeal");
    complaint
}
