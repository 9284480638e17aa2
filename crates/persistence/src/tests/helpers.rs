// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::SqlitePersistence;
use campus_desk_domain::{Complaint, ComplaintStatus, StudentIdentity, User};
use time::OffsetDateTime;
use time::macros::datetime;

pub const fn test_now() -> OffsetDateTime {
    datetime!(2026-08-26 10:30:00.500 UTC)
}

pub fn new_db() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

pub fn seed_student(db: &mut SqlitePersistence) -> i64 {
    let user: User = User::new_student(
        String::from("Sam Student"),
        String::from("sam@campus.edu"),
        String::from("C-1001"),
        String::from("Computer Science"),
    );
    db.create_user(&user, "hunter2!").expect("create student")
}

pub fn seed_professor(db: &mut SqlitePersistence, email: &str, department: &str) -> i64 {
    let user: User = User::new_professor(
        String::from("Pat Professor"),
        email.to_owned(),
        String::from("P-2001"),
        department.to_owned(),
    );
    db.create_user(&user, "hunter2!").expect("create professor")
}

pub fn complaint_for(student_id: i64, created_at: OffsetDateTime) -> Complaint {
    Complaint {
        complaint_id: None,
        student: StudentIdentity::new(
            student_id,
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
        attachments: vec![String::from("photo.jpg")],
        created_at,
        updated_at: created_at,
    }
}
