// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_desk_domain::User;
use campus_desk_notify::MemorySink;
use campus_desk_persistence::SqlitePersistence;

use crate::handlers;
use crate::request_response::{
    ComplaintInfo, CreateComplaintRequest, RegisterProfessorRequest, RegisterStudentRequest,
};

pub fn new_db() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database should initialize")
}

/// Seeds an admin directly; there is no admin registration endpoint.
pub fn seed_admin(db: &mut SqlitePersistence) -> User {
    let admin: User = User::new_admin(
        String::from("Dana Admin"),
        String::from("dana@campus.edu"),
    );
    let user_id: i64 = db
        .create_user(&admin, "admin-pass-1")
        .expect("admin should be created");
    db.get_user_by_id(user_id)
        .expect("query should succeed")
        .expect("admin should exist")
}

/// Registers a student through the API and approves them.
pub fn approved_student(
    db: &mut SqlitePersistence,
    admin: &User,
    email: &str,
    course: &str,
) -> User {
    let sink: MemorySink = MemorySink::new();
    let registered = handlers::register_student(
        db,
        RegisterStudentRequest {
            name: String::from("Sam Student"),
            email: email.to_owned(),
            password: String::from("hunter2!"),
            college_id: String::from("C-1001"),
            course: course.to_owned(),
        },
    )
    .expect("registration should succeed");
    handlers::approve_user(db, admin, registered.user_id, &sink)
        .expect("approval should succeed");
    db.get_user_by_id(registered.user_id)
        .expect("query should succeed")
        .expect("student should exist")
}

/// Registers a professor through the API and approves them.
pub fn approved_professor(
    db: &mut SqlitePersistence,
    admin: &User,
    email: &str,
    department: &str,
) -> User {
    let sink: MemorySink = MemorySink::new();
    let registered = handlers::register_professor(
        db,
        RegisterProfessorRequest {
            name: String::from("Pat Professor"),
            email: email.to_owned(),
            password: String::from("lecture4ever"),
            professor_id: String::from("P-77"),
            department: department.to_owned(),
        },
    )
    .expect("registration should succeed");
    handlers::approve_user(db, admin, registered.user_id, &sink)
        .expect("approval should succeed");
    db.get_user_by_id(registered.user_id)
        .expect("query should succeed")
        .expect("professor should exist")
}

/// Files a complaint as the given student through the API.
pub fn file_complaint(
    db: &mut SqlitePersistence,
    student: &User,
    topic: &str,
    course: &str,
) -> ComplaintInfo {
    let sink: MemorySink = MemorySink::new();
    handlers::create_complaint(
        db,
        student,
        CreateComplaintRequest {
            topic: topic.to_owned(),
            description: String::from("The projector in room 204 has been broken for a week."),
            course: course.to_owned(),
            department: None,
            attachments: Vec::new(),
            student_id: None,
        },
        &sink,
    )
    .expect("complaint creation should succeed")
    .complaint
}
