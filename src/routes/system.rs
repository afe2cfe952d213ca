//! Health and identity endpoints mounted outside the API prefix.

use crate::model::{Program, Student};
use crate::response::Reply;

/// GET /
pub async fn health() -> Reply<()> {
    Reply::text("Enrollment API is running")
}

/// GET /me — static identity payload of the service owner.
pub async fn me() -> Reply<Student> {
    Reply::ok(Student {
        student_id: "670612123".to_string(),
        first_name: "Tirapat".to_string(),
        last_name: "Ruangkling".to_string(),
        program: Program::Cpe,
        section: Some("801".to_string()),
        courses: None,
    })
    .message("Student Information")
}
