//! Student resource handlers.

use crate::error::{ApiError, Result};
use crate::extract::{Path, Query, State, ValidatedJson};
use crate::model::{Student, StudentKey, StudentPatch};
use crate::response::Reply;
use crate::router::{get, Router};
use crate::store::AppState;
use crate::validate::validate_student_id;
use serde::Deserialize;

pub fn routes() -> Router {
    Router::new()
        .route(
            "/students",
            get(list_students)
                .post(create_student)
                .put(update_student)
                .delete(delete_student),
        )
        .route("/students/{studentId}", get(get_student))
}

#[derive(Debug, Deserialize)]
struct ListFilter {
    program: Option<String>,
}

/// GET /students — all students, or only those in the given program.
/// The filter is an exact string match; unknown values yield an empty list.
async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<ListFilter>,
) -> Reply<Vec<Student>> {
    Reply::ok(state.students.list(filter.program.as_deref()))
}

/// GET /students/{studentId}
async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Reply<Student>> {
    validate_student_id(&student_id)?;

    let student = state
        .students
        .get(&student_id)
        .ok_or_else(|| ApiError::not_found("Student does not exists"))?;

    Ok(Reply::ok(student)
        .message("Here is your student")
        .link(format!("/students/{student_id}")))
}

/// POST /students
async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Student>,
) -> Result<Reply<Student>> {
    let student = state
        .students
        .insert(body)
        .map_err(|_| ApiError::conflict("Student is already exists"))?;

    let link = format!("/students/{}", student.student_id);
    Ok(Reply::created(student).link(link))
}

/// PUT /students — shallow-merge the patch over the stored record.
async fn update_student(
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<StudentPatch>,
) -> Result<Reply<Student>> {
    let student = state
        .students
        .update(&patch)
        .ok_or_else(|| ApiError::not_found("Student does not exists"))?;

    Ok(Reply::ok(student)
        .message(format!(
            "Student {} has been updated successfully",
            patch.student_id
        ))
        .link(format!("/students/{}", patch.student_id)))
}

/// DELETE /students — body carries the key; confirmation only, no payload.
async fn delete_student(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<StudentKey>,
) -> Result<Reply<()>> {
    state
        .students
        .remove(&key.student_id)
        .ok_or_else(|| ApiError::not_found("Student does not exists"))?;

    Ok(Reply::text(format!(
        "Student {} has been deleted successfully",
        key.student_id
    )))
}
