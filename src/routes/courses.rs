//! Course resource handlers, including the enrolled-courses lookup.

use crate::error::{ApiError, Result};
use crate::extract::{Path, State, ValidatedJson};
use crate::model::{Course, CourseKey, CoursePatch, EnrolledCourse, Enrollment};
use crate::response::Reply;
use crate::router::{get, post, Router};
use crate::store::AppState;
use crate::validate::validate_student_id;

pub fn routes() -> Router {
    Router::new()
        .route("/students/{studentId}/courses", get(enrolled_courses))
        .route(
            "/courses",
            post(create_course).put(update_course).delete(delete_course),
        )
        .route("/courses/{courseId}", get(get_course))
}

/// GET /students/{studentId}/courses — the student's enrollments as
/// `{courseId, courseTitle}` pairs, in the student's own ordering. Ids
/// with no matching course are dropped without error.
async fn enrolled_courses(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Reply<Enrollment>> {
    validate_student_id(&student_id)?;

    let student = state
        .students
        .get(&student_id)
        .ok_or_else(|| ApiError::not_found("Student does not exists"))?;

    let courses = student
        .courses
        .unwrap_or_default()
        .into_iter()
        .filter_map(|id| state.courses.get(id))
        .map(|course| EnrolledCourse {
            course_id: course.course_id,
            course_title: course.course_title,
        })
        .collect();

    Ok(Reply::ok(Enrollment {
        student_id: student_id.clone(),
        courses,
    })
    .message(format!("Get courses detail of student {student_id}"))
    .link(format!("/students/{student_id}/courses")))
}

/// GET /courses/{courseId}
async fn get_course(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Reply<Course>> {
    let course_id: u32 = raw_id
        .parse()
        .map_err(|_| ApiError::validation("Invalid input: expected number, received NaN"))?;

    let course = state
        .courses
        .get(course_id)
        .ok_or_else(|| ApiError::not_found("Course does not exists"))?;

    Ok(Reply::ok(course)
        .message(format!("Get course {course_id} successfully"))
        .link(format!("/courses/{course_id}")))
}

/// POST /courses
async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<Course>,
) -> Result<Reply<Course>> {
    let course = state
        .courses
        .insert(body)
        .map_err(|_| ApiError::conflict("Course Id is already exists"))?;

    let course_id = course.course_id;
    Ok(Reply::created(course)
        .message(format!("Course {course_id} has been added successfully"))
        .link(format!("/courses/{course_id}")))
}

/// PUT /courses — shallow-merge the patch over the stored record.
async fn update_course(
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<CoursePatch>,
) -> Result<Reply<Course>> {
    let course = state
        .courses
        .update(&patch)
        .ok_or_else(|| ApiError::not_found("Course does not exists"))?;

    Ok(Reply::ok(course)
        .message(format!(
            "Course {} has been updated successfully",
            patch.course_id
        ))
        .link(format!("/courses/{}", patch.course_id)))
}

/// DELETE /courses — returns the removed record as the payload.
async fn delete_course(
    State(state): State<AppState>,
    ValidatedJson(key): ValidatedJson<CourseKey>,
) -> Result<Reply<Course>> {
    let course = state
        .courses
        .remove(key.course_id)
        .ok_or_else(|| ApiError::not_found("Course does not exists"))?;

    Ok(Reply::ok(course).message(format!(
        "Course {} has been deleted successfully",
        key.course_id
    )))
}
