//! Entity records and request payloads.

use crate::validate::{student_id_issue, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Degree program a student is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "CPE")]
    Cpe,
    #[serde(rename = "ISNE")]
    Isne,
}

impl Program {
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Cpe => "CPE",
            Program::Isne => "ISNE",
        }
    }
}

/// A student record. Also the create payload: every mandatory field is
/// required, `section` and `courses` are optional, unknown fields are
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub program: Program,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Enrolled course ids. May reference courses that do not exist;
    /// lookups that miss are dropped from responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<u32>>,
}

impl Validate for Student {
    fn validate(&self) -> Result<(), ValidationError> {
        match student_id_issue(&self.student_id) {
            Some(issue) => Err(ValidationError::new(vec![issue])),
            None => Ok(()),
        }
    }
}

/// Partial student update: the key is required, everything else overrides
/// the stored record only when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentPatch {
    pub student_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub program: Option<Program>,
    pub section: Option<String>,
    pub courses: Option<Vec<u32>>,
}

impl StudentPatch {
    /// Shallow merge: fields present in the patch win, the rest keep their
    /// stored values.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(first_name) = &self.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            student.last_name = last_name.clone();
        }
        if let Some(program) = self.program {
            student.program = program;
        }
        if let Some(section) = &self.section {
            student.section = Some(section.clone());
        }
        if let Some(courses) = &self.courses {
            student.courses = Some(courses.clone());
        }
    }
}

impl Validate for StudentPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        match student_id_issue(&self.student_id) {
            Some(issue) => Err(ValidationError::new(vec![issue])),
            None => Ok(()),
        }
    }
}

/// Delete payload carrying only the student key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentKey {
    pub student_id: String,
}

impl Validate for StudentKey {
    fn validate(&self) -> Result<(), ValidationError> {
        match student_id_issue(&self.student_id) {
            Some(issue) => Err(ValidationError::new(vec![issue])),
            None => Ok(()),
        }
    }
}

/// A course record; also the create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Course {
    pub course_id: u32,
    pub course_title: String,
    pub instructors: Vec<String>,
}

impl Validate for Course {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Partial course update keyed by `courseId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoursePatch {
    pub course_id: u32,
    pub course_title: Option<String>,
    pub instructors: Option<Vec<String>>,
}

impl CoursePatch {
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(course_title) = &self.course_title {
            course.course_title = course_title.clone();
        }
        if let Some(instructors) = &self.instructors {
            course.instructors = instructors.clone();
        }
    }
}

impl Validate for CoursePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Delete payload carrying only the course key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CourseKey {
    pub course_id: u32,
}

impl Validate for CourseKey {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Course summary returned by the enrolled-courses lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub course_id: u32,
    pub course_title: String,
}

/// Payload of `GET /students/{studentId}/courses`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_id: String,
    pub courses: Vec<EnrolledCourse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student() -> Student {
        Student {
            student_id: "650610001".to_string(),
            first_name: "Anucha".to_string(),
            last_name: "Saetan".to_string(),
            program: Program::Cpe,
            section: Some("001".to_string()),
            courses: Some(vec![261101, 261102]),
        }
    }

    #[test]
    fn student_serializes_camel_case_and_omits_absent_options() {
        let mut s = student();
        s.section = None;
        s.courses = None;
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["studentId"], "650610001");
        assert_eq!(value["program"], "CPE");
        assert!(value.get("section").is_none());
        assert!(value.get("courses").is_none());
    }

    #[test]
    fn unknown_program_is_rejected() {
        let result: Result<Student, _> = serde_json::from_value(json!({
            "studentId": "650610001",
            "firstName": "Anucha",
            "lastName": "Saetan",
            "program": "EE"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: Result<StudentKey, _> = serde_json::from_value(json!({
            "studentId": "650610001",
            "nickname": "Nu"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let mut s = student();
        let patch = StudentPatch {
            student_id: s.student_id.clone(),
            first_name: Some("Anan".to_string()),
            last_name: None,
            program: None,
            section: None,
            courses: None,
        };
        patch.apply_to(&mut s);
        assert_eq!(s.first_name, "Anan");
        assert_eq!(s.last_name, "Saetan");
        assert_eq!(s.section.as_deref(), Some("001"));
        assert_eq!(s.courses.as_deref(), Some(&[261101, 261102][..]));
    }

    #[test]
    fn course_patch_merges() {
        let mut c = Course {
            course_id: 261102,
            course_title: "Computer Programming".to_string(),
            instructors: vec!["Dr. Busaba".to_string()],
        };
        let patch = CoursePatch {
            course_id: 261102,
            course_title: None,
            instructors: Some(vec!["Dr. Busaba".to_string(), "Dr. Chaiwat".to_string()]),
        };
        patch.apply_to(&mut c);
        assert_eq!(c.course_title, "Computer Programming");
        assert_eq!(c.instructors.len(), 2);
    }
}
