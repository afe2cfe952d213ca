//! In-memory registry behind repository traits.
//!
//! Handlers depend on the [`StudentRepository`] / [`CourseRepository`]
//! traits held in [`AppState`], so the storage can be swapped for a real
//! database without touching handler logic. [`MemoryRegistry`] is the
//! process-memory implementation: two insertion-ordered vectors behind
//! `RwLock`s. Every operation completes its read-modify-write under one
//! guard, so a request's mutation is atomic with respect to others.

use crate::model::{Course, CoursePatch, Program, Student, StudentPatch};
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RepoError {
    /// A record with the same key already exists.
    #[error("duplicate key")]
    Duplicate,
}

/// Repository of student records.
pub trait StudentRepository: Send + Sync {
    /// All students, optionally filtered by exact program string.
    fn list(&self, program: Option<&str>) -> Vec<Student>;
    fn get(&self, student_id: &str) -> Option<Student>;
    /// Append a new record; fails if the key already exists.
    fn insert(&self, student: Student) -> Result<Student, RepoError>;
    /// Shallow-merge a patch over the record at its position.
    fn update(&self, patch: &StudentPatch) -> Option<Student>;
    /// Remove a record, preserving the order of the rest.
    fn remove(&self, student_id: &str) -> Option<Student>;
}

/// Repository of course records.
pub trait CourseRepository: Send + Sync {
    fn get(&self, course_id: u32) -> Option<Course>;
    fn insert(&self, course: Course) -> Result<Course, RepoError>;
    fn update(&self, patch: &CoursePatch) -> Option<Course>;
    fn remove(&self, course_id: u32) -> Option<Course>;
}

/// Process-memory registry of students and courses.
#[derive(Clone, Default)]
pub struct MemoryRegistry {
    students: Arc<RwLock<Vec<Student>>>,
    courses: Arc<RwLock<Vec<Course>>>,
}

impl MemoryRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry initialized with the static seed data.
    pub fn seeded() -> Self {
        Self {
            students: Arc::new(RwLock::new(seed_students())),
            courses: Arc::new(RwLock::new(seed_courses())),
        }
    }
}

impl StudentRepository for MemoryRegistry {
    fn list(&self, program: Option<&str>) -> Vec<Student> {
        let students = self.students.read().unwrap();
        match program {
            Some(program) => students
                .iter()
                .filter(|s| s.program.as_str() == program)
                .cloned()
                .collect(),
            None => students.clone(),
        }
    }

    fn get(&self, student_id: &str) -> Option<Student> {
        self.students
            .read()
            .unwrap()
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned()
    }

    fn insert(&self, student: Student) -> Result<Student, RepoError> {
        let mut students = self.students.write().unwrap();
        if students.iter().any(|s| s.student_id == student.student_id) {
            return Err(RepoError::Duplicate);
        }
        students.push(student.clone());
        Ok(student)
    }

    fn update(&self, patch: &StudentPatch) -> Option<Student> {
        let mut students = self.students.write().unwrap();
        let student = students
            .iter_mut()
            .find(|s| s.student_id == patch.student_id)?;
        patch.apply_to(student);
        Some(student.clone())
    }

    fn remove(&self, student_id: &str) -> Option<Student> {
        let mut students = self.students.write().unwrap();
        let index = students.iter().position(|s| s.student_id == student_id)?;
        Some(students.remove(index))
    }
}

impl CourseRepository for MemoryRegistry {
    fn get(&self, course_id: u32) -> Option<Course> {
        self.courses
            .read()
            .unwrap()
            .iter()
            .find(|c| c.course_id == course_id)
            .cloned()
    }

    fn insert(&self, course: Course) -> Result<Course, RepoError> {
        let mut courses = self.courses.write().unwrap();
        if courses.iter().any(|c| c.course_id == course.course_id) {
            return Err(RepoError::Duplicate);
        }
        courses.push(course.clone());
        Ok(course)
    }

    fn update(&self, patch: &CoursePatch) -> Option<Course> {
        let mut courses = self.courses.write().unwrap();
        let course = courses.iter_mut().find(|c| c.course_id == patch.course_id)?;
        patch.apply_to(course);
        Some(course.clone())
    }

    fn remove(&self, course_id: u32) -> Option<Course> {
        let mut courses = self.courses.write().unwrap();
        let index = courses.iter().position(|c| c.course_id == course_id)?;
        Some(courses.remove(index))
    }
}

/// Shared handler state: both repositories, injectable for tests.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl AppState {
    /// State backed by a single in-memory registry.
    pub fn new(registry: MemoryRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            students: registry.clone(),
            courses: registry,
        }
    }
}

fn seed_students() -> Vec<Student> {
    vec![
        Student {
            student_id: "650610001".to_string(),
            first_name: "Anucha".to_string(),
            last_name: "Saetan".to_string(),
            program: Program::Cpe,
            section: Some("001".to_string()),
            courses: Some(vec![261101, 261102]),
        },
        Student {
            student_id: "650610002".to_string(),
            first_name: "Benjamas".to_string(),
            last_name: "Kaewkla".to_string(),
            program: Program::Cpe,
            section: Some("001".to_string()),
            // 269999 has no matching course on purpose
            courses: Some(vec![261101, 269999]),
        },
        Student {
            student_id: "650615010".to_string(),
            first_name: "Chanida".to_string(),
            last_name: "Boonmee".to_string(),
            program: Program::Isne,
            section: Some("002".to_string()),
            courses: Some(vec![261102]),
        },
        Student {
            student_id: "650615011".to_string(),
            first_name: "Kittipong".to_string(),
            last_name: "Srisuwan".to_string(),
            program: Program::Isne,
            section: None,
            courses: None,
        },
    ]
}

fn seed_courses() -> Vec<Course> {
    vec![
        Course {
            course_id: 261101,
            course_title: "Introduction to Computer Engineering".to_string(),
            instructors: vec!["Dr. Arthit".to_string()],
        },
        Course {
            course_id: 261102,
            course_title: "Computer Programming".to_string(),
            instructors: vec!["Dr. Busaba".to_string(), "Dr. Chaiwat".to_string()],
        },
        Course {
            course_id: 261218,
            course_title: "Data Structures".to_string(),
            instructors: vec!["Dr. Duangjai".to_string()],
        },
        Course {
            course_id: 269101,
            course_title: "Information Systems Fundamentals".to_string(),
            instructors: vec!["Dr. Ekkarat".to_string()],
        },
    ]
}
