//! Validation rules for inbound identifiers and payloads.
//!
//! Rules are pure checks collected as an ordered issue list; callers surface
//! only the first violation, so impls must check fields in declaration
//! order. Shape/type errors caught by serde during decoding feed the same
//! 400 envelope upstream; the rules here cover what the type system cannot
//! express.

use serde::Serialize;
use std::fmt;

/// A single rule violation.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Field the rule applies to
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of rule violations.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Shortcut for a single-field failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Issue::new(field, message)])
    }

    /// Message of the first violation, in field-declaration order.
    pub fn first_message(&self) -> &str {
        self.issues
            .first()
            .map(|issue| issue.message.as_str())
            .unwrap_or("Validation failed")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_message())
    }
}

impl std::error::Error for ValidationError {}

/// Trait for payloads with validation rules beyond their serde shape.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Check a student identifier: exactly nine ASCII digits. Length is checked
/// before content so the first violation is deterministic.
pub fn student_id_issue(id: &str) -> Option<Issue> {
    if id.len() != 9 {
        return Some(Issue::new(
            "studentId",
            "Student ID must be exactly 9 characters",
        ));
    }
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Some(Issue::new(
            "studentId",
            "Student ID must contain only digits",
        ));
    }
    None
}

/// Validate a student identifier taken from a path parameter.
pub fn validate_student_id(id: &str) -> Result<(), ValidationError> {
    match student_id_issue(id) {
        Some(issue) => Err(ValidationError::new(vec![issue])),
        None => Ok(()),
    }
}
