//! Core type definitions for the campus records engine.
//!
//! This crate defines the fundamental types shared by the admission engine:
//! - Student, Course and Enrollment identifiers (UUID v7)
//! - The `Course` record and its prerequisite set
//! - The `Enrollment` record, its lifecycle status and version counter
//!
//! Directory lookups, graph traversal and the admission pipeline itself
//! belong to their respective crates, not here.

mod course;
mod enrollment;
mod ids;

pub use course::Course;
pub use enrollment::{Enrollment, EnrollmentStatus, validate_grade, GRADE_MAX, GRADE_MIN};
pub use ids::{CourseId, EnrollmentId, StudentId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown enrollment status: {0}")]
    UnknownStatus(String),

    #[error("grade out of range 0-100: {0}")]
    GradeOutOfRange(i32),
}
