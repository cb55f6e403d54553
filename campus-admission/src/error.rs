//! Error types for the admission engine.
//!
//! Every variant is a recoverable, caller-facing domain error; none is
//! process-fatal. The create pipeline stops at the first failing check
//! and returns it with no side effects. [`AdmissionError::Conflict`] is
//! the one error expected under legitimate concurrent contention — it
//! means "re-read and retry", and [`AdmissionError::is_retryable`] lets
//! callers tell it apart from validation failures.

use campus_graph::GraphError;
use campus_ledger::LedgerError;
use campus_types::{CourseId, EnrollmentId, EnrollmentStatus, StudentId};
use thiserror::Error;

/// Result type for admission operations.
pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Errors that can occur in admission operations.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The student is not in the directory.
    #[error("student not found: {0}")]
    StudentNotFound(StudentId),

    /// The course is not in the catalog.
    #[error("course not found: {0}")]
    CourseNotFound(CourseId),

    /// No enrollment with this ID.
    #[error("enrollment not found: {0}")]
    EnrollmentNotFound(EnrollmentId),

    /// The student exists but is not active.
    #[error("student is inactive: {0}")]
    InactiveStudent(StudentId),

    /// The student already has an active enrollment in this course.
    #[error("student {student} already has an active enrollment in course {course}")]
    DuplicateActive {
        student: StudentId,
        course: CourseId,
    },

    /// The course has no open seats.
    #[error("course {course} is at capacity ({capacity})")]
    CapacityExceeded { course: CourseId, capacity: usize },

    /// The student is carrying their maximum course load.
    #[error("student {student} is at their course load limit ({limit})")]
    LoadLimitExceeded { student: StudentId, limit: usize },

    /// One or more direct prerequisites have not been approved.
    #[error("prerequisites not met for course {course}: {missing:?}")]
    PrerequisiteNotMet {
        course: CourseId,
        missing: Vec<CourseId>,
    },

    /// The requested prerequisite edge would make the graph cyclic.
    #[error("adding prerequisite {prerequisite} to course {course} would create a cycle")]
    CycleDetected {
        course: CourseId,
        prerequisite: CourseId,
    },

    /// The transition is not allowed by the lifecycle state machine,
    /// either because the record is in a terminal state or because the
    /// target state cannot be reached this way.
    #[error("invalid transition involving status {0}")]
    InvalidTransition(EnrollmentStatus),

    /// The status string is not one of the four enumerated states.
    #[error("unrecognized status: {0}")]
    InvalidStatus(String),

    /// The grade is outside the 0-100 scale.
    #[error("grade out of range 0-100: {0}")]
    InvalidGrade(i32),

    /// The record changed since the caller read it. Re-read and retry.
    #[error("version conflict: expected {expected}, actual {actual}")]
    Conflict { expected: u64, actual: u64 },

    /// The backing store is unavailable; nothing was attempted.
    #[error("admission backend unavailable")]
    Unavailable,
}

impl AdmissionError {
    /// True for errors a caller should re-read and retry on, as opposed
    /// to validation failures that will not go away by retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<LedgerError> for AdmissionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => Self::EnrollmentNotFound(id),
            LedgerError::DuplicateActive { student, course } => {
                Self::DuplicateActive { student, course }
            }
            LedgerError::CapacityExceeded { course, capacity } => {
                Self::CapacityExceeded { course, capacity }
            }
            LedgerError::LoadLimitExceeded { student, limit } => {
                Self::LoadLimitExceeded { student, limit }
            }
            LedgerError::VersionMismatch { expected, actual } => {
                Self::Conflict { expected, actual }
            }
            LedgerError::Unavailable
            | LedgerError::Serialization(_)
            | LedgerError::Io(_) => Self::Unavailable,
        }
    }
}

impl From<GraphError> for AdmissionError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::CycleDetected {
                course,
                prerequisite,
            } => Self::CycleDetected {
                course,
                prerequisite,
            },
        }
    }
}
