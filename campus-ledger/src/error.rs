//! Error types for the ledger layer.

use campus_types::{CourseId, EnrollmentId, StudentId};
use thiserror::Error;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur in ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No record with this ID.
    #[error("enrollment not found: {0}")]
    NotFound(EnrollmentId),

    /// An active enrollment for this (student, course) pair already exists.
    #[error("student {student} already has an active enrollment in course {course}")]
    DuplicateActive {
        student: StudentId,
        course: CourseId,
    },

    /// The course is at its active-enrollment capacity.
    #[error("course {course} is at capacity ({capacity})")]
    CapacityExceeded { course: CourseId, capacity: usize },

    /// The student is at their active-enrollment load limit.
    #[error("student {student} is at their course load limit ({limit})")]
    LoadLimitExceeded { student: StudentId, limit: usize },

    /// The stored version no longer matches the version the caller read.
    #[error("version mismatch: expected {expected}, actual {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// The backing store is gone; the operation was not attempted.
    #[error("ledger unavailable")]
    Unavailable,

    /// Serialization error (snapshot import/export).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (snapshot files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
