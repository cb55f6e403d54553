//! Course enrollment admission engine.
//!
//! The engine decides, under concurrent requests, whether a student may
//! register for a course — subject to course capacity, per-student load
//! limits, prerequisite approval and the acyclic prerequisite graph —
//! and keeps enrollment records consistent while they change.
//!
//! # Architecture
//!
//! - Creates are serialized per course: the whole check pipeline plus
//!   the ledger commit run inside that course's exclusive section
//!   (`campus-ledger`'s [`CourseSections`]). Admissions for different
//!   courses proceed fully in parallel.
//! - Grade and status updates skip the section and race only on the
//!   record's version counter; the loser gets a retryable
//!   [`AdmissionError::Conflict`].
//! - Student and course lookups go through the [`StudentDirectory`] and
//!   [`CourseDirectory`] seams; the CRUD behind them is out of scope.
//!
//! [`CourseSections`]: campus_ledger::CourseSections

mod directory;
mod engine;
mod error;

pub use directory::{
    CourseDirectory, MemoryCourseDirectory, MemoryStudentDirectory, StudentDirectory,
};
pub use engine::{AdmissionConfig, AdmissionEngine};
pub use error::{AdmissionError, AdmissionResult};
