//! The enrollment record and its lifecycle status.
//!
//! An enrollment links one student to one course for one academic period.
//! It carries a monotonically increasing version counter: every mutation
//! bumps it, and every update is conditioned on the version the caller
//! observed (optimistic concurrency).

use crate::{CourseId, EnrollmentId, Error, StudentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest acceptable grade.
pub const GRADE_MIN: i32 = 0;
/// Highest acceptable grade.
pub const GRADE_MAX: i32 = 100;

/// Lifecycle status of an enrollment.
///
/// `Active` is the sole initial state. The other three are terminal:
/// no operation transitions out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// The student is currently registered in the course.
    Active,
    /// The course was passed (grade at or above the threshold).
    Approved,
    /// The course was failed (grade below the threshold).
    Failed,
    /// The enrollment was administratively withdrawn.
    Withdrawn,
}

impl EnrollmentStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Approved => "approved",
            Self::Failed => "failed",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns true for states that no operation may leave.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Returns true if the status requires a recorded grade.
    #[must_use]
    pub fn requires_grade(&self) -> bool {
        matches!(self, Self::Approved | Self::Failed)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "approved" => Ok(Self::Approved),
            "failed" => Ok(Self::Failed),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Validates a caller-supplied grade against the 0-100 scale.
pub fn validate_grade(grade: i32) -> Result<u8, Error> {
    if (GRADE_MIN..=GRADE_MAX).contains(&grade) {
        Ok(grade as u8)
    } else {
        Err(Error::GradeOutOfRange(grade))
    }
}

/// An enrollment record in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Stable identity.
    pub id: EnrollmentId,
    /// The enrolled student.
    pub student_id: StudentId,
    /// The course enrolled in.
    pub course_id: CourseId,
    /// Date the enrollment was admitted.
    pub registered_on: NaiveDate,
    /// Academic period tag (e.g. "2026-2").
    pub period: String,
    /// User tag of whoever registered the enrollment.
    pub registered_by: String,
    /// Lifecycle status.
    pub status: EnrollmentStatus,
    /// Final grade. Present exactly when status is `Approved` or `Failed`.
    pub grade: Option<u8>,
    /// Optimistic concurrency counter; bumps on every mutation.
    pub version: u64,
}

impl Enrollment {
    /// Creates a freshly admitted enrollment: status `Active`, no grade,
    /// version 0, registered today.
    #[must_use]
    pub fn admitted(
        student_id: StudentId,
        course_id: CourseId,
        period: impl Into<String>,
        registered_by: impl Into<String>,
    ) -> Self {
        Self {
            id: EnrollmentId::new(),
            student_id,
            course_id,
            registered_on: chrono::Utc::now().date_naive(),
            period: period.into(),
            registered_by: registered_by.into(),
            status: EnrollmentStatus::Active,
            grade: None,
            version: 0,
        }
    }

    /// Returns true if the enrollment is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}
