//! The admission engine — check pipeline and lifecycle transitions.
//!
//! Creates run inside the course's exclusive section; status and grade
//! updates use the ledger's per-record version compare-and-set instead
//! and never take the course section.

use crate::directory::{CourseDirectory, StudentDirectory};
use crate::{AdmissionError, AdmissionResult};
use campus_ledger::{CourseSections, EnrollmentLedger};
use campus_types::{
    validate_grade, CourseId, Enrollment, EnrollmentId, EnrollmentStatus, StudentId,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for the admission engine.
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    /// Maximum concurrent active enrollments per course.
    pub course_capacity: usize,
    /// Maximum concurrent active enrollments per student.
    pub student_load_limit: usize,
    /// Lowest grade that approves a course.
    pub pass_threshold: u8,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            course_capacity: 30,
            student_load_limit: 5,
            pass_threshold: 60,
        }
    }
}

/// The admission engine — orchestrates enrollment creation, lifecycle
/// transitions and the query surface.
pub struct AdmissionEngine {
    /// Student directory collaborator.
    students: Arc<dyn StudentDirectory>,
    /// Course catalog collaborator.
    courses: Arc<dyn CourseDirectory>,
    /// The enrollment ledger.
    ledger: EnrollmentLedger,
    /// Per-course exclusive sections.
    sections: CourseSections,
    /// Limits and grading threshold.
    config: AdmissionConfig,
}

impl AdmissionEngine {
    /// Creates an engine with default limits (capacity 30, load 5,
    /// threshold 60).
    pub fn new(students: Arc<dyn StudentDirectory>, courses: Arc<dyn CourseDirectory>) -> Self {
        Self::with_config(students, courses, AdmissionConfig::default())
    }

    /// Creates an engine with custom limits.
    pub fn with_config(
        students: Arc<dyn StudentDirectory>,
        courses: Arc<dyn CourseDirectory>,
        config: AdmissionConfig,
    ) -> Self {
        Self {
            students,
            courses,
            ledger: EnrollmentLedger::new(),
            sections: CourseSections::new(),
            config,
        }
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Returns a handle to the underlying ledger (shared state).
    pub fn ledger(&self) -> &EnrollmentLedger {
        &self.ledger
    }

    /// Returns the section registry, e.g. to close it on shutdown.
    pub fn sections(&self) -> &CourseSections {
        &self.sections
    }

    // ── Admission ────────────────────────────────────────────────

    /// Admits a student into a course.
    ///
    /// The whole pipeline runs inside the course's exclusive section, so
    /// two concurrent creates for one course are strictly serialized.
    /// Checks run in a fixed order and fail fast with no side effects:
    /// student exists and is active, course exists, no duplicate active
    /// enrollment, course below capacity, student below load limit,
    /// every direct prerequisite approved. The commit re-validates the
    /// count-based checks under the ledger's write lock — that second
    /// look is what holds the student load limit when sections for two
    /// different courses race on one student.
    pub async fn create_enrollment(
        &self,
        student: StudentId,
        course: CourseId,
        period: impl Into<String>,
        registered_by: impl Into<String>,
    ) -> AdmissionResult<Enrollment> {
        let _section = self.sections.lock(course).await?;

        if !self.students.exists(&student).await {
            return Err(AdmissionError::StudentNotFound(student));
        }
        if !self.students.is_active(&student).await {
            return Err(AdmissionError::InactiveStudent(student));
        }
        if !self.courses.exists(&course).await {
            return Err(AdmissionError::CourseNotFound(course));
        }
        if self.ledger.has_active(&student, &course) {
            return Err(AdmissionError::DuplicateActive { student, course });
        }
        if self.ledger.active_count_for_course(&course) >= self.config.course_capacity {
            debug!(%course, "admission rejected: course at capacity");
            return Err(AdmissionError::CapacityExceeded {
                course,
                capacity: self.config.course_capacity,
            });
        }
        if self.ledger.active_count_for_student(&student) >= self.config.student_load_limit {
            debug!(%student, "admission rejected: student at load limit");
            return Err(AdmissionError::LoadLimitExceeded {
                student,
                limit: self.config.student_load_limit,
            });
        }

        // One directory read supplies the whole prerequisite snapshot.
        let prerequisites = self.courses.direct_prerequisites(&course).await;
        if !prerequisites.is_empty() {
            let approved = self.ledger.approved_courses_for(&student);
            let mut missing: Vec<CourseId> = prerequisites
                .iter()
                .filter(|p| !approved.contains(p))
                .copied()
                .collect();
            if !missing.is_empty() {
                missing.sort();
                return Err(AdmissionError::PrerequisiteNotMet { course, missing });
            }
        }

        let enrollment = Enrollment::admitted(student, course, period, registered_by);
        let committed = self.ledger.commit_admission(
            enrollment,
            self.config.course_capacity,
            self.config.student_load_limit,
        )?;

        info!(%student, %course, enrollment = %committed.id, "enrollment admitted");
        Ok(committed)
    }

    // ── Lifecycle transitions ────────────────────────────────────

    /// Records a final grade, moving the enrollment to `Approved` (grade
    /// at or above the threshold) or `Failed` (below).
    ///
    /// `expected_version` must match the stored version; a mismatch is a
    /// [`AdmissionError::Conflict`] and the caller re-reads and retries.
    /// The engine performs no automatic retry.
    pub fn record_grade(
        &self,
        id: &EnrollmentId,
        expected_version: u64,
        grade: i32,
    ) -> AdmissionResult<Enrollment> {
        let grade = validate_grade(grade).map_err(|_| AdmissionError::InvalidGrade(grade))?;
        self.check_transition_from_active(id, expected_version)?;

        let status = if grade >= self.config.pass_threshold {
            EnrollmentStatus::Approved
        } else {
            EnrollmentStatus::Failed
        };

        let updated = self.ledger.update(id, expected_version, |e| {
            e.grade = Some(grade);
            e.status = status;
        })?;
        debug!(enrollment = %id, grade, %status, "grade recorded");
        Ok(updated)
    }

    /// Administratively withdraws an active enrollment. The grade stays
    /// unset; `Withdrawn` is terminal.
    pub fn withdraw(&self, id: &EnrollmentId, expected_version: u64) -> AdmissionResult<Enrollment> {
        self.check_transition_from_active(id, expected_version)?;

        let updated = self.ledger.update(id, expected_version, |e| {
            e.status = EnrollmentStatus::Withdrawn;
        })?;
        debug!(enrollment = %id, "enrollment withdrawn");
        Ok(updated)
    }

    /// Sets the status from its wire name, under the same version check.
    ///
    /// Only the four enumerated states are recognized; anything else is
    /// [`AdmissionError::InvalidStatus`]. `"withdrawn"` behaves exactly
    /// like [`withdraw`]. `"approved"` and `"failed"` are rejected here:
    /// graded states carry a grade, which only [`record_grade`] can
    /// supply. `"active"` on an already-active record is a plain
    /// version-bumping touch.
    ///
    /// [`withdraw`]: AdmissionEngine::withdraw
    /// [`record_grade`]: AdmissionEngine::record_grade
    pub fn set_status(
        &self,
        id: &EnrollmentId,
        expected_version: u64,
        status: &str,
    ) -> AdmissionResult<Enrollment> {
        let target = EnrollmentStatus::from_str(status)
            .map_err(|_| AdmissionError::InvalidStatus(status.to_string()))?;
        self.check_transition_from_active(id, expected_version)?;

        match target {
            EnrollmentStatus::Withdrawn => self.withdraw(id, expected_version),
            EnrollmentStatus::Active => Ok(self.ledger.update(id, expected_version, |_| {})?),
            EnrollmentStatus::Approved | EnrollmentStatus::Failed => {
                Err(AdmissionError::InvalidTransition(target))
            }
        }
    }

    /// Administrative removal of an enrollment record. Not part of the
    /// admission lifecycle.
    pub fn remove_enrollment(&self, id: &EnrollmentId) -> AdmissionResult<Enrollment> {
        Ok(self.ledger.remove(id)?)
    }

    /// Shared precondition for every transition: the record exists, the
    /// caller's version is current, and the state is still `Active`.
    ///
    /// The version check comes first — a stale caller learns `Conflict`
    /// and re-reads before being told anything about the state. Since
    /// every mutation bumps the version, a successful CAS afterwards
    /// implies the record is unchanged since this check.
    fn check_transition_from_active(
        &self,
        id: &EnrollmentId,
        expected_version: u64,
    ) -> AdmissionResult<()> {
        let current = self
            .ledger
            .get(id)
            .ok_or(AdmissionError::EnrollmentNotFound(*id))?;
        if current.version != expected_version {
            return Err(AdmissionError::Conflict {
                expected: expected_version,
                actual: current.version,
            });
        }
        if current.status.is_terminal() {
            return Err(AdmissionError::InvalidTransition(current.status));
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Returns an enrollment by ID.
    pub fn enrollment(&self, id: &EnrollmentId) -> AdmissionResult<Enrollment> {
        self.ledger
            .get(id)
            .ok_or(AdmissionError::EnrollmentNotFound(*id))
    }

    /// Every enrollment for a student, any status.
    #[must_use]
    pub fn enrollments_for_student(&self, student: &StudentId) -> Vec<Enrollment> {
        self.ledger.for_student(student)
    }

    /// Every enrollment for a course, any status.
    #[must_use]
    pub fn enrollments_for_course(&self, course: &CourseId) -> Vec<Enrollment> {
        self.ledger.for_course(course)
    }

    /// Number of active enrollments in a course.
    #[must_use]
    pub fn active_count_for_course(&self, course: &CourseId) -> usize {
        self.ledger.active_count_for_course(course)
    }

    /// Number of active enrollments held by a student.
    #[must_use]
    pub fn active_count_for_student(&self, student: &StudentId) -> usize {
        self.ledger.active_count_for_student(student)
    }

    /// Would adding course→candidate close a prerequisite loop?
    /// Delegates to the catalog's graph view.
    pub async fn would_create_cycle(&self, course: CourseId, candidate: CourseId) -> bool {
        self.courses.would_create_cycle(course, candidate).await
    }
}
