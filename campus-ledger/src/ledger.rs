//! The enrollment record store.

use crate::{LedgerError, LedgerResult};
use campus_types::{CourseId, Enrollment, EnrollmentId, EnrollmentStatus, StudentId};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct LedgerState {
    records: HashMap<EnrollmentId, Enrollment>,
}

impl LedgerState {
    fn active_count_for_course(&self, course: &CourseId) -> usize {
        self.records
            .values()
            .filter(|e| e.course_id == *course && e.is_active())
            .count()
    }

    fn active_count_for_student(&self, student: &StudentId) -> usize {
        self.records
            .values()
            .filter(|e| e.student_id == *student && e.is_active())
            .count()
    }

    fn has_active(&self, student: &StudentId, course: &CourseId) -> bool {
        self.records
            .values()
            .any(|e| e.student_id == *student && e.course_id == *course && e.is_active())
    }
}

/// The durable set of enrollment records.
///
/// Cheap to clone; clones share the same underlying store. All reads and
/// writes take the internal lock, making each call atomic on its own.
/// [`commit_admission`] is the single atomic commit point for admissions:
/// it re-validates the count-based invariants under the write lock
/// immediately before inserting, so no interleaving can overshoot a
/// capacity or load limit.
///
/// [`commit_admission`]: EnrollmentLedger::commit_admission
#[derive(Debug, Clone, Default)]
pub struct EnrollmentLedger {
    inner: Arc<RwLock<LedgerState>>,
}

impl EnrollmentLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Returns the record with this ID, if any.
    #[must_use]
    pub fn get(&self, id: &EnrollmentId) -> Option<Enrollment> {
        self.inner.read().unwrap().records.get(id).cloned()
    }

    /// Returns every record in the ledger.
    #[must_use]
    pub fn all(&self) -> Vec<Enrollment> {
        self.inner.read().unwrap().records.values().cloned().collect()
    }

    /// Returns every record for a student, any status.
    #[must_use]
    pub fn for_student(&self, student: &StudentId) -> Vec<Enrollment> {
        self.inner
            .read()
            .unwrap()
            .records
            .values()
            .filter(|e| e.student_id == *student)
            .cloned()
            .collect()
    }

    /// Returns every record for a course, any status.
    #[must_use]
    pub fn for_course(&self, course: &CourseId) -> Vec<Enrollment> {
        self.inner
            .read()
            .unwrap()
            .records
            .values()
            .filter(|e| e.course_id == *course)
            .cloned()
            .collect()
    }

    /// Number of active enrollments in a course.
    #[must_use]
    pub fn active_count_for_course(&self, course: &CourseId) -> usize {
        self.inner.read().unwrap().active_count_for_course(course)
    }

    /// Number of active enrollments held by a student.
    #[must_use]
    pub fn active_count_for_student(&self, student: &StudentId) -> usize {
        self.inner.read().unwrap().active_count_for_student(student)
    }

    /// Does the student already hold an active enrollment in the course?
    #[must_use]
    pub fn has_active(&self, student: &StudentId, course: &CourseId) -> bool {
        self.inner.read().unwrap().has_active(student, course)
    }

    /// The set of courses this student has passed. Feeds the
    /// prerequisite check.
    #[must_use]
    pub fn approved_courses_for(&self, student: &StudentId) -> HashSet<CourseId> {
        self.inner
            .read()
            .unwrap()
            .records
            .values()
            .filter(|e| e.student_id == *student && e.status == EnrollmentStatus::Approved)
            .map(|e| e.course_id)
            .collect()
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Commits an admitted enrollment.
    ///
    /// Under the write lock, re-validates in order: no duplicate active
    /// record, course below `capacity`, student below `load_limit` — and
    /// only then inserts. A violation aborts with no state change. The
    /// re-validation is what keeps the load limit intact when sections
    /// for two different courses race on the same student.
    pub fn commit_admission(
        &self,
        enrollment: Enrollment,
        capacity: usize,
        load_limit: usize,
    ) -> LedgerResult<Enrollment> {
        let mut state = self.inner.write().unwrap();

        if state.has_active(&enrollment.student_id, &enrollment.course_id) {
            return Err(LedgerError::DuplicateActive {
                student: enrollment.student_id,
                course: enrollment.course_id,
            });
        }
        if state.active_count_for_course(&enrollment.course_id) >= capacity {
            return Err(LedgerError::CapacityExceeded {
                course: enrollment.course_id,
                capacity,
            });
        }
        if state.active_count_for_student(&enrollment.student_id) >= load_limit {
            return Err(LedgerError::LoadLimitExceeded {
                student: enrollment.student_id,
                limit: load_limit,
            });
        }

        state.records.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    /// Applies a mutation to a record under version compare-and-set.
    ///
    /// Fails with [`LedgerError::VersionMismatch`] when the stored version
    /// differs from `expected_version` — the caller must re-read and
    /// retry. On success the version is bumped and the new record
    /// returned. The mutation closure sees the record after the version
    /// check and must not touch `version` itself.
    pub fn update<F>(
        &self,
        id: &EnrollmentId,
        expected_version: u64,
        mutate: F,
    ) -> LedgerResult<Enrollment>
    where
        F: FnOnce(&mut Enrollment),
    {
        let mut state = self.inner.write().unwrap();
        let record = state
            .records
            .get(id)
            .ok_or(LedgerError::NotFound(*id))?;

        if record.version != expected_version {
            return Err(LedgerError::VersionMismatch {
                expected: expected_version,
                actual: record.version,
            });
        }

        let mut updated = record.clone();
        mutate(&mut updated);
        updated.version += 1;
        state.records.insert(*id, updated.clone());
        Ok(updated)
    }

    /// Administrative removal of a record. Not part of admission logic.
    pub fn remove(&self, id: &EnrollmentId) -> LedgerResult<Enrollment> {
        self.inner
            .write()
            .unwrap()
            .records
            .remove(id)
            .ok_or(LedgerError::NotFound(*id))
    }

    // ── Snapshots ────────────────────────────────────────────────

    /// Exports every record (unspecified order).
    #[must_use]
    pub fn export(&self) -> Vec<Enrollment> {
        self.all()
    }

    /// Replaces the ledger contents with the given records.
    pub fn import(&self, records: Vec<Enrollment>) {
        let mut state = self.inner.write().unwrap();
        state.records = records.into_iter().map(|e| (e.id, e)).collect();
    }

    /// Writes a JSON snapshot of the ledger to a file.
    pub fn save_to(&self, path: &Path) -> LedgerResult<()> {
        let json = serde_json::to_vec_pretty(&self.export())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a ledger from a JSON snapshot file.
    pub fn load_from(path: &Path) -> LedgerResult<Self> {
        let bytes = std::fs::read(path)?;
        let records: Vec<Enrollment> = serde_json::from_slice(&bytes)?;
        let ledger = Self::new();
        ledger.import(records);
        Ok(ledger)
    }
}
