//! Directory collaborators the engine consumes.
//!
//! Student and course CRUD live outside the admission core; the engine
//! only needs the narrow lookups defined here. The in-memory
//! implementations are suitable for embedding and tests, and double as
//! the reference semantics for real backends: in particular, every
//! prerequisite-edge insertion must delegate to the cycle gate before
//! committing.

use crate::{AdmissionError, AdmissionResult};
use async_trait::async_trait;
use campus_graph::PrerequisiteGraph;
use campus_types::{Course, CourseId, StudentId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Lookup interface over the student directory.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Is the student known?
    async fn exists(&self, id: &StudentId) -> bool;

    /// Is the student active? (False for unknown students.)
    async fn is_active(&self, id: &StudentId) -> bool;
}

/// Lookup interface over the course catalog.
#[async_trait]
pub trait CourseDirectory: Send + Sync {
    /// Is the course known?
    async fn exists(&self, id: &CourseId) -> bool;

    /// Direct (non-transitive) prerequisites of the course.
    ///
    /// One call supplies the whole prerequisite snapshot for an
    /// admission, so a single operation never observes two graph
    /// versions.
    async fn direct_prerequisites(&self, id: &CourseId) -> HashSet<CourseId>;

    /// Would adding course→candidate close a prerequisite loop?
    async fn would_create_cycle(&self, course: CourseId, candidate: CourseId) -> bool;
}

/// In-memory student directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStudentDirectory {
    // StudentId → active flag.
    students: Arc<RwLock<HashMap<StudentId, bool>>>,
}

impl MemoryStudentDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active student and returns their ID.
    pub fn add_student(&self) -> StudentId {
        let id = StudentId::new();
        self.students.write().unwrap().insert(id, true);
        id
    }

    /// Registers a student with the given active flag.
    pub fn insert(&self, id: StudentId, active: bool) {
        self.students.write().unwrap().insert(id, active);
    }

    /// Flips a student's active flag. No-op for unknown students.
    pub fn set_active(&self, id: &StudentId, active: bool) {
        if let Some(flag) = self.students.write().unwrap().get_mut(id) {
            *flag = active;
        }
    }
}

#[async_trait]
impl StudentDirectory for MemoryStudentDirectory {
    async fn exists(&self, id: &StudentId) -> bool {
        self.students.read().unwrap().contains_key(id)
    }

    async fn is_active(&self, id: &StudentId) -> bool {
        self.students.read().unwrap().get(id).copied().unwrap_or(false)
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    courses: HashMap<CourseId, Course>,
    graph: PrerequisiteGraph,
}

/// In-memory course catalog backed by a [`PrerequisiteGraph`].
///
/// The graph is the source of truth for edges; the `Course` records'
/// prerequisite sets are kept in sync on every accepted insertion.
#[derive(Debug, Clone, Default)]
pub struct MemoryCourseDirectory {
    inner: Arc<RwLock<CatalogState>>,
}

impl MemoryCourseDirectory {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course (prerequisite set ignored; edges go through
    /// [`add_prerequisite`]). Returns the course ID.
    ///
    /// [`add_prerequisite`]: MemoryCourseDirectory::add_prerequisite
    pub fn add_course(&self, code: impl Into<String>, name: impl Into<String>) -> CourseId {
        let course = Course::new(code, name);
        let id = course.id;
        let mut state = self.inner.write().unwrap();
        state.graph.add_course(id);
        state.courses.insert(id, course);
        id
    }

    /// Returns a course record, if known.
    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<Course> {
        self.inner.read().unwrap().courses.get(id).cloned()
    }

    /// Adds the edge course→prerequisite, delegating to the cycle gate.
    ///
    /// Both courses must exist; a rejected edge surfaces as
    /// [`AdmissionError::CycleDetected`] and leaves the catalog
    /// untouched.
    pub fn add_prerequisite(
        &self,
        course: CourseId,
        prerequisite: CourseId,
    ) -> AdmissionResult<()> {
        let mut state = self.inner.write().unwrap();
        if !state.courses.contains_key(&course) {
            return Err(AdmissionError::CourseNotFound(course));
        }
        if !state.courses.contains_key(&prerequisite) {
            return Err(AdmissionError::CourseNotFound(prerequisite));
        }

        state.graph.add_prerequisite(course, prerequisite)?;
        if let Some(record) = state.courses.get_mut(&course) {
            record.prerequisites.insert(prerequisite);
        }
        Ok(())
    }

    /// Removes the edge course→prerequisite, if present.
    pub fn remove_prerequisite(&self, course: &CourseId, prerequisite: &CourseId) {
        let mut state = self.inner.write().unwrap();
        state.graph.remove_prerequisite(course, prerequisite);
        if let Some(record) = state.courses.get_mut(course) {
            record.prerequisites.remove(prerequisite);
        }
    }
}

#[async_trait]
impl CourseDirectory for MemoryCourseDirectory {
    async fn exists(&self, id: &CourseId) -> bool {
        self.inner.read().unwrap().courses.contains_key(id)
    }

    async fn direct_prerequisites(&self, id: &CourseId) -> HashSet<CourseId> {
        self.inner.read().unwrap().graph.direct_prerequisites(id)
    }

    async fn would_create_cycle(&self, course: CourseId, candidate: CourseId) -> bool {
        self.inner
            .read()
            .unwrap()
            .graph
            .would_create_cycle(course, candidate)
    }
}
