//! Adjacency structure and cycle gate for course prerequisites.

use campus_types::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors produced by graph mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Adding the edge would make the prerequisite relation cyclic.
    #[error("adding prerequisite {prerequisite} to {course} would create a cycle")]
    CycleDetected {
        /// The course the edge was requested for.
        course: CourseId,
        /// The rejected prerequisite.
        prerequisite: CourseId,
    },
}

/// Directed prerequisite graph over courses.
///
/// Maps each course to the set of its direct prerequisites. The graph is
/// read-mostly: the admission pipeline queries it on every create, while
/// edge edits come from course management.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrerequisiteGraph {
    /// Course → direct prerequisites.
    edges: HashMap<CourseId, HashSet<CourseId>>,
}

impl PrerequisiteGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Returns the number of courses with at least one recorded edge set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns true if the course is known to the graph.
    #[must_use]
    pub fn contains(&self, course: &CourseId) -> bool {
        self.edges.contains_key(course)
    }

    /// Registers a course with no prerequisites. No-op if already present.
    pub fn add_course(&mut self, course: CourseId) {
        self.edges.entry(course).or_default();
    }

    /// Returns the direct prerequisites of a course (empty if unknown).
    ///
    /// This is deliberately non-transitive: the admission check requires
    /// approval of direct prerequisites only.
    #[must_use]
    pub fn direct_prerequisites(&self, course: &CourseId) -> HashSet<CourseId> {
        self.edges.get(course).cloned().unwrap_or_default()
    }

    /// Iterates over all courses in the graph.
    pub fn courses(&self) -> impl Iterator<Item = &CourseId> {
        self.edges.keys()
    }

    /// Would adding the edge course→candidate close a loop?
    ///
    /// Returns true immediately for a self-reference. Otherwise walks the
    /// existing prerequisite edges depth-first from `candidate`: the new
    /// edge creates a cycle exactly when `course` is already reachable
    /// from `candidate`. The traversal keeps a visited set so it
    /// terminates even if the stored graph were ever corrupted into a
    /// cycle.
    #[must_use]
    pub fn would_create_cycle(&self, course: CourseId, candidate: CourseId) -> bool {
        if course == candidate {
            return true;
        }

        let mut visited: HashSet<CourseId> = HashSet::new();
        let mut stack = vec![candidate];

        while let Some(current) = stack.pop() {
            if current == course {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(prereqs) = self.edges.get(&current) {
                stack.extend(prereqs.iter().copied());
            }
        }

        false
    }

    /// Adds the edge course→prerequisite, rejecting it if it would make
    /// the relation cyclic. This is the only way edges enter the graph.
    pub fn add_prerequisite(
        &mut self,
        course: CourseId,
        prerequisite: CourseId,
    ) -> Result<(), GraphError> {
        if self.would_create_cycle(course, prerequisite) {
            return Err(GraphError::CycleDetected {
                course,
                prerequisite,
            });
        }
        self.edges.entry(course).or_default().insert(prerequisite);
        // Make sure the prerequisite is a known node too.
        self.edges.entry(prerequisite).or_default();
        Ok(())
    }

    /// Removes the edge course→prerequisite. Removal never creates a
    /// cycle, so it is ungated. Returns true if the edge existed.
    pub fn remove_prerequisite(&mut self, course: &CourseId, prerequisite: &CourseId) -> bool {
        self.edges
            .get_mut(course)
            .is_some_and(|set| set.remove(prerequisite))
    }

    /// Removes a course and every edge that references it.
    pub fn remove_course(&mut self, course: &CourseId) {
        self.edges.remove(course);
        for prereqs in self.edges.values_mut() {
            prereqs.remove(course);
        }
    }

    /// Returns the full transitive requirement set of a course.
    ///
    /// Everything that must eventually be passed before the course can be
    /// taken. Cycle-safe for the same reason `would_create_cycle` is.
    #[must_use]
    pub fn transitive_requirements(&self, course: &CourseId) -> HashSet<CourseId> {
        let mut result: HashSet<CourseId> = HashSet::new();
        let mut stack: Vec<CourseId> = self.direct_prerequisites(course).into_iter().collect();

        while let Some(current) = stack.pop() {
            if !result.insert(current) {
                continue;
            }
            if let Some(prereqs) = self.edges.get(&current) {
                stack.extend(prereqs.iter().copied());
            }
        }

        result
    }
}
