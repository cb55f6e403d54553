//! The course (subject) record.

use crate::CourseId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A course in the catalog.
///
/// `prerequisites` holds the direct prerequisite edges only; transitive
/// requirements and cycle checks live in the course graph, which is keyed
/// by `CourseId` rather than holding object links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Stable identity.
    pub id: CourseId,
    /// Unique catalog code (e.g. "MAT-101").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Direct prerequisites. A course may not require itself.
    pub prerequisites: HashSet<CourseId>,
}

impl Course {
    /// Creates a course with no prerequisites.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CourseId::new(),
            code: code.into(),
            name: name.into(),
            prerequisites: HashSet::new(),
        }
    }

    /// Returns true if the course has no prerequisites.
    #[must_use]
    pub fn has_no_prerequisites(&self) -> bool {
        self.prerequisites.is_empty()
    }
}
