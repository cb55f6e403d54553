//! Shared test fixtures.

use campus_admission::{
    AdmissionConfig, AdmissionEngine, MemoryCourseDirectory, MemoryStudentDirectory,
};
use std::sync::Arc;

/// An engine wired to in-memory directories, with handles to both so
/// tests can seed students and courses.
pub struct TestCampus {
    pub students: MemoryStudentDirectory,
    pub courses: MemoryCourseDirectory,
    pub engine: Arc<AdmissionEngine>,
}

pub fn campus() -> TestCampus {
    campus_with(AdmissionConfig::default())
}

pub fn campus_with(config: AdmissionConfig) -> TestCampus {
    let students = MemoryStudentDirectory::new();
    let courses = MemoryCourseDirectory::new();
    let engine = Arc::new(AdmissionEngine::with_config(
        Arc::new(students.clone()),
        Arc::new(courses.clone()),
        config,
    ));
    TestCampus {
        students,
        courses,
        engine,
    }
}
