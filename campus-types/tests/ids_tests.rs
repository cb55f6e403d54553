use campus_types::{CourseId, EnrollmentId, StudentId};
use std::str::FromStr;

#[test]
fn new_ids_are_unique() {
    assert_ne!(StudentId::new(), StudentId::new());
    assert_ne!(CourseId::new(), CourseId::new());
    assert_ne!(EnrollmentId::new(), EnrollmentId::new());
}

#[test]
fn ids_are_time_ordered() {
    // UUID v7 embeds a timestamp, so ids created later sort later.
    let a = EnrollmentId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = EnrollmentId::new();
    assert!(a < b);
}

#[test]
fn display_roundtrips_through_parse() {
    let id = StudentId::new();
    let parsed = StudentId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn from_str_roundtrips() {
    let id = CourseId::new();
    let parsed = CourseId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn parse_rejects_garbage() {
    assert!(StudentId::parse("not-a-uuid").is_err());
    assert!(CourseId::parse("").is_err());
}

#[test]
fn from_uuid_preserves_value() {
    let uuid = uuid::Uuid::now_v7();
    let id = EnrollmentId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn serde_is_transparent() {
    let id = StudentId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: StudentId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
