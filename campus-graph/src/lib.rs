//! Prerequisite graph for the campus records engine.
//!
//! This crate provides [`PrerequisiteGraph`], the directed graph over
//! courses where an edge course→prerequisite means "the course cannot be
//! taken until the prerequisite is passed".
//!
//! The graph holds invariants the admission pipeline relies on:
//! - No self-loops.
//! - The relation stays acyclic at all times: every edge insertion goes
//!   through [`PrerequisiteGraph::add_prerequisite`], which rejects edges
//!   that would close a loop.
//!
//! Courses and edges are an adjacency structure keyed by [`CourseId`],
//! never object links, so traversal is index-based.
//!
//! [`CourseId`]: campus_types::CourseId

mod prereq_graph;

pub use prereq_graph::{GraphError, PrerequisiteGraph};
