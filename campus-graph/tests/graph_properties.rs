//! Property-based tests for the prerequisite graph.
//!
//! The load-bearing property: no sequence of gated edge insertions can
//! make the relation cyclic, because `add_prerequisite` rejects exactly
//! the edges that would close a loop.

use campus_graph::PrerequisiteGraph;
use campus_types::CourseId;
use proptest::prelude::*;

fn course_pool(n: usize) -> Vec<CourseId> {
    (0..n).map(|_| CourseId::new()).collect()
}

/// A course is on a cycle exactly when it is reachable from one of its
/// own prerequisites.
fn on_a_cycle(graph: &PrerequisiteGraph, course: &CourseId) -> bool {
    graph.transitive_requirements(course).contains(course)
}

proptest! {
    /// Any sequence of gated insertions leaves every course cycle-free.
    #[test]
    fn gated_inserts_preserve_acyclicity(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..64)
    ) {
        let pool = course_pool(8);
        let mut graph = PrerequisiteGraph::new();

        for (from, to) in edges {
            // Rejections are expected; acceptance must never break the DAG.
            let _ = graph.add_prerequisite(pool[from], pool[to]);
        }

        for course in &pool {
            prop_assert!(!on_a_cycle(&graph, course));
        }
    }

    /// Every accepted edge is immediately visible as a direct
    /// prerequisite, and its reverse is then reported as a cycle.
    #[test]
    fn accepted_edges_block_their_reverse(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..64)
    ) {
        let pool = course_pool(8);
        let mut graph = PrerequisiteGraph::new();

        for (from, to) in edges {
            if graph.add_prerequisite(pool[from], pool[to]).is_ok() {
                prop_assert!(graph.direct_prerequisites(&pool[from]).contains(&pool[to]));
                prop_assert!(graph.would_create_cycle(pool[to], pool[from]));
            }
        }
    }

    /// Self-loops are rejected regardless of graph contents.
    #[test]
    fn self_loops_never_admitted(
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..32)
    ) {
        let pool = course_pool(6);
        let mut graph = PrerequisiteGraph::new();
        for (from, to) in edges {
            let _ = graph.add_prerequisite(pool[from], pool[to]);
        }
        for course in &pool {
            prop_assert!(graph.add_prerequisite(*course, *course).is_err());
        }
    }
}
