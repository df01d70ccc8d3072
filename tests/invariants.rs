// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the pathyard container
//!
//! These tests verify critical invariants:
//! 1. Undirected symmetry - every live edge has a live reciprocal
//! 2. Idempotent mutation - duplicate adds leave counts unchanged
//! 3. Positional equality - permutation-tolerant, count-sensitive
//! 4. Round-trip fidelity - graphs survive serde round trips

use pathyard::prelude::*;
use proptest::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

// =============================================================================
// Test Helpers
// =============================================================================

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(clippy::cast_possible_wrap)]
fn lettered(kind: GraphKind, count: usize) -> (Graph<String>, Vec<VertexId>) {
    let mut graph = Graph::new(kind);
    let ids = (0..count)
        .map(|i| graph.add_vertex(Vertex::new(format!("n{i}"), i as i64)).id())
        .collect();
    (graph, ids)
}

fn build(kind: GraphKind, triples: &[(usize, usize, i64)]) -> Graph<String> {
    let (mut graph, ids) = lettered(kind, 5);
    for &(from, to, cost) in triples {
        let _outcome = graph.add_edge(ids[from], ids[to], cost);
    }
    graph
}

// =============================================================================
// Undirected Symmetry Tests
// =============================================================================

#[test]
fn test_vertex_constructors() {
    let weighted = Vertex::new("A", 3);
    assert_eq!(weighted.weight(), 3);
    assert_eq!((weighted.x(), weighted.y()), (3.0, 3.0));

    let placed = Vertex::with_position("B", 1.5, -2.0);
    assert_eq!(placed.weight(), 0);
    assert_eq!((placed.x(), placed.y()), (1.5, -2.0));
    assert_eq!(placed.degree(), 0);
}

#[test]
fn test_undirected_add_remove_lifecycle() {
    let mut graph = Graph::default();
    assert_eq!(graph.kind(), GraphKind::Undirected);
    assert!(graph.is_empty());

    let a = graph.add_vertex(Vertex::new("A", 1)).id();
    let b = graph.add_vertex(Vertex::new("B", 2)).id();
    let c = graph.add_vertex(Vertex::new("C", 3)).id();

    let id = graph.add_edge(a, b, 5).unwrap().id();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges_from(a).count(), 1);
    assert_eq!(graph.edges_from(b).count(), 1);
    assert_eq!(graph.edges_from(c).count(), 0);

    assert!(graph.remove_edge(id).was_removed());
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.edges_from(a).count(), 0);
    assert_eq!(graph.edges_from(b).count(), 0);
    assert!(!graph.is_empty());
    assert_eq!(graph.vertices().len(), 3);
}

#[test]
fn test_add_vertex_idempotent_by_value() {
    let (mut graph, _) = lettered(GraphKind::Undirected, 4);

    let outcome = graph.add_vertex(Vertex::new("n2".to_string(), 2));
    assert!(!outcome.is_fresh());
    assert_eq!(graph.vertex_count(), 4);
}

#[test]
fn test_add_edge_idempotent_with_reciprocal() {
    let (mut graph, ids) = lettered(GraphKind::Undirected, 3);

    assert!(graph.add_edge(ids[0], ids[1], 5).unwrap().is_fresh());
    assert!(!graph.add_edge(ids[0], ids[1], 5).unwrap().is_fresh());
    assert!(!graph.add_edge(ids[1], ids[0], 5).unwrap().is_fresh());
    assert_eq!(graph.edge_count(), 2);
}

// =============================================================================
// Cost Pair Tests
// =============================================================================

#[test]
fn test_cost_vertex_pair_ordering_is_distinct_from_equality() {
    let (_, ids) = lettered(GraphKind::Undirected, 3);

    let cheap = CostVertexPair::new(3, ids[0]);
    let also_cheap = CostVertexPair::new(3, ids[1]);
    let costly = CostVertexPair::new(9, ids[2]);

    // Ordering is by cost alone...
    assert_eq!(cheap.cmp(&also_cheap), Ordering::Equal);
    assert!(cheap < costly);
    // ...while equality also sees the vertex.
    assert_ne!(cheap, also_cheap);
    assert_eq!(cheap, CostVertexPair::new(3, ids[0]));
    assert_eq!(cheap.vertex(), ids[0]);

    let mut relaxed = costly;
    relaxed.set_cost(2);
    assert!(relaxed < cheap);
}

#[test]
fn test_cost_vertex_pair_drives_a_min_heap() {
    let (_, ids) = lettered(GraphKind::Undirected, 3);

    let mut queue = BinaryHeap::new();
    queue.push(Reverse(CostVertexPair::new(9, ids[1])));
    queue.push(Reverse(CostVertexPair::new(3, ids[0])));
    queue.push(Reverse(CostVertexPair::new(7, ids[2])));

    assert_eq!(queue.pop().unwrap().0.cost(), 3);
    assert_eq!(queue.pop().unwrap().0.cost(), 7);
    assert_eq!(queue.pop().unwrap().0.cost(), 9);
}

#[test]
fn test_cost_path_pair_equality_requires_equal_length() {
    let (mut graph, ids) = lettered(GraphKind::Directed, 3);
    let ab = graph.add_edge(ids[0], ids[1], 5).unwrap().id();
    let bc = graph.add_edge(ids[1], ids[2], 7).unwrap().id();

    let full = CostPathPair::new(12, vec![ab, bc]);
    assert_eq!(full, CostPathPair::new(12, vec![ab, bc]));
    assert_ne!(full, CostPathPair::new(12, vec![ab]));
    assert_ne!(full, CostPathPair::new(13, vec![ab, bc]));

    // An empty path is a valid result.
    let mut nowhere = CostPathPair::new(0, Vec::new());
    assert_eq!(nowhere.path().len(), 0);
    assert_eq!(nowhere.cost(), 0);
    nowhere.set_cost(1);
    assert_eq!(nowhere.cost(), 1);
}

// =============================================================================
// Round-Trip Fidelity Tests
// =============================================================================

#[test]
fn test_serde_round_trip_fidelity() {
    let (mut graph, ids) = lettered(GraphKind::Undirected, 3);
    assert!(graph.add_edge(ids[0], ids[1], 5).unwrap().is_fresh());
    let bc = graph.add_edge(ids[1], ids[2], 7).unwrap().id();
    graph.vertex_mut(ids[2]).unwrap().set_weight(42);

    let json = serde_json::to_string(&graph).unwrap();
    let loaded: Graph<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(loaded, graph);
    assert_eq!(loaded.kind(), GraphKind::Undirected);
    assert_eq!(loaded.vertex_count(), 3);
    assert_eq!(loaded.edge_count(), 4);
    assert_eq!(loaded.vertex(ids[2]).unwrap().weight(), 42);

    // Handles issued before the round trip still resolve.
    let edge = loaded.edge(bc).unwrap();
    assert_eq!((edge.source(), edge.target(), edge.cost()), (ids[1], ids[2], 7));
}

#[test]
fn test_from_parts_reports_and_skips_bad_edges() {
    init_logging();

    let vertices = vec![
        Vertex::new("A".to_string(), 1),
        Vertex::new("B".to_string(), 2),
    ];
    let graph = Graph::from_parts(
        GraphKind::Undirected,
        vertices,
        [(0, 1, 5), (0, 7, 3), (9, 1, 4)],
    );

    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 2);
}

// =============================================================================
// Property Tests
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Add { from: usize, to: usize, cost: i64 },
    Remove { slot: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, 0..6usize, 1..20i64)
            .prop_map(|(from, to, cost)| Op::Add { from, to, cost }),
        (0..64usize).prop_map(|slot| Op::Remove { slot }),
    ]
}

fn kind_strategy() -> impl Strategy<Value = GraphKind> {
    prop_oneof![Just(GraphKind::Directed), Just(GraphKind::Undirected)]
}

fn triples() -> impl Strategy<Value = Vec<(usize, usize, i64)>> {
    prop::collection::vec((0..5usize, 0..5usize, 1..10i64), 0..12)
}

proptest! {
    #[test]
    fn undirected_reciprocals_stay_paired(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let (mut graph, ids) = lettered(GraphKind::Undirected, 6);
        let mut live: Vec<EdgeId> = Vec::new();

        for op in ops {
            match op {
                Op::Add { from, to, cost } => {
                    let outcome = graph.add_edge(ids[from], ids[to], cost).unwrap();
                    if outcome.is_fresh() {
                        live.push(outcome.id());
                    }
                }
                Op::Remove { slot } => {
                    if !live.is_empty() {
                        let id = live.remove(slot % live.len());
                        prop_assert!(graph.remove_edge(id).was_removed());
                    }
                }
            }
        }

        for (id, edge) in graph.edges() {
            let mirrored = graph.edges().any(|(other_id, other)| {
                other_id != id
                    && other.source() == edge.target()
                    && other.target() == edge.source()
                    && other.cost() == edge.cost()
            });
            prop_assert!(mirrored, "edge {} has no live reciprocal", id);
        }

        // Adjacency lists hold only live handles.
        for vertex_id in graph.vertex_ids() {
            prop_assert_eq!(
                graph.vertex(vertex_id).unwrap().degree(),
                graph.edges_from(vertex_id).count()
            );
        }
    }

    #[test]
    fn equality_tolerates_any_insertion_order(
        (kind, original, shuffled) in (kind_strategy(), triples()).prop_flat_map(|(kind, t)| {
            let shuffled = Just(t.clone()).prop_shuffle();
            (Just(kind), Just(t), shuffled)
        })
    ) {
        let first = build(kind, &original);
        let second = build(kind, &shuffled);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn clone_is_complete(kind in kind_strategy(), edges in triples()) {
        let graph = build(kind, &edges);
        let copy = graph.clone();

        prop_assert_eq!(&copy, &graph);
        prop_assert_eq!(copy.vertex_count(), graph.vertex_count());
        prop_assert_eq!(copy.edge_count(), graph.edge_count());
        for (id, edge) in graph.edges() {
            prop_assert_eq!(copy.edge(id), Some(edge));
        }
    }
}
