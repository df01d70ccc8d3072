// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Pathyard library - Railway yard for weighted graphs
//!
//! This crate provides a generic, reusable graph container supporting both
//! directed and undirected topologies, plus the cost-annotated value types
//! (cost/vertex pairs, cost/path pairs) that priority-queue-driven search
//! algorithms consume. The container itself implements no path-finding; it is
//! the scaffolding such algorithms are layered on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod graph;

/// Core data types for the graph container
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::cmp::Ordering;
    use std::fmt;

    // =========================================================================
    // Handles
    // =========================================================================

    /// Stable handle to a vertex in a [`crate::graph::Graph`].
    ///
    /// Handles are issued by the owning graph and index its vertex table.
    /// Vertices are never removed, so a handle stays valid for the life of
    /// the graph (and of any clone of it).
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct VertexId(pub(crate) usize);

    impl VertexId {
        /// Position of the vertex in the graph's vertex table.
        #[must_use]
        pub fn index(self) -> usize {
            self.0
        }
    }

    impl fmt::Display for VertexId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "v{}", self.0)
        }
    }

    /// Stable handle to an edge in a [`crate::graph::Graph`].
    ///
    /// Edge slots are tombstoned on removal rather than compacted, so
    /// removing one edge never invalidates the handles of the others.
    #[derive(
        Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct EdgeId(pub(crate) usize);

    impl EdgeId {
        /// Position of the edge slot in the graph's edge arena.
        #[must_use]
        pub fn index(self) -> usize {
            self.0
        }
    }

    impl fmt::Display for EdgeId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "e{}", self.0)
        }
    }

    // =========================================================================
    // Graph Kind
    // =========================================================================

    /// Topology of a graph, fixed at construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum GraphKind {
        /// Edges have a single traversal direction; no reciprocal is created.
        Directed,
        /// Every logical connection is represented by two directed edges of
        /// equal cost, one in each direction.
        Undirected,
    }

    impl Default for GraphKind {
        fn default() -> Self {
            Self::Undirected
        }
    }

    // =========================================================================
    // Vertex
    // =========================================================================

    /// A labeled node carrying a comparable value, an integer weight, planar
    /// coordinates, and its outgoing adjacency list.
    ///
    /// The value is the vertex's identity key and is immutable once set; the
    /// weight may be updated through [`crate::graph::Graph::vertex_mut`].
    /// Vertex equality is positional and resolved through the owning graph
    /// (value, weight, out-degree, outgoing cost multiset) - see the equality
    /// notes on [`crate::graph::Graph`]. Coordinates take no part in it.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Vertex<T> {
        pub(crate) value: T,
        pub(crate) weight: i64,
        pub(crate) x: f64,
        pub(crate) y: f64,
        pub(crate) edges: Vec<EdgeId>,
    }

    impl<T> Vertex<T> {
        /// Create a vertex with a value and a weight.
        ///
        /// The planar coordinates default to `x = y = weight`.
        #[allow(clippy::cast_precision_loss)]
        #[must_use]
        pub fn new(value: T, weight: i64) -> Self {
            Self {
                value,
                weight,
                x: weight as f64,
                y: weight as f64,
                edges: Vec::new(),
            }
        }

        /// Create a vertex with explicit planar coordinates and weight 0.
        #[must_use]
        pub fn with_position(value: T, x: f64, y: f64) -> Self {
            Self {
                value,
                weight: 0,
                x,
                y,
                edges: Vec::new(),
            }
        }

        /// The vertex's identity value.
        #[must_use]
        pub fn value(&self) -> &T {
            &self.value
        }

        /// The vertex's weight.
        #[must_use]
        pub fn weight(&self) -> i64 {
            self.weight
        }

        /// Update the vertex's weight.
        pub fn set_weight(&mut self, weight: i64) {
            self.weight = weight;
        }

        /// X coordinate.
        #[must_use]
        pub fn x(&self) -> f64 {
            self.x
        }

        /// Y coordinate.
        #[must_use]
        pub fn y(&self) -> f64 {
            self.y
        }

        /// Outgoing edges in insertion order.
        ///
        /// Handles resolve through the graph that owns this vertex.
        #[must_use]
        pub fn edges(&self) -> &[EdgeId] {
            &self.edges
        }

        /// Number of outgoing edges.
        #[must_use]
        pub fn degree(&self) -> usize {
            self.edges.len()
        }
    }

    // =========================================================================
    // Edge
    // =========================================================================

    /// A directed, cost-weighted connection between two vertices.
    ///
    /// Both endpoints are always present; the handle type replaces the null
    /// checks of looser object models. Edges are directed by construction
    /// regardless of the owning graph's kind - undirected graphs hold two
    /// independent `Edge` entries per logical connection, and mutating one
    /// entry's cost does not propagate to its reciprocal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Edge {
        pub(crate) from: VertexId,
        pub(crate) to: VertexId,
        pub(crate) cost: i64,
    }

    impl Edge {
        /// Source vertex handle.
        #[must_use]
        pub fn source(&self) -> VertexId {
            self.from
        }

        /// Target vertex handle.
        #[must_use]
        pub fn target(&self) -> VertexId {
            self.to
        }

        /// Traversal cost.
        #[must_use]
        pub fn cost(&self) -> i64 {
            self.cost
        }

        /// Update the traversal cost.
        ///
        /// In an undirected graph this touches one direction only; callers
        /// needing both directions updated must update the reciprocal too.
        pub fn set_cost(&mut self, cost: i64) {
            self.cost = cost;
        }
    }

    // =========================================================================
    // Mutation Outcomes
    // =========================================================================

    /// Outcome of an insertion, carrying the relevant handle either way.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[must_use = "the outcome reports whether the insertion was applied"]
    pub enum Inserted<I> {
        /// The element was not present and has been appended.
        Fresh(I),
        /// An equal element was already present; nothing changed.
        Duplicate(I),
    }

    impl<I: Copy> Inserted<I> {
        /// Handle of the inserted or pre-existing element.
        pub fn id(self) -> I {
            match self {
                Self::Fresh(id) | Self::Duplicate(id) => id,
            }
        }

        /// Whether the insertion actually appended a new element.
        #[must_use = "query the outcome instead of discarding it"]
        pub fn is_fresh(self) -> bool {
            matches!(self, Self::Fresh(_))
        }
    }

    /// Outcome of a removal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[must_use = "the outcome reports whether the removal was applied"]
    pub enum Removal {
        /// The element was present and has been removed.
        Removed,
        /// No matching element was found; nothing changed.
        NotFound,
    }

    impl Removal {
        /// Whether anything was removed.
        #[must_use = "query the outcome instead of discarding it"]
        pub fn was_removed(self) -> bool {
            matches!(self, Self::Removed)
        }
    }

    // =========================================================================
    // Cost Pairs
    // =========================================================================

    /// An ordering-capable (cost, vertex) pairing for priority-queue-driven
    /// search algorithms.
    ///
    /// Ordering is by cost alone and is deliberately coarser than equality:
    /// two pairs with equal cost but different vertices compare as equal in
    /// ordering while remaining unequal values. A min-first queue is
    /// `BinaryHeap<Reverse<CostVertexPair>>`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CostVertexPair {
        cost: i64,
        vertex: VertexId,
    }

    impl CostVertexPair {
        /// Pair a traversal cost with a vertex handle.
        #[must_use]
        pub fn new(cost: i64, vertex: VertexId) -> Self {
            Self { cost, vertex }
        }

        /// Accumulated cost of reaching the vertex.
        #[must_use]
        pub fn cost(&self) -> i64 {
            self.cost
        }

        /// Update the accumulated cost.
        pub fn set_cost(&mut self, cost: i64) {
            self.cost = cost;
        }

        /// The vertex this cost applies to.
        #[must_use]
        pub fn vertex(&self) -> VertexId {
            self.vertex
        }
    }

    impl PartialOrd for CostVertexPair {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for CostVertexPair {
        fn cmp(&self, other: &Self) -> Ordering {
            self.cost.cmp(&other.cost)
        }
    }

    /// An accumulated (total cost, edge sequence) result representing one
    /// computed path.
    ///
    /// An empty path is a valid result. Equality compares the total cost and
    /// the full edge sequence, including length.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CostPathPair {
        cost: i64,
        path: Vec<EdgeId>,
    }

    impl CostPathPair {
        /// Pair a total cost with the ordered edges forming one path.
        #[must_use]
        pub fn new(cost: i64, path: Vec<EdgeId>) -> Self {
            Self { cost, path }
        }

        /// Total cost of the path.
        #[must_use]
        pub fn cost(&self) -> i64 {
            self.cost
        }

        /// Update the total cost.
        pub fn set_cost(&mut self, cost: i64) {
            self.cost = cost;
        }

        /// The edges forming the path, in traversal order.
        #[must_use]
        pub fn path(&self) -> &[EdgeId] {
            &self.path
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{GraphError, Result};
    pub use crate::graph::Graph;
    pub use crate::types::{
        CostPathPair, CostVertexPair, Edge, EdgeId, GraphKind, Inserted, Removal, Vertex,
        VertexId,
    };
}
