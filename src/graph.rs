// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The graph aggregate - vertex table, edge arena, and mutation rules

use crate::error::{GraphError, Result};
use crate::types::{Edge, EdgeId, GraphKind, Inserted, Removal, Vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Positional comparison key for a vertex: value, weight, out-degree,
/// outgoing cost multiset.
type VertexKey<'a, T> = (&'a T, i64, usize, Vec<i64>);

/// Positional comparison key for an edge: cost, then each endpoint's key.
type EdgeKey<'a, T> = (i64, VertexKey<'a, T>, VertexKey<'a, T>);

/// A weighted graph owning its vertices and edges.
///
/// The graph is the single source of truth: it owns the vertex table and an
/// edge arena with stable slots, and each vertex's adjacency list stores only
/// [`EdgeId`] handles into that arena. Edge slots are tombstoned on removal,
/// so handles held by callers or by other vertices stay valid.
///
/// For an [`GraphKind::Undirected`] graph, every logical connection is
/// materialized as two independent arena entries of equal cost, one in each
/// direction, and every mutation maintains that symmetry.
///
/// # Equality
///
/// Equality is *positional*, not graph isomorphism: two graphs are equal when
/// their kinds match, their vertex and live-edge counts match, and their
/// vertex and edge keys - (value, weight, out-degree, outgoing cost multiset)
/// for vertices, (cost, from-key, to-key) for edges - compare pairwise equal
/// after both sides are independently sorted. Permutation of insertion order
/// is tolerated; any difference in count is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph<T> {
    kind: GraphKind,
    vertices: Vec<Vertex<T>>,
    edges: Vec<Option<Edge>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new(GraphKind::Undirected)
    }
}

impl<T> Graph<T> {
    /// Create an empty graph of the given kind.
    #[must_use]
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Create an empty directed graph.
    #[must_use]
    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    /// Create an empty undirected graph.
    #[must_use]
    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    /// Build a graph from a vertex collection and `(from, to, cost)` triples
    /// indexing into it.
    ///
    /// Any triple whose endpoints are not both present in the supplied
    /// collection is skipped with a warning, not an error. Undirected graphs
    /// materialize reciprocals exactly as [`Graph::add_edge`] does.
    pub fn from_parts<I>(kind: GraphKind, vertices: Vec<Vertex<T>>, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        let mut graph = Self {
            kind,
            vertices,
            edges: Vec::new(),
        };
        // Adjacency is rebuilt from the triples; stale handles carried in
        // with the supplied vertices would index a different arena.
        for vertex in &mut graph.vertices {
            vertex.edges.clear();
        }
        for (from, to, cost) in edges {
            if let Err(err) = graph.add_edge(VertexId(from), VertexId(to), cost) {
                warn!(%err, from, to, cost, "skipping edge with unregistered endpoint");
            }
        }
        graph
    }

    /// The graph's topology.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges.
    ///
    /// An undirected graph counts both directions of every connection.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices in insertion order. [`VertexId`] handles index this slice.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex<T>] {
        &self.vertices
    }

    /// Handles of all vertices in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Look up a vertex by handle.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id.index())
    }

    /// Look up a vertex by handle for mutation (weight updates).
    #[must_use]
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<T>> {
        self.vertices.get_mut(id.index())
    }

    /// Look up an edge by handle. Returns `None` for removed slots.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    /// Look up an edge by handle for mutation (cost updates).
    #[must_use]
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// All live edges with their handles, in arena order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|edge| (EdgeId(index), edge)))
    }

    /// Outgoing edges of a vertex, in adjacency order.
    pub fn edges_from(&self, id: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.vertex(id)
            .map_or(&[][..], |vertex| vertex.edges.as_slice())
            .iter()
            .filter_map(move |&edge_id| self.edge(edge_id).map(|edge| (edge_id, edge)))
    }

    /// Live edges pointing at a vertex, in arena order.
    pub fn edges_into(&self, id: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges().filter(move |(_, edge)| edge.to == id)
    }

    /// First outgoing edge from `from` to `to`, in adjacency order.
    #[must_use]
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.vertex(from)?
            .edges
            .iter()
            .copied()
            .find(|&id| self.edge(id).is_some_and(|edge| edge.to == to))
    }

    /// Whether an edge leads directly from `from` to `to`.
    #[must_use]
    pub fn connects(&self, from: VertexId, to: VertexId) -> bool {
        self.find_edge(from, to).is_some()
    }

    /// Add an edge between two registered vertices.
    ///
    /// Returns [`Inserted::Duplicate`] without mutation if an equal live
    /// edge (same endpoints and cost) already exists. For an undirected
    /// graph a fresh insertion also materializes the reciprocal edge as an
    /// independent arena entry registered on the target vertex's adjacency
    /// list; the returned handle is the primary direction's.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownVertex`] if either handle was not issued by this
    /// graph; on failure nothing is mutated.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, cost: i64) -> Result<Inserted<EdgeId>> {
        if from.index() >= self.vertices.len() {
            return Err(GraphError::UnknownVertex(from));
        }
        if to.index() >= self.vertices.len() {
            return Err(GraphError::UnknownVertex(to));
        }
        if let Some(existing) = self.find_exact_edge(from, to, cost) {
            return Ok(Inserted::Duplicate(existing));
        }
        let id = self.push_edge(Edge { from, to, cost });
        self.vertices[from.index()].edges.push(id);
        if self.kind == GraphKind::Undirected {
            let reciprocal = self.push_edge(Edge {
                from: to,
                to: from,
                cost,
            });
            self.vertices[to.index()].edges.push(reciprocal);
        }
        Ok(Inserted::Fresh(id))
    }

    /// Remove an edge by handle.
    ///
    /// Returns [`Removal::NotFound`] if the slot is vacant or out of range.
    /// For an undirected graph the expected reciprocal (same cost, endpoints
    /// swapped) is located by equality and removed as well; a reciprocal
    /// whose cost was mutated independently after insertion will not match
    /// and is left in place.
    pub fn remove_edge(&mut self, id: EdgeId) -> Removal {
        let Some(edge) = self.edges.get_mut(id.index()).and_then(Option::take) else {
            return Removal::NotFound;
        };
        self.vertices[edge.from.index()].edges.retain(|&e| e != id);
        if self.kind == GraphKind::Undirected {
            if let Some(reciprocal) = self.find_exact_edge(edge.to, edge.from, edge.cost) {
                self.edges[reciprocal.index()] = None;
                self.vertices[edge.to.index()].edges.retain(|&e| e != reciprocal);
            } else {
                debug!(%id, "no reciprocal matched; leaving the other direction in place");
            }
        }
        Removal::Removed
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Some(edge));
        id
    }

    fn find_exact_edge(&self, from: VertexId, to: VertexId, cost: i64) -> Option<EdgeId> {
        self.edges()
            .find(|(_, edge)| edge.from == from && edge.to == to && edge.cost == cost)
            .map(|(id, _)| id)
    }

    /// Outgoing costs of a vertex as a sorted multiset.
    fn outgoing_costs(&self, vertex: &Vertex<T>) -> Vec<i64> {
        let mut costs: Vec<i64> = vertex
            .edges
            .iter()
            .filter_map(|&id| self.edge(id))
            .map(Edge::cost)
            .collect();
        costs.sort_unstable();
        costs
    }

    fn vertex_key<'a>(&'a self, vertex: &'a Vertex<T>) -> VertexKey<'a, T> {
        (
            &vertex.value,
            vertex.weight,
            vertex.degree(),
            self.outgoing_costs(vertex),
        )
    }

    fn edge_key(&self, edge: &Edge) -> EdgeKey<'_, T> {
        (
            edge.cost,
            self.vertex_key(&self.vertices[edge.from.index()]),
            self.vertex_key(&self.vertices[edge.to.index()]),
        )
    }
}

impl<T: PartialEq> Graph<T> {
    /// Add a vertex unless an equal one is already present.
    ///
    /// Duplicate detection uses positional vertex equality: value, weight,
    /// out-degree, and outgoing cost multiset. Adding a vertex never touches
    /// edges.
    pub fn add_vertex(&mut self, vertex: Vertex<T>) -> Inserted<VertexId> {
        let incoming = self.outgoing_costs(&vertex);
        for (index, existing) in self.vertices.iter().enumerate() {
            if existing.value == vertex.value
                && existing.weight == vertex.weight
                && existing.degree() == vertex.degree()
                && self.outgoing_costs(existing) == incoming
            {
                return Inserted::Duplicate(VertexId(index));
            }
        }
        self.vertices.push(vertex);
        Inserted::Fresh(VertexId(self.vertices.len() - 1))
    }

    /// First vertex carrying this value, in insertion order.
    #[must_use]
    pub fn find_vertex_by_value(&self, value: &T) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|vertex| vertex.value == *value)
            .map(VertexId)
    }
}

impl<T: fmt::Display> Graph<T> {
    /// First vertex whose value's string form equals `name`.
    #[must_use]
    pub fn find_vertex_by_name(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|vertex| vertex.value.to_string() == name)
            .map(VertexId)
    }

    /// Export to DOT format for Graphviz.
    ///
    /// Undirected graphs render both materialized directions, which is a
    /// faithful picture of the arena contents.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph pathyard {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for (index, vertex) in self.vertices.iter().enumerate() {
            dot.push_str(&format!(
                "  \"{}\" [label=\"{} ({})\"];\n",
                VertexId(index),
                vertex.value,
                vertex.weight
            ));
        }

        dot.push('\n');

        for (_, edge) in self.edges() {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.from, edge.to, edge.cost
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            writeln!(f, "Value={} weight={}", vertex.value, vertex.weight)?;
            for &id in &vertex.edges {
                if let Some(edge) = self.edge(id) {
                    let from = &self.vertices[edge.from.index()];
                    let to = &self.vertices[edge.to.index()];
                    writeln!(
                        f,
                        "\t[ {}({}) ] -> [ {}({}) ] = {}",
                        from.value(),
                        from.weight(),
                        to.value(),
                        to.weight(),
                        edge.cost()
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl<T: Ord> PartialEq for Graph<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind
            || self.vertices.len() != other.vertices.len()
            || self.edge_count() != other.edge_count()
        {
            return false;
        }

        let mut mine: Vec<_> = self.vertices.iter().map(|v| self.vertex_key(v)).collect();
        let mut theirs: Vec<_> = other.vertices.iter().map(|v| other.vertex_key(v)).collect();
        mine.sort();
        theirs.sort();
        if mine != theirs {
            return false;
        }

        let mut mine: Vec<_> = self.edges().map(|(_, e)| self.edge_key(e)).collect();
        let mut theirs: Vec<_> = other.edges().map(|(_, e)| other.edge_key(e)).collect();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

impl<T: Ord> Eq for Graph<T> {}
