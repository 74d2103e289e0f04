// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::{BTreeMap, Entry};
use std::collections::BTreeSet;
use std::fmt;

/// Represents a weighted directed graph, with vertices identified by `V`
/// and edges carrying a weight of type `W`.
///
/// Every edge target is guaranteed to be a vertex of the graph, and there is
/// at most one edge for every ordered pair of vertices. Undirected connections
/// are represented by two independent directed edges.
///
/// Vertices and neighbors are always iterated in ascending order of their ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<V, W>(BTreeMap<V, BTreeMap<V, W>>);

impl<V, W> Default for Graph<V, W> {
    fn default() -> Self {
        Self(BTreeMap::default())
    }
}

impl<V: Copy + Ord, W: Copy> Graph<V, W> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of (directed) edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(|edges| edges.len()).sum()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether a vertex with the provided id exists in the graph.
    pub fn contains_vertex(&self, v: V) -> bool {
        self.0.contains_key(&v)
    }

    /// Adds a new vertex without any outgoing edges.
    ///
    /// Returns `false` and leaves the graph untouched if the vertex already exists.
    pub fn add_vertex(&mut self, v: V) -> bool {
        match self.0.entry(v) {
            Entry::Vacant(e) => {
                e.insert(BTreeMap::default());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Creates or updates the directed edge from `from` to `to`.
    ///
    /// Returns `false` if either of the endpoints is not a vertex of the graph.
    /// Negative weights are not rejected, but they break
    /// [shortest_paths](crate::shortest_paths).
    pub fn add_edge(&mut self, from: V, to: V, weight: W) -> bool {
        if !self.0.contains_key(&to) {
            return false;
        }

        match self.0.get_mut(&from) {
            Some(edges) => {
                edges.insert(to, weight);
                true
            }
            None => false,
        }
    }

    /// Gets the weight of the edge from `from` to `to`,
    /// or [None] if such an edge doesn't exist.
    pub fn get_weight(&self, from: V, to: V) -> Option<W> {
        self.0.get(&from).and_then(|edges| edges.get(&to)).copied()
    }

    /// Returns the set of all vertices reachable from `v` along a single edge.
    ///
    /// The set is empty if `v` has no outgoing edges or doesn't exist.
    pub fn neighbors(&self, v: V) -> BTreeSet<V> {
        self.0
            .get(&v)
            .map(|edges| edges.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Returns an iterator over all outgoing edges of `v`, as `(to, weight)` pairs.
    pub fn edges(&self, v: V) -> impl Iterator<Item = (V, W)> + '_ {
        self.0
            .get(&v)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&to, &weight)| (to, weight)))
    }

    /// Returns all vertices currently in the graph.
    pub fn vertices(&self) -> Vec<V> {
        self.0.keys().copied().collect()
    }
}

/// Dumps the internal state of the graph, for debugging purposes.
impl<V: Copy + Ord + fmt::Display, W: Copy + fmt::Display> fmt::Display for Graph<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Num vertices: {}", self.vertex_count())?;
        writeln!(f, "**Num edges: {}", self.edge_count())?;
        writeln!(f)?;

        writeln!(f, "**Vertices:")?;
        for (i, v) in self.0.keys().enumerate() {
            writeln!(f, " {}. {}", i + 1, v)?;
        }
        writeln!(f)?;

        writeln!(f, "**Edges:")?;
        for (from, edges) in &self.0 {
            write!(f, " row {}:", from)?;
            for (to, weight) in edges {
                write!(f, " ({},{},{})", from, to, weight)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
