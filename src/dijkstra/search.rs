// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::{Graph, PathError, Weight};

#[derive(Debug, Clone, Copy)]
struct QueueItem<V, W> {
    at: V,
    distance: W,
}

impl<V: Ord, W: Weight> PartialEq for QueueItem<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord, W: Weight> Eq for QueueItem<V, W> {}

impl<V: Ord, W: Weight> PartialOrd for QueueItem<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, W: Weight> Ord for QueueItem<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower distances (and then lower ids) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// Result of a single-source [shortest_paths] search.
///
/// Holds the shortest known distance from the source to every vertex of the graph
/// ([Weight::INFINITY] for unreachable vertices), and the vertex immediately preceding
/// every reached vertex on one of its shortest paths.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V, W> {
    source: V,
    distances: HashMap<V, W>,
    predecessors: HashMap<V, Option<V>>,
}

impl<V: Eq + Hash, W: PartialEq> PartialEq for ShortestPaths<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.distances == other.distances
            && self.predecessors == other.predecessors
    }
}

impl<V: Copy + Eq + Hash, W: Weight> ShortestPaths<V, W> {
    /// Returns the vertex from which the search was started.
    pub fn source(&self) -> V {
        self.source
    }

    /// Returns the distance map, covering every vertex of the searched graph.
    pub fn distances(&self) -> &HashMap<V, W> {
        &self.distances
    }

    /// Returns the predecessor map, covering every vertex of the searched graph.
    /// The source and all unreachable vertices have no predecessor.
    pub fn predecessors(&self) -> &HashMap<V, Option<V>> {
        &self.predecessors
    }

    /// Splits the result into the distance and predecessor maps.
    pub fn into_parts(self) -> (HashMap<V, W>, HashMap<V, Option<V>>) {
        (self.distances, self.predecessors)
    }

    /// Returns the shortest distance from the source to `v`,
    /// or [None] if `v` is not a vertex of the searched graph.
    pub fn distance_to(&self, v: V) -> Option<W> {
        self.distances.get(&v).copied()
    }

    /// Returns the vertex preceding `v` on its shortest path from the source.
    pub fn predecessor_of(&self, v: V) -> Option<V> {
        self.predecessors.get(&v).copied().flatten()
    }

    /// Checks whether there is a path from the source to `v`.
    pub fn is_reachable(&self, v: V) -> bool {
        self.distance_to(v).is_some_and(|d| !d.is_infinite())
    }

    /// Reconstructs the shortest path from the source to `to`, by following predecessors
    /// backwards. Both endpoints are included in the result.
    pub fn path_to(&self, to: V) -> Result<Vec<V>, PathError> {
        let distance = self.distance_to(to).ok_or(PathError::UnknownDestination)?;
        if distance.is_infinite() {
            return Err(PathError::Unreachable);
        }

        let mut path = vec![to];
        let mut last = to;
        while last != self.source {
            last = self.predecessor_of(last).ok_or(PathError::Unreachable)?;
            path.push(last);
        }

        path.reverse();
        Ok(path)
    }
}

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// to find the shortest distances from `source` to all vertices of the graph.
///
/// All edge weights must be non-negative. When multiple vertices have the same
/// tentative distance, the one with the lowest id is settled first, which makes
/// the predecessor chains deterministic even if there are multiple shortest paths.
///
/// `source` must be a vertex of the graph; otherwise the result is meaningless
/// (every vertex but `source` is unreachable).
pub fn shortest_paths<V, W>(g: &Graph<V, W>, source: V) -> ShortestPaths<V, W>
where
    V: Copy + Ord + Hash + Debug,
    W: Weight,
{
    let vertices = g.vertices();
    let mut distances: HashMap<V, W> = vertices.iter().map(|&v| (v, W::INFINITY)).collect();
    let mut predecessors: HashMap<V, Option<V>> = vertices.iter().map(|&v| (v, None)).collect();
    let mut visited: HashSet<V> = HashSet::default();
    let mut queue: BinaryHeap<QueueItem<V, W>> = BinaryHeap::default();

    distances.insert(source, W::ZERO);
    queue.push(QueueItem {
        at: source,
        distance: W::ZERO,
    });

    while let Some(item) = queue.pop() {
        // Everything left in the queue is unreachable
        if item.distance.is_infinite() {
            break;
        }

        // The queue might hold multiple items for the same vertex;
        // only the first (cheapest) one is expanded.
        if !visited.insert(item.at) {
            continue;
        }

        for (neighbor, weight) in g.edges(item.at) {
            let alternative = item.distance + weight;
            let known = distances.get(&neighbor).copied().unwrap_or(W::INFINITY);

            if alternative < known {
                distances.insert(neighbor, alternative);
                predecessors.insert(neighbor, Some(item.at));
                queue.push(QueueItem {
                    at: neighbor,
                    distance: alternative,
                });
            }
        }
    }

    log::debug!(
        "dijkstra from {:?}: settled {} of {} vertices",
        source,
        visited.len(),
        vertices.len(),
    );

    ShortestPaths {
        source,
        distances,
        predecessors,
    }
}
