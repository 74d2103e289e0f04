// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{
    earth_distance, find_nearest_node, shortest_paths, Building, Coordinates, Graph, Map,
    NearestNodeError, PathError, ShortestPaths,
};

/// Error conditions which may occur during [Router::route].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Buildings can't be matched to footway nodes.
    #[error(transparent)]
    NearestNode(#[from] NearestNodeError),

    /// The start node doesn't exist in the graph.
    #[error("invalid start node: {0}")]
    InvalidSource(i64),

    /// The end node doesn't exist in the graph.
    #[error("invalid destination node: {0}")]
    InvalidDestination(i64),

    /// There is no walkable path between the nodes.
    #[error("destination unreachable")]
    Unreachable,
}

/// Shortest walking route between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub start_node: i64,
    pub end_node: i64,

    /// Total length of the route, in miles.
    pub distance: f64,

    /// Node ids along the route, including both `start_node` and `end_node`.
    pub path: Vec<i64>,
}

/// Routing session: owns a [Map] and the walking [Graph] derived from it.
///
/// The graph has a vertex for every map node, and a pair of edges
/// (one in each direction) between every two consecutive footway nodes,
/// weighted by the distance between them in miles.
#[derive(Debug, Clone)]
pub struct Router {
    map: Map,
    graph: Graph<i64, f64>,
}

impl Router {
    /// Builds the walking graph for the provided [Map].
    pub fn new(map: Map) -> Self {
        let graph = build_graph(&map);
        Self { map, graph }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn graph(&self) -> &Graph<i64, f64> {
        &self.graph
    }

    /// Finds the footway node closest to the provided position.
    pub fn nearest_node(&self, pos: Coordinates) -> Result<i64, NearestNodeError> {
        find_nearest_node(pos, &self.map.footways, &self.map.nodes)
    }

    /// Runs [shortest_paths] from the provided node, after checking
    /// that it actually exists in the graph.
    pub fn shortest_paths_from(&self, from: i64) -> Result<ShortestPaths<i64, f64>, RouteError> {
        if !self.graph.contains_vertex(from) {
            return Err(RouteError::InvalidSource(from));
        }
        Ok(shortest_paths(&self.graph, from))
    }

    /// Finds the shortest walking route between two nodes.
    pub fn route_between_nodes(&self, from: i64, to: i64) -> Result<Route, RouteError> {
        let result = self.shortest_paths_from(from)?;

        let path = result.path_to(to).map_err(|e| match e {
            PathError::UnknownDestination => RouteError::InvalidDestination(to),
            PathError::Unreachable => RouteError::Unreachable,
        })?;

        Ok(Route {
            start_node: from,
            end_node: to,
            distance: result.distance_to(to).unwrap_or(f64::INFINITY),
            path,
        })
    }

    /// Finds the shortest walking route between the footway nodes
    /// closest to the provided buildings.
    pub fn route(&self, from: &Building, to: &Building) -> Result<Route, RouteError> {
        let start_node = self.nearest_node(from.coordinates)?;
        let end_node = self.nearest_node(to.coordinates)?;
        log::debug!(
            "routing {:?} ({}) -> {:?} ({})",
            from.full_name,
            start_node,
            to.full_name,
            end_node,
        );
        self.route_between_nodes(start_node, end_node)
    }
}

fn build_graph(map: &Map) -> Graph<i64, f64> {
    let mut g = Graph::new();

    for &node_id in map.nodes.keys() {
        g.add_vertex(node_id);
    }

    for footway in &map.footways {
        for pair in footway.nodes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let (Some(a), Some(b)) = (map.nodes.get(&from), map.nodes.get(&to)) else {
                log::warn!(
                    "footway {}: segment {} - {} references an unknown node - skipping",
                    footway.id,
                    from,
                    to,
                );
                continue;
            };

            let distance = earth_distance(a.lat, a.lon, b.lat, b.lon);
            g.add_edge(from, to, distance);
            g.add_edge(to, from, distance);
        }
    }

    log::info!(
        "walking graph has {} vertices and {} edges",
        g.vertex_count(),
        g.edge_count(),
    );
    g
}
