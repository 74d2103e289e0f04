// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest walking routes between buildings, over [OpenStreetMap](https://www.openstreetmap.org/)
//! footways.
//!
//! A [Map] (node positions, footways and buildings) is loaded from an OSM file
//! with the [osm] module, and turned into a weighted directed [Graph] by a [Router].
//! Buildings are matched to the closest footway node with [find_nearest_node], and routes
//! are found with [Dijkstra's algorithm](shortest_paths). All distances are in miles.
//!
//! # Example
//!
//! ```no_run
//! let options = walkroute::osm::Options {
//!     file_format: walkroute::osm::FileFormat::Xml,
//!     bbox: [0.0; 4],
//! };
//! let map = walkroute::osm::load_map_from_file(&options, "path/to/campus.osm")
//!     .expect("failed to load campus.osm");
//!
//! let router = walkroute::Router::new(map);
//! let from = router.map().find_building("SEO").expect("no such building");
//! let to = router.map().find_building("University Hall").expect("no such building");
//! let route = router.route(from, to).expect("failed to find route");
//!
//! println!("{:.4} miles: {:?}", route.distance, route.path);
//! ```

mod dijkstra;
mod distance;
mod graph;
mod map;
mod nearest;
pub mod osm;
mod router;

pub use dijkstra::{shortest_paths, PathError, ShortestPaths, Weight};
pub use distance::earth_distance;
pub use graph::Graph;
pub use map::Map;
pub use nearest::{find_nearest_node, NearestNodeError};
pub use router::{Route, RouteError, Router};

/// Position on Earth, in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Walking path, as a sequence of node ids.
/// Consecutive nodes are directly connected on the ground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footway {
    pub id: i64,
    pub nodes: Vec<i64>,
}

/// Named point of interest which can be navigated between.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub full_name: String,

    /// Short name of the building, e.g. "SEO". May be empty.
    pub abbrev: String,

    pub coordinates: Coordinates,
}
