// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::Coordinates;

/// Represents an [OSM node](https://wiki.openstreetmap.org/wiki/Node).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub pos: Coordinates,
}

/// Represents an [OSM way](https://wiki.openstreetmap.org/wiki/Way).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: HashMap<String, String>,
}

impl Way {
    /// Checks whether the way has a tag `key` with value `value`.
    pub fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tags.get(key).is_some_and(|v| v == value)
    }
}

/// OSM features relevant for building a [Map](crate::Map).
/// [Relations](https://wiki.openstreetmap.org/wiki/Relation) are skipped by the readers.
#[derive(Debug, Clone)]
pub enum Feature {
    Node(Node),
    Way(Way),
}
