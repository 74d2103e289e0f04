// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::{Building, Coordinates, Footway};

/// In-memory representation of a walkable map: positions of all known nodes,
/// the footways connecting them, and the buildings which can be navigated between.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Map {
    pub nodes: BTreeMap<i64, Coordinates>,
    pub footways: Vec<Footway>,
    pub buildings: Vec<Building>,
}

impl Map {
    /// Finds the first [Building] whose abbreviation is exactly `query`,
    /// or whose full name contains `query`.
    ///
    /// Buildings are checked in map order, and the first match of either kind wins.
    /// An empty query never matches anything.
    pub fn find_building(&self, query: &str) -> Option<&Building> {
        if query.is_empty() {
            return None;
        }

        self.buildings
            .iter()
            .find(|b| b.abbrev == query || b.full_name.contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(full_name: &str, abbrev: &str) -> Building {
        Building {
            full_name: full_name.to_string(),
            abbrev: abbrev.to_string(),
            coordinates: Coordinates::new(41.87, -87.65),
        }
    }

    fn map() -> Map {
        Map {
            buildings: vec![
                building("Science and Engineering Offices", "SEO"),
                building("Science and Engineering Labs", "SEL"),
                building("Student Center East", "SCE"),
                building("University Hall", "UH"),
            ],
            ..Map::default()
        }
    }

    #[test]
    fn find_by_abbreviation() {
        let m = map();
        assert_eq!(m.find_building("SEL").unwrap().full_name, "Science and Engineering Labs");
        assert_eq!(m.find_building("UH").unwrap().full_name, "University Hall");
    }

    #[test]
    fn find_by_partial_name() {
        let m = map();
        assert_eq!(m.find_building("Center").unwrap().abbrev, "SCE");
        assert_eq!(m.find_building("Labs").unwrap().abbrev, "SEL");
    }

    #[test]
    fn first_match_wins() {
        let m = map();
        assert_eq!(m.find_building("Science").unwrap().abbrev, "SEO");
    }

    #[test]
    fn case_sensitive() {
        let m = map();
        assert!(m.find_building("uh").is_none());
        assert!(m.find_building("university hall").is_none());
    }

    #[test]
    fn not_found() {
        let m = map();
        assert!(m.find_building("Library").is_none());
        assert!(m.find_building("").is_none());
    }
}
