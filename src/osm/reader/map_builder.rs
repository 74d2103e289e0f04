// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::btree_map::Entry;

use crate::{Building, Coordinates, Footway, Map};

use super::{model, FeatureReader, Options};

/// Helper object used for storing state related to converting [OSM features](super::model::Feature)
/// into a [Map].
pub(super) struct MapBuilder<'a> {
    map: Map,
    options: &'a Options,
    ignore_bbox: bool,
}

impl<'a> MapBuilder<'a> {
    /// Create a new builder with an empty map.
    pub(super) fn new(options: &'a Options) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());

        Self {
            map: Map::default(),
            options,
            ignore_bbox,
        }
    }

    /// Add all features from the provided [FeatureReader] and return the resulting [Map].
    pub(super) fn build<F: FeatureReader>(mut self, mut features: F) -> Result<Map, F::Error> {
        while let Some(f) = features.next_feature()? {
            self.add_feature(f);
        }

        log::info!(
            "loaded {} nodes, {} footways and {} buildings",
            self.map.nodes.len(),
            self.map.footways.len(),
            self.map.buildings.len(),
        );
        Ok(self.map)
    }

    fn add_feature(&mut self, f: model::Feature) {
        match f {
            model::Feature::Node(n) => self.add_node(n),
            model::Feature::Way(w) => self.add_way(w),
        }
    }

    fn add_node(&mut self, n: model::Node) {
        if !self.is_in_bbox(n.pos) {
            return;
        }

        match self.map.nodes.entry(n.id) {
            Entry::Vacant(e) => {
                e.insert(n.pos);
            }
            Entry::Occupied(_) => log::warn!("duplicate node {} - keeping the first one", n.id),
        }
    }

    fn is_in_bbox(&self, pos: Coordinates) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        pos.lat >= min_lat && pos.lat <= max_lat && pos.lon >= min_lon && pos.lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        if is_footway(&w) {
            self.add_footway(w);
        } else if w.has_tag("building", "university") {
            self.add_building(w);
        }
    }

    fn add_footway(&mut self, w: model::Way) {
        let runs = self.get_way_runs(&w);
        if runs.is_empty() {
            log::warn!("footway {} has less than 2 consecutive known nodes - skipping", w.id);
            return;
        }

        for nodes in runs {
            self.map.footways.push(Footway { id: w.id, nodes });
        }
    }

    fn add_building(&mut self, w: model::Way) {
        let Some(full_name) = w.tags.get("name") else {
            log::warn!("building {} has no name - skipping", w.id);
            return;
        };

        let Some(coordinates) = self.get_way_center(&w) else {
            log::warn!("building {} has no known nodes - skipping", w.id);
            return;
        };

        self.map.buildings.push(Building {
            full_name: full_name.clone(),
            abbrev: w.tags.get("ref").cloned().unwrap_or_default(),
            coordinates,
        });
    }

    /// Splits the nodes of a way on references to unknown nodes, returning
    /// only the runs of at least 2 consecutive known nodes.
    fn get_way_runs(&self, w: &model::Way) -> Vec<Vec<i64>> {
        w.nodes
            .split(|node_id| !self.map.nodes.contains_key(node_id))
            .filter(|run| run.len() >= 2)
            .map(|run| run.to_vec())
            .collect()
    }

    /// Returns the mean position of all known nodes of a way.
    /// The closing node of a closed way is only counted once.
    fn get_way_center(&self, w: &model::Way) -> Option<Coordinates> {
        let nodes = match w.nodes.as_slice() {
            [first, rest @ .., last] if first == last && !rest.is_empty() => &w.nodes[1..],
            all => all,
        };

        let (count, lat_sum, lon_sum) = nodes
            .iter()
            .filter_map(|node_id| self.map.nodes.get(node_id))
            .fold((0_usize, 0.0, 0.0), |(count, lat, lon), pos| {
                (count + 1, lat + pos.lat, lon + pos.lon)
            });

        if count > 0 {
            Some(Coordinates::new(
                lat_sum / count as f64,
                lon_sum / count as f64,
            ))
        } else {
            None
        }
    }
}

fn is_footway(w: &model::Way) -> bool {
    w.has_tag("highway", "footway") || w.has_tag("area:highway", "footway")
}

#[cfg(test)]
mod tests {
    use super::super::{xml, FileFormat};
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    const CAMPUS_XML: &[u8] = include_bytes!("test_fixtures/campus.osm");

    fn build(bbox: [f64; 4]) -> Map {
        let options = Options {
            file_format: FileFormat::Xml,
            bbox,
        };
        MapBuilder::new(&options)
            .build(xml::Reader::from_buffer(CAMPUS_XML))
            .unwrap()
    }

    #[test]
    fn nodes() {
        let m = build([0.0; 4]);
        assert_eq!(m.nodes.len(), 23);
        assert_eq!(m.nodes[&4], Coordinates::new(41.8715, -87.6490));
        assert!(m.nodes.contains_key(&51));
        assert!(!m.nodes.contains_key(&52));
    }

    #[test]
    fn nodes_in_bbox() {
        let m = build([-87.7, 41.7, -87.5, 41.9]);
        assert_eq!(m.nodes.len(), 22);
        assert!(m.nodes.contains_key(&50));
        assert!(!m.nodes.contains_key(&51));
    }

    #[test]
    fn invalid_bbox_is_ignored() {
        let m = build([-87.7, 41.7, f64::NAN, 41.9]);
        assert_eq!(m.nodes.len(), 23);
    }

    #[test]
    fn footways() {
        let m = build([0.0; 4]);
        assert_eq!(
            m.footways,
            vec![
                Footway {
                    id: 100,
                    nodes: vec![1, 2, 3, 4, 5],
                },
                Footway {
                    id: 101,
                    nodes: vec![5, 6, 7, 1],
                },
                Footway {
                    id: 102,
                    nodes: vec![8, 9],
                },
            ]
        );
    }

    #[test]
    fn footways_split_on_nodes_outside_bbox() {
        const DATA: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6">
  <node id="1" lat="41.8700" lon="-87.6500"/>
  <node id="2" lat="41.8700" lon="-87.5000"/>
  <node id="3" lat="41.8705" lon="-87.6500"/>
  <node id="4" lat="41.8710" lon="-87.6500"/>
  <node id="5" lat="41.8715" lon="-87.6500"/>
  <way id="100">
    <nd ref="1"/>
    <nd ref="4"/>
    <nd ref="2"/>
    <nd ref="3"/>
    <nd ref="5"/>
    <tag k="highway" v="footway"/>
  </way>
  <way id="101">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="3"/>
    <tag k="highway" v="footway"/>
  </way>
</osm>
"#;

        let options = Options {
            file_format: FileFormat::Xml,
            bbox: [-87.7, 41.86, -87.6, 41.88],
        };
        let m = MapBuilder::new(&options)
            .build(xml::Reader::from_buffer(DATA))
            .unwrap();

        assert!(!m.nodes.contains_key(&2));
        assert_eq!(
            m.footways,
            vec![
                Footway {
                    id: 100,
                    nodes: vec![1, 4],
                },
                Footway {
                    id: 100,
                    nodes: vec![3, 5],
                },
            ]
        );

        // The way leaves the box between 4 and 3, so they can't be walked between
        let router = crate::Router::new(m);
        assert!(router.graph().get_weight(4, 3).is_none());
        assert!(router.graph().get_weight(1, 3).is_none());
        assert_eq!(
            router.route_between_nodes(1, 3),
            Err(crate::RouteError::Unreachable)
        );
    }

    #[test]
    fn buildings() {
        let m = build([0.0; 4]);
        assert_eq!(m.buildings.len(), 3);

        let seo = &m.buildings[0];
        assert_eq!(seo.full_name, "Science and Engineering Offices");
        assert_eq!(seo.abbrev, "SEO");
        assert_almost_eq!(seo.coordinates.lat, 41.8702);
        assert_almost_eq!(seo.coordinates.lon, -87.6510);

        let uh = &m.buildings[1];
        assert_eq!(uh.full_name, "University Hall");
        assert_eq!(uh.abbrev, "UH");
        assert_almost_eq!(uh.coordinates.lat, 41.8712);
        assert_almost_eq!(uh.coordinates.lon, -87.6477);

        let gym = &m.buildings[2];
        assert_eq!(gym.full_name, "Gym");
        assert_eq!(gym.abbrev, "");
        assert_almost_eq!(gym.coordinates.lat, 41.8722);
        assert_almost_eq!(gym.coordinates.lon, -87.6433);
    }

    #[test]
    fn buildings_outside_bbox() {
        // Only the SEO building fits in the box
        let m = build([-87.652, 41.869, -87.650, 41.871]);
        assert_eq!(m.buildings.len(), 1);
        assert_eq!(m.buildings[0].abbrev, "SEO");
    }
}
