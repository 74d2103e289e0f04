// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::{earth_distance, Coordinates, Footway};

/// Error returned by [find_nearest_node].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NearestNodeError {
    /// None of the footways reference a node with known coordinates.
    #[error("no footway nodes to match against")]
    NoFootwayNodes,
}

/// Finds the footway node closest to the `target` position.
///
/// Only nodes referenced by at least one [Footway] are considered, and their positions
/// are taken from `coordinates`. Footway nodes without known coordinates are skipped.
/// On ties, the node encountered first wins.
///
/// This function requires computing the distance to every footway node,
/// and is not suitable for large maps.
pub fn find_nearest_node(
    target: Coordinates,
    footways: &[Footway],
    coordinates: &BTreeMap<i64, Coordinates>,
) -> Result<i64, NearestNodeError> {
    let mut best: Option<(i64, f64)> = None;

    for &node_id in footways.iter().flat_map(|f| f.nodes.iter()) {
        let Some(pos) = coordinates.get(&node_id) else {
            log::warn!("footway node {} has no coordinates - skipping", node_id);
            continue;
        };

        let dist = earth_distance(target.lat, target.lon, pos.lat, pos.lon);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((node_id, dist));
        }
    }

    best.map(|(node_id, _)| node_id)
        .ok_or(NearestNodeError::NoFootwayNodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates() -> BTreeMap<i64, Coordinates> {
        BTreeMap::from([
            (1, Coordinates::new(41.8700, -87.6500)),
            (2, Coordinates::new(41.8710, -87.6500)),
            (3, Coordinates::new(41.8720, -87.6500)),
            (4, Coordinates::new(41.8720, -87.6480)),
            (5, Coordinates::new(41.8730, -87.6480)),
            (9, Coordinates::new(41.8715, -87.6490)),
        ])
    }

    fn footways() -> Vec<Footway> {
        vec![
            Footway {
                id: 100,
                nodes: vec![1, 2, 3],
            },
            Footway {
                id: 101,
                nodes: vec![3, 4, 5],
            },
        ]
    }

    #[test]
    fn finds_closest() {
        let c = coordinates();
        let f = footways();

        assert_eq!(
            find_nearest_node(Coordinates::new(41.8701, -87.6501), &f, &c),
            Ok(1)
        );
        assert_eq!(
            find_nearest_node(Coordinates::new(41.8721, -87.6482), &f, &c),
            Ok(4)
        );
        assert_eq!(
            find_nearest_node(Coordinates::new(41.8800, -87.6400), &f, &c),
            Ok(5)
        );
    }

    #[test]
    fn independent_of_footway_order() {
        let c = coordinates();
        let mut f = footways();
        let target = Coordinates::new(41.8719, -87.6499);

        assert_eq!(find_nearest_node(target, &f, &c), Ok(3));
        f.reverse();
        assert_eq!(find_nearest_node(target, &f, &c), Ok(3));
        f.iter_mut().for_each(|f| f.nodes.reverse());
        assert_eq!(find_nearest_node(target, &f, &c), Ok(3));
    }

    #[test]
    fn ignores_nodes_outside_footways() {
        // Node 9 is the closest one, but it isn't a part of any footway
        let target = Coordinates::new(41.8712, -87.6492);
        assert_eq!(
            find_nearest_node(target, &footways(), &coordinates()),
            Ok(2)
        );
    }

    #[test]
    fn exact_match() {
        let target = Coordinates::new(41.8730, -87.6480);
        assert_eq!(
            find_nearest_node(target, &footways(), &coordinates()),
            Ok(5)
        );
    }

    #[test]
    fn skips_nodes_without_coordinates() {
        let f = vec![Footway {
            id: 100,
            nodes: vec![404, 1, 405],
        }];
        assert_eq!(
            find_nearest_node(Coordinates::new(0.0, 0.0), &f, &coordinates()),
            Ok(1)
        );
    }

    #[test]
    fn no_footway_nodes() {
        let c = coordinates();
        let target = Coordinates::new(41.87, -87.65);

        assert_eq!(
            find_nearest_node(target, &[], &c),
            Err(NearestNodeError::NoFootwayNodes)
        );

        let empty = vec![Footway {
            id: 100,
            nodes: vec![],
        }];
        assert_eq!(
            find_nearest_node(target, &empty, &c),
            Err(NearestNodeError::NoFootwayNodes)
        );

        let unknown = vec![Footway {
            id: 100,
            nodes: vec![404],
        }];
        assert_eq!(
            find_nearest_node(target, &unknown, &c),
            Err(NearestNodeError::NoFootwayNodes)
        );
    }
}
