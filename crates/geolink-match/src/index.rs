//! R-tree backed nearest-neighbour search.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use geolink_model::{Coord, PointSet};

use crate::search::{NearestSearch, Neighbor};

/// A reference coordinate tagged with its insertion position.
#[derive(Clone, Debug)]
struct IndexedPoint {
    coord: Coord,
    position: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coord.to_array())
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        Coord::new(point[0], point[1]).distance_squared(self.coord)
    }
}

/// Spatial index over a reference set.
///
/// Candidates come out of the tree in non-decreasing distance. Every
/// candidate at the minimum distance is visited so that ties still resolve
/// to the lowest insertion position.
pub struct RTreeSearch {
    tree: RTree<IndexedPoint>,
}

impl RTreeSearch {
    pub fn new(reference: &PointSet) -> Self {
        let points: Vec<IndexedPoint> = reference
            .iter()
            .enumerate()
            .map(|(position, record)| IndexedPoint {
                coord: record.coord(),
                position,
            })
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl NearestSearch for RTreeSearch {
    fn nearest(&self, query: Coord) -> Option<Neighbor> {
        let p = query.to_array();
        let mut candidates = self.tree.nearest_neighbor_iter(&p);
        let first = candidates.next()?;
        let mut best = Neighbor {
            position: first.position,
            distance_squared: query.distance_squared(first.coord),
        };
        for candidate in candidates {
            let distance_squared = query.distance_squared(candidate.coord);
            if distance_squared > best.distance_squared {
                break;
            }
            if candidate.position < best.position {
                best.position = candidate.position;
            }
        }
        Some(best)
    }
}
