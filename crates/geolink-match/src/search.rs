//! Nearest-candidate search over a reference set.

use geolink_model::{Coord, PointSet};

/// Nearest reference record found for a query coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion position in the reference set.
    pub position: usize,
    pub distance_squared: f64,
}

/// A nearest-neighbour search structure built over one reference set.
///
/// Implementations must agree exactly: the smallest squared distance wins
/// and bit-equal distances resolve to the lowest insertion position.
pub trait NearestSearch: Send + Sync {
    fn nearest(&self, query: Coord) -> Option<Neighbor>;
}

/// Pairwise scan over every reference coordinate.
#[derive(Debug, Clone)]
pub struct BruteForceSearch {
    coords: Vec<Coord>,
}

impl BruteForceSearch {
    pub fn new(reference: &PointSet) -> Self {
        Self {
            coords: reference.iter().map(|record| record.coord()).collect(),
        }
    }
}

impl NearestSearch for BruteForceSearch {
    fn nearest(&self, query: Coord) -> Option<Neighbor> {
        let mut best: Option<Neighbor> = None;
        for (position, coord) in self.coords.iter().enumerate() {
            let distance_squared = query.distance_squared(*coord);
            // Strict comparison keeps the earliest of equal candidates.
            if best.is_none_or(|current| distance_squared < current.distance_squared) {
                best = Some(Neighbor {
                    position,
                    distance_squared,
                });
            }
        }
        best
    }
}
