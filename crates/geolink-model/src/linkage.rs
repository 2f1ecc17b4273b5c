//! Output types of the matching engine.

use serde::Serialize;

use crate::ids::RecordId;
use crate::record::{AttributeValue, Coord};

/// Nearest reference record for one query record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub query_id: RecordId,
    pub query_coord: Coord,
    pub matched_id: RecordId,
    pub matched_coord: Coord,
    /// Planar Euclidean distance between the two coordinates.
    pub distance: f64,
}

/// A query record carrying attributes imputed from its match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedRecord {
    pub query_id: RecordId,
    pub matched_id: RecordId,
    pub distance: f64,
    /// Renamed attributes in projection order.
    pub attributes: Vec<(String, AttributeValue)>,
}

impl LinkedRecord {
    pub fn attribute(&self, key: &str) -> Option<AttributeValue> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }
}

/// Straight segment from a query point to its matched point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub query_id: RecordId,
    pub matched_id: RecordId,
    pub start: Coord,
    pub end: Coord,
}

impl Connector {
    pub fn endpoints(&self) -> [Coord; 2] {
        [self.start, self.end]
    }
}

/// Linked records together with their connector geometries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Linkage {
    pub records: Vec<LinkedRecord>,
    pub connectors: Vec<Connector>,
}

impl Linkage {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
