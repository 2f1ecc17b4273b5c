//! Data model for nearest-neighbour school matching.
//!
//! Records carry an explicit id next to their coordinate throughout, so a
//! match is always resolved by id and never by comparing geometries.

pub mod error;
pub mod ids;
pub mod linkage;
pub mod point_set;
pub mod projection;
pub mod record;

pub use error::{ModelError, Result};
pub use ids::RecordId;
pub use linkage::{Connector, Linkage, LinkedRecord, MatchResult};
pub use point_set::PointSet;
pub use projection::{AttributeProjection, AttributeRename};
pub use record::{AttributeValue, Attributes, Coord, MAX_COORDINATE_MAGNITUDE, Record};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_rejects_duplicate_targets() {
        let err = AttributeProjection::new([("a", "out"), ("b", "out")]).unwrap_err();
        assert!(matches!(err, ModelError::InvalidProjection(_)));
    }

    #[test]
    fn match_result_serializes() {
        let result = MatchResult {
            query_id: RecordId::new("Q1").unwrap(),
            query_coord: Coord::new(1.0, 0.0),
            matched_id: RecordId::new("A").unwrap(),
            matched_coord: Coord::new(0.0, 0.0),
            distance: 1.0,
        };
        let json = serde_json::to_value(&result).expect("serialize match");
        assert_eq!(json["query_id"], "Q1");
        assert_eq!(json["matched_id"], "A");
        assert_eq!(json["distance"], 1.0);
    }
}
