//! Geo-located records and their coordinates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::RecordId;

/// Nullable numeric attribute value. `None` propagates a missing score.
pub type AttributeValue = Option<f64>;

/// Named attributes attached to a record, ordered by name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Largest accepted absolute coordinate value. Squared distances between
/// coordinates within this bound stay finite.
pub const MAX_COORDINATE_MAGNITUDE: f64 = 1e150;

/// A planar coordinate pair.
///
/// Coordinates are treated as Cartesian values. Geographic input keeps its
/// degrees; no geodesic correction is applied anywhere in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the pair with its axes exchanged.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Every distance comparison in the matcher goes through this function so
    /// that ties are detected on bit-identical values.
    #[must_use]
    pub fn distance_squared(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance(self, other: Coord) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// An entity with an id, a coordinate and numeric attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: RecordId,
    coord: Coord,
    attributes: Attributes,
}

impl Record {
    /// Builds a record from raw values.
    ///
    /// Fails when the id is blank or either coordinate is NaN, infinite or
    /// beyond [`MAX_COORDINATE_MAGNITUDE`].
    pub fn new(id: impl Into<String>, x: f64, y: f64, attributes: Attributes) -> Result<Self> {
        let raw = id.into();
        let id = RecordId::new(raw.clone()).map_err(|_| ModelError::InvalidRecord {
            id: raw,
            reason: "record id is empty".to_string(),
        })?;
        Self::from_parts(id, Coord::new(x, y), attributes)
    }

    pub fn from_parts(id: RecordId, coord: Coord, attributes: Attributes) -> Result<Self> {
        if !coord.is_finite() {
            return Err(ModelError::InvalidRecord {
                id: id.to_string(),
                reason: format!("coordinate ({}, {}) is not finite", coord.x, coord.y),
            });
        }
        if coord.x.abs() > MAX_COORDINATE_MAGNITUDE || coord.y.abs() > MAX_COORDINATE_MAGNITUDE {
            return Err(ModelError::InvalidRecord {
                id: id.to_string(),
                reason: format!(
                    "coordinate ({}, {}) exceeds magnitude {MAX_COORDINATE_MAGNITUDE:e}",
                    coord.x, coord.y
                ),
            });
        }
        Ok(Self {
            id,
            coord,
            attributes,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Value of a named attribute. Absent attributes and null values both
    /// read as `None`.
    pub fn attribute(&self, name: &str) -> AttributeValue {
        self.attributes.get(name).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_coordinates() {
        let err = Record::new("A", f64::NAN, 0.0, Attributes::new()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRecord { ref id, .. } if id == "A"));
    }

    #[test]
    fn rejects_coordinates_beyond_bound() {
        let err = Record::new("A", 1e200, 0.0, Attributes::new()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRecord { ref id, .. } if id == "A"));
        let edge = -MAX_COORDINATE_MAGNITUDE;
        let record = Record::new("B", edge, edge, Attributes::new()).unwrap();
        let far = Coord::new(MAX_COORDINATE_MAGNITUDE, MAX_COORDINATE_MAGNITUDE);
        assert!(record.coord().distance_squared(far).is_finite());
    }

    #[test]
    fn rejects_blank_id() {
        let err = Record::new("  ", 0.0, 0.0, Attributes::new()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRecord { .. }));
    }

    #[test]
    fn missing_and_null_attributes_read_as_none() {
        let mut attributes = Attributes::new();
        attributes.insert("score".to_string(), None);
        attributes.insert("math".to_string(), Some(512.0));
        let record = Record::new("A", 1.0, 2.0, attributes).unwrap();
        assert_eq!(record.attribute("score"), None);
        assert_eq!(record.attribute("absent"), None);
        assert_eq!(record.attribute("math"), Some(512.0));
    }

    #[test]
    fn swapped_exchanges_axes() {
        assert_eq!(Coord::new(-77.0, -12.0).swapped(), Coord::new(-12.0, -77.0));
    }
}
