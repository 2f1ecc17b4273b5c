//! Nearest-neighbour matching engine.
//!
//! [`NearestMatcher`] pairs every query record with its closest reference
//! record; [`build_linkage`] turns those pairs into imputed attribute rows
//! and connector segments. Neither performs I/O.
//!
//! # Example
//!
//! ```
//! use geolink_match::{build_linkage, match_points, LinkOptions};
//! use geolink_model::{AttributeProjection, Attributes, PointSet};
//!
//! let mut scores = Attributes::new();
//! scores.insert("score".to_string(), Some(510.0));
//! let reference = PointSet::from_tuples([
//!     ("A", 0.0, 0.0, scores),
//!     ("B", 10.0, 0.0, Attributes::new()),
//! ])?;
//! let query = PointSet::from_tuples([("Q1", 1.0, 0.0, Attributes::new())])?;
//!
//! let matches = match_points(&query, &reference)?;
//! assert_eq!(matches[0].matched_id.as_str(), "A");
//!
//! let projection = AttributeProjection::new([("score", "score_imp")])?;
//! let linkage = build_linkage(&query, &reference, &matches, &projection, LinkOptions::default())?;
//! assert_eq!(linkage.records[0].attribute("score_imp"), Some(Some(510.0)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod index;
pub mod linkage;
pub mod matcher;
pub mod options;
pub mod search;

pub use error::{LinkError, MatchError, Result};
pub use index::RTreeSearch;
pub use linkage::{LinkageBuilder, build_linkage};
pub use matcher::{NearestMatcher, match_points};
pub use options::{CancelToken, DEFAULT_INDEX_THRESHOLD, LinkOptions, MatchOptions, SearchStrategy};
pub use search::{BruteForceSearch, NearestSearch, Neighbor};
