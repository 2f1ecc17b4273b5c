//! Attribute transfer and connector construction from match results.

use tracing::{debug, info_span};

use geolink_model::{
    AttributeProjection, AttributeValue, Connector, Linkage, LinkedRecord, MatchResult, PointSet,
};

use crate::error::LinkError;
use crate::options::LinkOptions;

/// Builds linked records and connectors for a set of matches.
#[derive(Debug, Clone)]
pub struct LinkageBuilder<'a> {
    projection: &'a AttributeProjection,
    options: LinkOptions,
}

impl<'a> LinkageBuilder<'a> {
    pub fn new(projection: &'a AttributeProjection) -> Self {
        Self {
            projection,
            options: LinkOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: LinkOptions) -> Self {
        self.options = options;
        self
    }

    /// Produces one [`LinkedRecord`] and one [`Connector`] per match, in
    /// match order. `matches` must cover every query record exactly once.
    ///
    /// Only attributes named in the projection are copied from the matched
    /// reference record, under their output names. Attributes the matched
    /// record lacks come out as `None`.
    ///
    /// # Errors
    ///
    /// [`LinkError::DanglingMatch`] if a matched id is not in `reference`,
    /// [`LinkError::UnknownQuery`] if a query id is not in `query`,
    /// [`LinkError::DuplicateMatch`] or [`LinkError::MissingMatch`] if
    /// `matches` does not cover `query` exactly once.
    pub fn build(
        &self,
        query: &PointSet,
        reference: &PointSet,
        matches: &[MatchResult],
    ) -> Result<Linkage, LinkError> {
        let span = info_span!(
            "link",
            matches = matches.len(),
            attributes = self.projection.len(),
            swap_axes = self.options.swap_axes
        );
        let _guard = span.enter();

        let mut records = Vec::with_capacity(matches.len());
        let mut connectors = Vec::with_capacity(matches.len());
        let mut missing_values = 0usize;
        let mut covered = vec![false; query.len()];
        for result in matches {
            let position = query.position_of(&result.query_id).ok_or_else(|| {
                LinkError::UnknownQuery {
                    query_id: result.query_id.to_string(),
                }
            })?;
            if std::mem::replace(&mut covered[position], true) {
                return Err(LinkError::DuplicateMatch {
                    query_id: result.query_id.to_string(),
                });
            }
            let source = &query.records()[position];
            let matched = reference.lookup(&result.matched_id).ok_or_else(|| {
                LinkError::DanglingMatch {
                    query_id: result.query_id.to_string(),
                    matched_id: result.matched_id.to_string(),
                }
            })?;

            let attributes: Vec<(String, AttributeValue)> = self
                .projection
                .renames()
                .iter()
                .map(|rename| (rename.target.clone(), matched.attribute(&rename.source)))
                .collect();
            missing_values += attributes.iter().filter(|(_, value)| value.is_none()).count();

            let (start, end) = if self.options.swap_axes {
                (source.coord().swapped(), matched.coord().swapped())
            } else {
                (source.coord(), matched.coord())
            };
            connectors.push(Connector {
                query_id: source.id().clone(),
                matched_id: matched.id().clone(),
                start,
                end,
            });
            records.push(LinkedRecord {
                query_id: source.id().clone(),
                matched_id: matched.id().clone(),
                distance: result.distance,
                attributes,
            });
        }
        if let Some(position) = covered.iter().position(|done| !done) {
            return Err(LinkError::MissingMatch {
                query_id: query.records()[position].id().to_string(),
            });
        }
        debug!(linked = records.len(), missing_values, "linkage built");
        Ok(Linkage {
            records,
            connectors,
        })
    }
}

/// Builds a linkage in one call.
pub fn build_linkage(
    query: &PointSet,
    reference: &PointSet,
    matches: &[MatchResult],
    projection: &AttributeProjection,
    options: LinkOptions,
) -> Result<Linkage, LinkError> {
    LinkageBuilder::new(projection)
        .with_options(options)
        .build(query, reference, matches)
}
