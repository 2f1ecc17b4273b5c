//! Nearest-neighbour matching of a query set against a reference set.

use std::thread;

use tracing::{debug, info_span};

use geolink_model::{MatchResult, PointSet, Record};

use crate::error::{MatchError, Result};
use crate::index::RTreeSearch;
use crate::options::{CancelToken, MatchOptions, SearchStrategy};
use crate::search::{BruteForceSearch, NearestSearch, Neighbor};

/// Stateless matcher configured by [`MatchOptions`].
#[derive(Debug, Clone, Default)]
pub struct NearestMatcher {
    options: MatchOptions,
}

impl NearestMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Finds the nearest `reference` record for every `query` record.
    ///
    /// Results are returned in query order, exactly one per query record.
    /// Distance is planar Euclidean on the raw coordinates. Equidistant
    /// references resolve to the one inserted first.
    ///
    /// # Errors
    ///
    /// [`MatchError::EmptyReferenceSet`] when `reference` has no records,
    /// [`MatchError::Cancelled`] when the cancel token fires mid-run.
    pub fn run(&self, query: &PointSet, reference: &PointSet) -> Result<Vec<MatchResult>> {
        if reference.is_empty() {
            return Err(MatchError::EmptyReferenceSet {
                query_count: query.len(),
            });
        }
        let strategy = self.options.strategy.resolve(reference.len());
        let span = info_span!(
            "match",
            query = query.len(),
            reference = reference.len(),
            strategy = strategy.as_str()
        );
        let _guard = span.enter();
        if query.is_empty() {
            debug!("query set is empty; nothing to match");
            return Ok(Vec::new());
        }

        let search: Box<dyn NearestSearch> = match strategy {
            SearchStrategy::RTree => Box::new(RTreeSearch::new(reference)),
            SearchStrategy::BruteForce | SearchStrategy::Auto => {
                Box::new(BruteForceSearch::new(reference))
            }
        };

        let threads = self.options.threads.get().min(query.len());
        let neighbors = if threads > 1 {
            search_parallel(
                search.as_ref(),
                query.records(),
                threads,
                self.options.cancel.as_ref(),
            )?
        } else {
            let mut slots = vec![UNSET; query.len()];
            search_range(
                search.as_ref(),
                query.records(),
                &mut slots,
                self.options.cancel.as_ref(),
            )
            .map_err(|completed| MatchError::Cancelled {
                completed,
                total: query.len(),
            })?;
            slots
        };

        let results: Vec<MatchResult> = query
            .iter()
            .zip(neighbors)
            .map(|(record, neighbor)| to_match_result(record, reference, neighbor))
            .collect();
        debug!(matched = results.len(), threads, "matching finished");
        Ok(results)
    }
}

/// Matches with default options.
pub fn match_points(query: &PointSet, reference: &PointSet) -> Result<Vec<MatchResult>> {
    NearestMatcher::default().run(query, reference)
}

fn to_match_result(query: &Record, reference: &PointSet, neighbor: Neighbor) -> MatchResult {
    let matched = &reference.records()[neighbor.position];
    MatchResult {
        query_id: query.id().clone(),
        query_coord: query.coord(),
        matched_id: matched.id().clone(),
        matched_coord: matched.coord(),
        distance: neighbor.distance_squared.sqrt(),
    }
}

// Placeholder slot. The reference set is non-empty, so every search overwrites it.
const UNSET: Neighbor = Neighbor {
    position: 0,
    distance_squared: f64::INFINITY,
};

/// Fills `slots[i]` for `records[i]`; returns the completed count on cancel.
fn search_range(
    search: &dyn NearestSearch,
    records: &[Record],
    slots: &mut [Neighbor],
    cancel: Option<&CancelToken>,
) -> std::result::Result<(), usize> {
    for (completed, (record, slot)) in records.iter().zip(slots.iter_mut()).enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(completed);
        }
        if let Some(found) = search.nearest(record.coord()) {
            *slot = found;
        }
    }
    Ok(())
}

/// Splits the query range into contiguous chunks, one per scoped worker.
fn search_parallel(
    search: &dyn NearestSearch,
    records: &[Record],
    threads: usize,
    cancel: Option<&CancelToken>,
) -> Result<Vec<Neighbor>> {
    let total = records.len();
    let chunk_len = total.div_ceil(threads);
    let mut slots = vec![UNSET; total];
    let outcomes: Vec<std::result::Result<(), usize>> = thread::scope(|scope| {
        let handles: Vec<_> = records
            .chunks(chunk_len)
            .zip(slots.chunks_mut(chunk_len))
            .map(|(chunk, out)| scope.spawn(move || search_range(search, chunk, out, cancel)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcome) => outcome,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });
    let mut completed = 0;
    let mut cancelled = false;
    for (outcome, chunk) in outcomes.iter().zip(records.chunks(chunk_len)) {
        match outcome {
            Ok(()) => completed += chunk.len(),
            Err(done) => {
                completed += done;
                cancelled = true;
            }
        }
    }
    if cancelled {
        return Err(MatchError::Cancelled { completed, total });
    }
    debug!(workers = outcomes.len(), chunk_len, "parallel search finished");
    Ok(slots)
}
