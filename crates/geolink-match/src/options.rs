//! Configuration options for matching and linkage.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Reference set size from which [`SearchStrategy::Auto`] builds an R-tree.
pub const DEFAULT_INDEX_THRESHOLD: usize = 64;

/// How nearest candidates are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Brute force for small reference sets, R-tree otherwise.
    #[default]
    Auto,
    /// Pairwise scan of every reference record.
    BruteForce,
    /// R-tree over the reference set.
    RTree,
}

impl SearchStrategy {
    /// Concrete strategy for a reference set of `reference_len` records.
    #[must_use]
    pub fn resolve(self, reference_len: usize) -> Self {
        match self {
            Self::Auto if reference_len >= DEFAULT_INDEX_THRESHOLD => Self::RTree,
            Self::Auto => Self::BruteForce,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::BruteForce => "brute_force",
            Self::RTree => "rtree",
        }
    }
}

/// Shared flag checked between query records.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Options controlling [`NearestMatcher`](crate::NearestMatcher).
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub strategy: SearchStrategy,
    /// Worker threads; each owns a disjoint range of query records.
    pub threads: NonZeroUsize,
    pub cancel: Option<CancelToken>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            threads: NonZeroUsize::MIN,
            cancel: None,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the worker count. Zero is treated as one.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = NonZeroUsize::new(threads).unwrap_or(NonZeroUsize::MIN);
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Options controlling [`build_linkage`](crate::build_linkage).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Emit connector endpoints as (y, x).
    ///
    /// Only affects connectors. Linked records and distances are unchanged.
    pub swap_axes: bool,
}

impl LinkOptions {
    #[must_use]
    pub fn with_swap_axes(mut self, enable: bool) -> Self {
        self.swap_axes = enable;
        self
    }
}
