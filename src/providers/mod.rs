//! Lyric source providers.
//!
//! Each provider wraps one external source plus its search/extraction logic
//! behind the [`LyricsProvider`] seam, so the resolver can iterate a
//! priority-ordered chain and providers can be added, reordered, and tested
//! independently.

mod direct;
mod genius;
mod web;

pub use direct::DirectApiProvider;
pub use genius::GeniusProvider;
pub use web::WebSearchProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ProviderKind, Query};

/// One external lyric source plus its extraction/search logic.
///
/// `Ok(None)` means the source has nothing for this query; `Err` is caught
/// at the resolver's call site and only affects logging. Either way the
/// chain proceeds to the next provider.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Which source this provider represents.
    fn kind(&self) -> ProviderKind;

    /// Fetch lyrics for the query, or `None` when the source has nothing.
    async fn fetch(&self, query: &Query) -> Result<Option<String>>;
}

/// A query normalization applied when an initial lookup misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTransform {
    /// Keep only the first comma-separated artist name.
    FirstArtistName,
}

impl QueryTransform {
    /// Apply the transform, or `None` when it would not change the query.
    #[must_use]
    pub fn apply(self, query: &Query) -> Option<Query> {
        match self {
            Self::FirstArtistName => query
                .first_artist()
                .map(|name| query.with_artist(name)),
        }
    }
}

/// Declarative per-provider lookup retry policy.
///
/// An ordered list of transforms; each contributes at most one extra lookup
/// attempt, and only when it actually changes the query. There is no backoff
/// and no repetition beyond this list.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    transforms: Vec<QueryTransform>,
}

impl RetryPolicy {
    /// No retries: the query is attempted exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self { transforms: Vec::new() }
    }

    /// One retry with the first comma-separated artist name.
    #[must_use]
    pub fn first_artist_name() -> Self {
        Self { transforms: vec![QueryTransform::FirstArtistName] }
    }

    /// Lookup attempts for a query, in order: the query itself followed by
    /// each transform result that differs from all earlier attempts.
    #[must_use]
    pub fn attempts(&self, query: &Query) -> Vec<Query> {
        let mut attempts = vec![query.clone()];
        for transform in &self.transforms {
            if let Some(candidate) = transform.apply(query) {
                if !attempts.contains(&candidate) {
                    attempts.push(candidate);
                }
            }
        }
        attempts
    }
}
