//! Core type definitions for the resolution pipeline.
//!
//! Everything here is created per call and carries no persisted identity;
//! there is no cache and no shared mutable state across queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lyric source a result was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Title/artist-keyed lyrics REST API.
    DirectApi,
    /// Lyrics aggregator with a search API and structured song pages.
    StructuredSite,
    /// Generic web search with heuristic page extraction.
    WebSearch,
}

impl ProviderKind {
    /// Returns all provider kinds in priority order (most trusted first).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::DirectApi, Self::StructuredSite, Self::WebSearch]
    }

    /// Returns the human-readable name of this provider kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DirectApi => "direct lyrics API",
            Self::StructuredSite => "structured lyrics site",
            Self::WebSearch => "web search fallback",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable lyrics lookup input.
///
/// The artist string may contain multiple comma-separated names; providers
/// that need a single name fall back to [`Query::first_artist`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Song title as reported by the caller.
    pub title: String,
    /// Artist name, possibly "Name One, Name Two".
    pub artist: String,
}

impl Query {
    /// Create a new query.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self { title: title.into(), artist: artist.into() }
    }

    /// The first comma-separated artist name, when the artist string holds
    /// more than one. Returns `None` for single-name artists.
    #[must_use]
    pub fn first_artist(&self) -> Option<&str> {
        if !self.artist.contains(',') {
            return None;
        }
        self.artist
            .split(',')
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// A copy of this query with a different artist string.
    #[must_use]
    pub fn with_artist(&self, artist: impl Into<String>) -> Self {
        Self { title: self.title.clone(), artist: artist.into() }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// One candidate page reference from a provider's search step.
///
/// List order equals relevance order as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Display title of the hit.
    pub title: String,
    /// Resolvable page URL, when the source supplied one.
    pub url: Option<String>,
}

/// Terminal output of the pipeline.
///
/// When `text` is present it is non-empty after trimming and attributed to
/// exactly one provider; results are never blended across sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsResult {
    /// Cleaned lyric text, absent when no source had anything acceptable.
    pub text: Option<String>,
    /// The provider the text came from.
    pub source: Option<ProviderKind>,
}

impl LyricsResult {
    /// A successful result attributed to one provider.
    pub fn found(text: impl Into<String>, source: ProviderKind) -> Self {
        Self { text: Some(text.into()), source: Some(source) }
    }

    /// The definitive "not found" result.
    #[must_use]
    pub const fn not_found() -> Self {
        Self { text: None, source: None }
    }

    /// Whether any provider produced accepted lyrics.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.text.is_some()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_first_artist_multiple_names() {
        let query = Query::new("Как есть", "Баста, ГУФ");
        assert_eq!(query.first_artist(), Some("Баста"));
    }

    #[test]
    fn test_first_artist_single_name() {
        let query = Query::new("Lose Yourself", "Eminem");
        assert_eq!(query.first_artist(), None);
    }

    #[test]
    fn test_first_artist_leading_comma() {
        let query = Query::new("Song", ", Someone");
        assert_eq!(query.first_artist(), None);
    }

    #[test]
    fn test_with_artist_keeps_title() {
        let query = Query::new("Как есть", "Баста, ГУФ");
        let retry = query.with_artist("Баста");
        assert_eq!(retry.title, "Как есть");
        assert_eq!(retry.artist, "Баста");
    }

    #[test]
    fn test_not_found_has_no_source() {
        let result = LyricsResult::not_found();
        assert!(!result.is_found());
        assert_eq!(result.source, None);
    }
}
