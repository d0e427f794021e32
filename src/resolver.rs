//! Resolution orchestrator.
//!
//! Providers are tried strictly in priority order, which encodes source
//! trustworthiness; results are never raced and never blended. Any provider
//! failure is contained here: the chain always completes and hands back
//! either text or an explicit not-found.

use crate::config::Config;
use crate::providers::{
    DirectApiProvider, GeniusProvider, LyricsProvider, WebSearchProvider,
};
use crate::types::{LyricsResult, Query};

/// The priority-ordered lyric resolution chain.
pub struct LyricsResolver {
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsResolver {
    /// Build the default chain: direct API, then the structured lyrics site,
    /// then the generic web fallback.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self::with_providers(vec![
            Box::new(DirectApiProvider::new(config)),
            Box::new(GeniusProvider::new(config)),
            Box::new(WebSearchProvider::new(config)),
        ])
    }

    /// Build a resolver over an explicit provider chain, in the given
    /// priority order. Useful for tests and callers with custom sources.
    #[must_use]
    pub fn with_providers(providers: Vec<Box<dyn LyricsProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve lyrics for a query.
    ///
    /// The first provider returning non-empty accepted text wins and is
    /// recorded as the result's source. Provider errors are logged and
    /// treated as absence; this method never fails.
    pub async fn resolve(&self, query: &Query) -> LyricsResult {
        for provider in &self.providers {
            let kind = provider.kind();
            match provider.fetch(query).await {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    tracing::info!("{kind} resolved '{query}' ({} chars)", text.len());
                    return LyricsResult::found(text, kind);
                }
                Ok(_) => {
                    tracing::debug!("{kind} had nothing for '{query}'");
                }
                Err(e) if e.is_rate_limited() => {
                    tracing::warn!("{kind} rate limited on '{query}': {e}");
                }
                Err(e) => {
                    tracing::warn!("{kind} failed on '{query}': {e}");
                }
            }
        }

        tracing::info!("no provider had lyrics for '{query}'");
        LyricsResult::not_found()
    }
}
