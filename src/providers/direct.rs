//! Direct lyrics API provider.
//!
//! Highest-trust source: a REST endpoint keyed by `{artist}/{title}` that
//! returns pre-clean lyric text. The backing API expects exact matches, so
//! parenthetical annotations ("(Remix)", "(feat. X)") are stripped before
//! lookup, and multi-name artists get a single retry with the first name.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

use crate::classify;
use crate::config::Config;
use crate::constants::fetch;
use crate::error::{Error, Result};
use crate::types::{ProviderKind, Query};

use super::{LyricsProvider, RetryPolicy};

/// Regex matching parenthetical annotations in titles and artist names.
#[allow(clippy::expect_used)]
static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\([^)]*\)").expect("valid regex: RE_PARENTHETICAL")
});

/// Client for the title/artist-keyed lyrics REST API.
pub struct DirectApiProvider {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl DirectApiProvider {
    /// Create a new provider from config.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.direct_api_base.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(fetch::PAGE_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            retry: RetryPolicy::first_artist_name(),
        }
    }

    /// Strip parenthetical annotations the backing API cannot match.
    ///
    /// Falls back to the original string when stripping would leave nothing.
    fn normalize(query: &Query) -> Query {
        let strip = |s: &str| {
            let stripped = RE_PARENTHETICAL.replace_all(s, "").trim().to_string();
            if stripped.is_empty() { s.trim().to_string() } else { stripped }
        };
        Query::new(strip(&query.title), strip(&query.artist))
    }

    /// One lookup against the API. `Ok(None)` is a miss (404 or empty
    /// lyric field); other non-2xx statuses are upstream errors.
    async fn lookup(&self, query: &Query) -> Result<Option<String>> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(&query.artist),
            urlencoding::encode(&query.title),
        );

        let resp = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Lyrics lookup for '{query}' failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::upstream_status(
                format!("Lyrics lookup for '{query}' returned {status}"),
                status.as_u16(),
            ));
        }

        let json: serde_json::Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON for '{query}': {e}"), Some(url)))?;

        Ok(json["lyrics"]
            .as_str()
            .map(|text| classify::collapse_blank_lines(text).trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}

#[async_trait]
impl LyricsProvider for DirectApiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DirectApi
    }

    async fn fetch(&self, query: &Query) -> Result<Option<String>> {
        let normalized = Self::normalize(query);
        let mut last_err = None;

        for attempt in self.retry.attempts(&normalized) {
            match self.lookup(&attempt).await {
                Ok(Some(text)) => {
                    tracing::info!("direct API found lyrics for '{attempt}' ({} chars)", text.len());
                    return Ok(Some(text));
                }
                Ok(None) => {
                    tracing::debug!("direct API has no lyrics for '{attempt}'");
                }
                Err(e) => {
                    tracing::debug!("direct API lookup for '{attempt}' failed: {e}");
                    last_err = Some(e);
                }
            }
        }

        last_err.map_or(Ok(None), Err)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_normalize_strips_parentheticals() {
        let query = Query::new("Lose Yourself (Remix)", "Eminem (feat. Someone)");
        let normalized = DirectApiProvider::normalize(&query);
        assert_eq!(normalized.title, "Lose Yourself");
        assert_eq!(normalized.artist, "Eminem");
    }

    #[test]
    fn test_normalize_keeps_fully_parenthetical_title() {
        let query = Query::new("(Untitled)", "Artist");
        let normalized = DirectApiProvider::normalize(&query);
        assert_eq!(normalized.title, "(Untitled)");
    }

    #[test]
    fn test_normalize_preserves_multi_artist_string() {
        // The retry policy, not normalization, handles the artist fallback
        let query = Query::new("Как есть", "Баста, ГУФ");
        let normalized = DirectApiProvider::normalize(&query);
        assert_eq!(normalized.artist, "Баста, ГУФ");
        assert_eq!(
            RetryPolicy::first_artist_name().attempts(&normalized).len(),
            2
        );
    }
}
