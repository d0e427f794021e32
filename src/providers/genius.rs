//! Structured lyrics site provider.
//!
//! Searches a lyrics aggregator's API, takes its top hit, fetches the song
//! page and pulls text out of the dedicated lyrics containers. The site
//! marks those with a `data-lyrics-container` attribute; older page layouts
//! fall back to a `Lyrics__Container` class pattern.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

use crate::classify;
use crate::config::Config;
use crate::constants::fetch;
use crate::error::{Error, Result};
use crate::html;
use crate::types::{ProviderKind, Query, SearchHit};

use super::LyricsProvider;

/// Selector for the dedicated lyrics container marker.
#[allow(clippy::expect_used)]
static SEL_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[data-lyrics-container="true"]"#)
        .expect("valid selector: SEL_CONTAINER")
});

/// Fallback selector for older page layouts.
#[allow(clippy::expect_used)]
static SEL_CONTAINER_CLASS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class*="Lyrics__Container"]"#)
        .expect("valid selector: SEL_CONTAINER_CLASS")
});

/// Client for the lyrics aggregator's search API and song pages.
pub struct GeniusProvider {
    api_base: String,
    token: String,
    client: Client,
}

impl GeniusProvider {
    /// Create a new provider from config.
    pub fn new(config: &Config) -> Self {
        Self {
            api_base: config.genius_api_base.clone(),
            token: config.genius_token.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(fetch::PAGE_TIMEOUT_SECS))
                .user_agent(fetch::USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search the aggregator for the query, returning hits in relevance
    /// order. Fails closed on any non-2xx status; 429 is surfaced as a
    /// distinct rate-limited error.
    async fn search(&self, query: &Query) -> Result<Vec<SearchHit>> {
        let q = format!("{} {}", query.artist, query.title);
        let url = format!("{}/search", self.api_base);

        let resp = self.client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("q", q.as_str())])
            .timeout(Duration::from_secs(fetch::SEARCH_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| Error::Network(format!("Song search for '{query}' failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::upstream_status(
                format!("Song search for '{query}' returned {status}"),
                status.as_u16(),
            ));
        }

        let json: serde_json::Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from song search: {e}"), Some(url)))?;

        Self::parse_hits(&json)
    }

    /// Pull search hits out of the response envelope, in relevance order.
    /// A hit without a page URL is kept (with `url: None`) so the caller can
    /// decide what a dead top hit means.
    fn parse_hits(json: &serde_json::Value) -> Result<Vec<SearchHit>> {
        let hits = json["response"]["hits"].as_array()
            .ok_or_else(|| Error::parse("Missing 'hits' array in search response", None))?;

        Ok(hits.iter().map(|hit| {
            let result = &hit["result"];
            SearchHit {
                title: result["full_title"].as_str().unwrap_or("Unknown").to_string(),
                url: result["url"].as_str().map(String::from),
            }
        }).collect())
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Song page fetch failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::upstream_status(
                format!("Song page {url} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.text().await
            .map_err(|e| Error::Network(format!("Song page body read failed: {e}")))
    }

    /// Concatenate all lyrics containers in document order, one blank line
    /// between containers. `None` when no container matches.
    fn extract_containers(page_html: &str) -> Option<String> {
        let doc = Html::parse_document(page_html);

        let mut parts: Vec<String> = doc.select(&SEL_CONTAINER)
            .map(|el| html::text_with_breaks(&el.inner_html()).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        if parts.is_empty() {
            parts = doc.select(&SEL_CONTAINER_CLASS)
                .map(|el| html::text_with_breaks(&el.inner_html()).trim().to_string())
                .filter(|text| !text.is_empty())
                .collect();
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }
}

#[async_trait]
impl LyricsProvider for GeniusProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::StructuredSite
    }

    async fn fetch(&self, query: &Query) -> Result<Option<String>> {
        if self.token.is_empty() {
            return Err(Error::config(
                "Structured lyrics site client not configured",
                "Set the GENIUS_ACCESS_TOKEN environment variable",
            ));
        }

        let hits = self.search(query).await?;
        let Some(hit) = hits.into_iter().next() else {
            tracing::debug!("no search hits for '{query}'");
            return Ok(None);
        };
        let Some(url) = hit.url else {
            tracing::debug!("top hit '{}' has no page url", hit.title);
            return Ok(None);
        };

        tracing::debug!("fetching song page {url}");
        let page = self.fetch_page(&url).await?;

        let Some(raw) = Self::extract_containers(&page) else {
            return Err(Error::parse("No lyrics container found on song page", Some(url)));
        };

        classify::clean(&raw).map_or_else(
            || Err(Error::content_rejected(format!("Text from {url} does not look like lyrics"))),
            |text| Ok(Some(text)),
        )
    }
}
