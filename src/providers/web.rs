//! Generic web-search fallback provider.
//!
//! Last resort, most heuristic source: run a free-text web search, fetch the
//! first non-video result, and mine the page for the most lyric-shaped text
//! block. A container with a lyrics-related class/id wins outright; otherwise
//! block-level elements are scored by short-line ratio and the longest
//! eligible block is taken.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

use crate::classify;
use crate::config::Config;
use crate::constants::{fetch, scoring};
use crate::error::{Error, Result};
use crate::extract::{self, TextBlock};
use crate::html;
use crate::types::{ProviderKind, Query};

use super::LyricsProvider;

/// Video hosts whose pages almost never contain lyric text.
const VIDEO_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "rutube.ru",
    "vimeo.com",
    "dailymotion.com",
    "tiktok.com",
];

/// Class/id fragments that mark a lyrics content container.
const CONTAINER_KEYWORDS: &[&str] = &["lyrics", "text", "content", "words"];

/// Selector for search result links.
#[allow(clippy::expect_used)]
static SEL_RESULT_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.result__a").expect("valid selector: SEL_RESULT_LINK")
});

/// Selector for any anchor with a destination, used when the result markup
/// has no recognizable result class.
#[allow(clippy::expect_used)]
static SEL_ANY_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("valid selector: SEL_ANY_LINK")
});

/// Selector for elements carrying a class or id.
#[allow(clippy::expect_used)]
static SEL_ANNOTATED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[class], [id]").expect("valid selector: SEL_ANNOTATED")
});

/// Selector for block-level scoring candidates.
#[allow(clippy::expect_used)]
static SEL_BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div, p").expect("valid selector: SEL_BLOCKS")
});

/// Client for the generic web-search fallback.
pub struct WebSearchProvider {
    search_base: String,
    client: Client,
}

impl WebSearchProvider {
    /// Create a new provider from config.
    pub fn new(config: &Config) -> Self {
        Self {
            search_base: config.web_search_base.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(fetch::PAGE_TIMEOUT_SECS))
                .user_agent(fetch::USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Run the web search and return candidate result URLs in rank order.
    async fn search(&self, query: &Query) -> Result<Vec<String>> {
        let q = format!("{} {} текст песни lyrics", query.artist, query.title);

        let resp = self.client
            .get(&self.search_base)
            .query(&[("q", q.as_str())])
            .timeout(Duration::from_secs(fetch::SEARCH_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| Error::Network(format!("Web search for '{query}' failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::upstream_status(
                format!("Web search for '{query}' returned {status}"),
                status.as_u16(),
            ));
        }

        let body = resp.text().await
            .map_err(|e| Error::Network(format!("Web search body read failed: {e}")))?;

        Ok(Self::parse_result_urls(&body))
    }

    /// Pull destination URLs out of the result page, unwrapping redirect
    /// query parameters so domain filtering sees the real target.
    fn parse_result_urls(page_html: &str) -> Vec<String> {
        let doc = Html::parse_document(page_html);

        let mut urls: Vec<String> = doc.select(&SEL_RESULT_LINK)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(Self::resolve_redirect)
            .collect();

        if urls.is_empty() {
            urls = doc.select(&SEL_ANY_LINK)
                .filter_map(|el| el.value().attr("href"))
                .filter_map(Self::resolve_redirect)
                .collect();
        }

        urls
    }

    /// Unwrap `uddg=`-style redirect links; pass absolute URLs through.
    fn resolve_redirect(href: &str) -> Option<String> {
        if let Some(idx) = href.find("uddg=") {
            let encoded = &href[idx + 5..];
            let encoded = encoded.split('&').next().unwrap_or(encoded);
            return urlencoding::decode(encoded).ok().map(|url| url.into_owned());
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }
        None
    }

    fn is_video_url(url: &str) -> bool {
        let host = url.split('/').nth(2).unwrap_or("");
        VIDEO_DOMAINS.iter().any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
    }

    /// First result not hosted on a video domain.
    fn pick_result(urls: &[String]) -> Option<String> {
        urls.iter().find(|url| !Self::is_video_url(url)).cloned()
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Page fetch of {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::upstream_status(
                format!("Page {url} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.text().await
            .map_err(|e| Error::Network(format!("Page body read of {url} failed: {e}")))
    }

    /// Extract the best lyric candidate from a page.
    ///
    /// Primary strategy: a container whose class/id names lyrics content.
    /// Fallback: score all block-level elements and keep the longest
    /// eligible one.
    fn extract_lyrics(page_html: &str) -> Option<String> {
        let stripped = html::strip_noncontent(page_html);
        let doc = Html::parse_document(&stripped);

        if let Some(text) = Self::keyword_container_text(&doc) {
            return Some(text);
        }

        let texts: Vec<String> = doc.select(&SEL_BLOCKS)
            .map(|el| html::text_with_breaks(&el.inner_html()))
            .collect();
        extract::best_block(extract::candidate_blocks(texts)).map(TextBlock::into_text)
    }

    /// First element in document order whose class or id contains a
    /// lyrics-related keyword and which holds any text.
    fn keyword_container_text(doc: &Html) -> Option<String> {
        for el in doc.select(&SEL_ANNOTATED) {
            let element = el.value();
            let keyword_match = [element.attr("class"), element.attr("id")]
                .into_iter()
                .flatten()
                .any(|value| {
                    let lower = value.to_lowercase();
                    CONTAINER_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
                });
            if !keyword_match {
                continue;
            }

            let text = html::text_with_breaks(&el.inner_html());
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        None
    }

    /// Collapse blank runs and bound the payload size.
    fn finalize(text: &str) -> String {
        let collapsed = classify::collapse_blank_lines(text);
        let trimmed = collapsed.trim();
        let truncated = trimmed
            .char_indices()
            .nth(scoring::MAX_EXTRACT_CHARS)
            .map_or(trimmed, |(idx, _)| &trimmed[..idx]);
        truncated.trim_end().to_string()
    }
}

#[async_trait]
impl LyricsProvider for WebSearchProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::WebSearch
    }

    async fn fetch(&self, query: &Query) -> Result<Option<String>> {
        let urls = self.search(query).await?;
        let Some(url) = Self::pick_result(&urls) else {
            tracing::debug!("no non-video web results for '{query}'");
            return Ok(None);
        };

        tracing::debug!("fetching web result {url}");
        let page = self.fetch_page(&url).await?;

        let Some(raw) = Self::extract_lyrics(&page) else {
            tracing::debug!("no lyric-shaped block on {url}");
            return Ok(None);
        };

        let finalized = Self::finalize(&raw);
        classify::clean(&finalized).map_or_else(
            || Err(Error::content_rejected(format!("Text from {url} does not look like lyrics"))),
            |text| Ok(Some(text)),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_resolve_redirect_unwraps_uddg() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fsong&rut=abc";
        assert_eq!(
            WebSearchProvider::resolve_redirect(href).unwrap(),
            "https://example.com/song"
        );
    }

    #[test]
    fn test_resolve_redirect_passes_absolute_urls() {
        assert_eq!(
            WebSearchProvider::resolve_redirect("https://example.com/a").unwrap(),
            "https://example.com/a"
        );
        assert!(WebSearchProvider::resolve_redirect("/relative/path").is_none());
    }

    #[test]
    fn test_video_domains_are_skipped() {
        let urls = vec![
            "https://www.youtube.com/watch?v=abc".to_string(),
            "https://rutube.ru/video/xyz".to_string(),
            "https://lyrics-site.example/song".to_string(),
        ];
        assert_eq!(
            WebSearchProvider::pick_result(&urls).unwrap(),
            "https://lyrics-site.example/song"
        );
    }

    #[test]
    fn test_all_video_results_yield_nothing() {
        let urls = vec!["https://youtu.be/abc".to_string()];
        assert!(WebSearchProvider::pick_result(&urls).is_none());
    }

    #[test]
    fn test_video_filter_does_not_match_lookalike_hosts() {
        assert!(!WebSearchProvider::is_video_url("https://notyoutube.example/song"));
        assert!(WebSearchProvider::is_video_url("https://m.youtube.com/watch"));
    }

    #[test]
    fn test_parse_result_urls_in_rank_order() {
        let page = r#"<html><body>
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.youtube.com%2Fwatch">Video</a>
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Ftext-pesni.example%2Fsong">Lyrics</a>
        </body></html>"#;
        let urls = WebSearchProvider::parse_result_urls(page);
        assert_eq!(urls.len(), 2);
        assert!(urls[0].contains("youtube.com"));
        assert_eq!(
            WebSearchProvider::pick_result(&urls).unwrap(),
            "https://text-pesni.example/song"
        );
    }

    #[test]
    fn test_keyword_container_wins_over_scoring() {
        let page = r#"<html><body>
            <div class="song-lyrics">Short line one<br>Short line two</div>
            <div class="sidebar">unrelated</div>
        </body></html>"#;
        let text = WebSearchProvider::extract_lyrics(page).unwrap();
        assert_eq!(text, "Short line one\nShort line two");
    }

    #[test]
    fn test_scoring_fallback_picks_lyric_shaped_block() {
        let lyric_lines = (0..12)
            .map(|i| format!("short lyric {i}"))
            .collect::<Vec<_>>()
            .join("<br>");
        let prose = "A long paragraph about nothing in particular, stretched well past sixty characters per line. ".repeat(12);
        let page = format!(
            "<html><body><div class=\"x\"><p>{prose}</p><p>{lyric_lines}</p></div></body></html>"
        );
        // No class/id matches a container keyword, so scoring decides
        let text = WebSearchProvider::extract_lyrics(&page).unwrap();
        assert!(text.contains("short lyric 0"));
        assert!(text.contains("short lyric 11"));
    }

    #[test]
    fn test_extract_ignores_script_and_nav_text() {
        let noise = (0..30).map(|i| format!("nav item {i}")).collect::<Vec<_>>().join("<br>");
        let page = format!(
            "<html><body><nav>{noise}</nav><script>var a=1;</script>\
             <div class=\"dirty\"><p>too small</p></div></body></html>"
        );
        assert!(WebSearchProvider::extract_lyrics(&page).is_none());
    }

    #[test]
    fn test_finalize_truncates_and_collapses() {
        let long = "a\n\n\n\nb\n".repeat(2000);
        let out = WebSearchProvider::finalize(&long);
        assert!(out.chars().count() <= 4000);
        assert!(!out.contains("\n\n\n"));
    }
}
