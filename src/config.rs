//! Pipeline configuration.
//!
//! Handles loading configuration from environment variables and .env files.
//! Base URLs are injectable so tests and self-hosted mirrors can point the
//! providers elsewhere; there is no process-wide mutable state.

use dotenv::dotenv;
use std::env;

use crate::error::Result;

/// Default direct lyrics API base URL (artist/title-keyed REST lookup).
const DEFAULT_DIRECT_API_BASE: &str = "https://api.lyrics.ovh/v1";

/// Default structured lyrics site API base URL.
const DEFAULT_GENIUS_API_BASE: &str = "https://api.genius.com";

/// Default HTML web-search endpoint for the generic fallback.
const DEFAULT_WEB_SEARCH_BASE: &str = "https://html.duckduckgo.com/html";

/// Configuration for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Structured lyrics site API access token.
    pub genius_token: String,
    /// Base URL of the direct lyrics API.
    pub direct_api_base: String,
    /// Base URL of the structured lyrics site API.
    pub genius_api_base: String,
    /// Base URL of the generic web-search endpoint.
    pub web_search_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_token: String::new(),
            direct_api_base: DEFAULT_DIRECT_API_BASE.to_string(),
            genius_api_base: DEFAULT_GENIUS_API_BASE.to_string(),
            web_search_base: DEFAULT_WEB_SEARCH_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(token) = env::var("GENIUS_ACCESS_TOKEN") {
            config.genius_token = token;
        }

        // Base URL overrides, mainly for tests and mirrors
        if let Ok(base) = env::var("LYRICS_API_BASE") {
            config.direct_api_base = base;
        }

        if let Ok(base) = env::var("GENIUS_API_BASE") {
            config.genius_api_base = base;
        }

        if let Ok(base) = env::var("WEB_SEARCH_BASE") {
            config.web_search_base = base;
        }

        Ok(config)
    }

    /// Check if the structured lyrics site is configured
    pub const fn has_genius_token(&self) -> bool {
        !self.genius_token.is_empty()
    }
}
