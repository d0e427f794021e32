//! Pipeline constants.
//!
//! Centralizes magic numbers and thresholds for better maintainability.

/// Network fetch constants.
pub mod fetch {
    /// Timeout for search requests (seconds).
    pub const SEARCH_TIMEOUT_SECS: u64 = 10;

    /// Timeout for page and API fetches (seconds).
    pub const PAGE_TIMEOUT_SECS: u64 = 15;

    /// Browser user agent sent with scraping requests.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
}

/// Candidate block scoring constants.
pub mod scoring {
    /// Lines shorter than this many characters count as "short" (lyric-like).
    pub const SHORT_LINE_MAX_CHARS: usize = 60;

    /// Blocks with fewer non-empty lines than this are discarded outright.
    pub const MIN_BLOCK_LINES: usize = 5;

    /// Scoring contenders need strictly more non-empty lines than this.
    pub const CONTENDER_MIN_LINES: usize = 10;

    /// Scoring contenders need a short-line ratio above this.
    pub const CONTENDER_MIN_SHORT_RATIO: f64 = 0.6;

    /// Extracted text is truncated to this many characters.
    pub const MAX_EXTRACT_CHARS: usize = 4000;
}

/// Classifier thresholds.
pub mod classify {
    /// Playlist-shape rejection applies above this many non-empty lines.
    pub const PLAYLIST_MIN_LINES: usize = 20;

    /// Fraction of "Artist - Track" shaped lines that rejects the text.
    pub const PLAYLIST_SEPARATOR_RATIO: f64 = 0.3;

    /// Separator lines at or above this length do not count toward the ratio.
    pub const PLAYLIST_LINE_MAX_CHARS: usize = 100;

    /// Number of distinct playlist keywords that rejects the text.
    pub const KEYWORD_REJECT_COUNT: usize = 2;

    /// Ellipsis-bearing lines longer than this are dropped.
    pub const ELLIPSIS_LINE_MAX_CHARS: usize = 100;
}
