//! Text classification and cleaning for extracted lyric candidates.
//!
//! Scraped pages hand back more than lyrics: tracklist dumps, track
//! descriptions, translation-selector labels, "Read More" stubs. This module
//! decides whether a block of text is plausibly lyrics at all and, if so,
//! strips the per-line artifacts. Rejection is deliberately false-negative
//! tolerant: a wrongly dropped candidate falls through to the next provider,
//! a wrongly accepted one reaches the caller.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::classify as limits;

/// Regex matching `123 Contributors` metadata lines.
#[allow(clippy::expect_used)]
static RE_CONTRIBUTORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s+Contributors?\b").expect("valid regex: RE_CONTRIBUTORS")
});

/// Regex matching quoted track-description prose ("Song" is the third single...).
#[allow(clippy::expect_used)]
static RE_QUOTED_DESC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^["“„'].*\bis\s+(?:the|a|about)\b"#).expect("valid regex: RE_QUOTED_DESC")
});

/// Regex matching `<anything> Lyrics` page headers.
#[allow(clippy::expect_used)]
static RE_LYRICS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\S\s+Lyrics$").expect("valid regex: RE_LYRICS_HEADER")
});

/// Regex matching a trailing run of digits (embedded song id).
#[allow(clippy::expect_used)]
static RE_TRAILING_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*$").expect("valid regex: RE_TRAILING_ID")
});

/// Regex matching runs of three or more newlines.
#[allow(clippy::expect_used)]
static RE_BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("valid regex: RE_BLANK_RUNS")
});

/// Keywords whose co-occurrence marks playlist/tracklist dumps.
const PLAYLIST_KEYWORDS: &[&str] = &[
    "playlist",
    "tracklist",
    "feel free to comment",
    "must play",
    "explicit",
];

/// Language names rendered by translation-selector UI widgets.
const LANGUAGE_LABELS: &[&str] = &[
    "English", "Español", "Français", "Deutsch", "Italiano", "Português",
    "Nederlands", "Svenska", "Norsk", "Dansk", "Suomi", "Polski", "Čeština",
    "Magyar", "Română", "Türkçe", "Ελληνικά", "Русский", "Українська",
    "Български", "Српски", "עברית", "العربية", "فارسی", "हिन्दी", "ไทย",
    "日本語", "한국어", "中文", "Tiếng Việt", "Bahasa Indonesia",
];

/// Classify and clean raw extracted text.
///
/// Returns the cleaned lyric text, or `None` when the text is rejected as
/// not-lyrics or nothing survives filtering.
#[must_use]
pub fn clean(raw: &str) -> Option<String> {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    if text.trim().is_empty() {
        return None;
    }

    if looks_like_playlist(&text) {
        tracing::debug!("classifier rejected playlist-shaped text ({} chars)", text.len());
        return None;
    }
    if has_playlist_keywords(&text) {
        tracing::debug!("classifier rejected text with playlist keywords");
        return None;
    }

    let filtered = filter_lines(&text);
    let collapsed = collapse_blank_lines(&filtered);
    let without_id = RE_TRAILING_ID.replace(collapsed.trim_end(), "");
    let trimmed = without_id.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collapse runs of three or more newlines to a single blank line.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    RE_BLANK_RUNS.replace_all(text, "\n\n").to_string()
}

/// "Artist - Track" tracklist dumps: many short lines with a " - " separator.
fn looks_like_playlist(text: &str) -> bool {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() <= limits::PLAYLIST_MIN_LINES {
        return false;
    }

    let separator_lines = lines
        .iter()
        .filter(|line| {
            line.contains(" - ") && line.chars().count() < limits::PLAYLIST_LINE_MAX_CHARS
        })
        .count();

    #[allow(clippy::cast_precision_loss)]
    let ratio = separator_lines as f64 / lines.len() as f64;
    ratio > limits::PLAYLIST_SEPARATOR_RATIO
}

fn has_playlist_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    let hits = PLAYLIST_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count();
    hits >= limits::KEYWORD_REJECT_COUNT
}

/// Drop metadata/boilerplate lines, preserving blank lines as paragraph
/// breaks. Idempotent: filtering already-filtered text is a no-op.
fn filter_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !should_drop_line(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn should_drop_line(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if RE_CONTRIBUTORS.is_match(line) || line == "Translations" || line == "Read More" {
        return true;
    }
    if RE_QUOTED_DESC.is_match(line) {
        return true;
    }
    if is_ellipsis_artifact(line) {
        return true;
    }
    if LANGUAGE_LABELS.contains(&line) {
        return true;
    }
    // Structural annotations like [Chorus], [Verse 1]
    if line.len() > 1 && line.starts_with('[') && line.ends_with(']') {
        return true;
    }
    if RE_LYRICS_HEADER.is_match(line) || line == "Embed" {
        return true;
    }
    false
}

/// Truncation artifacts from "Read More" style collapsing.
fn is_ellipsis_artifact(line: &str) -> bool {
    (line.contains('…') && line.chars().count() > limits::ELLIPSIS_LINE_MAX_CHARS)
        || line.ends_with('…')
}
