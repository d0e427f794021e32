//! Minimal HTML-to-text helpers shared by the scraping providers.
//!
//! This is intentionally "good enough" for lyric pages, not a full
//! readability engine: line breaks are preserved, tags are stripped, and a
//! small table of common entities is decoded.

use regex::Regex;
use std::sync::LazyLock;

/// Regex matching non-content elements whose text would corrupt extraction.
#[allow(clippy::expect_used)]
static RE_NONCONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<nav\b.*?</nav\s*>|<header\b.*?</header\s*>|<footer\b.*?</footer\s*>|<iframe\b.*?</iframe\s*>|<noscript\b.*?</noscript\s*>|<!--.*?-->",
    )
    .expect("valid regex: RE_NONCONTENT")
});

/// Regex matching `<br>` in all its spellings.
#[allow(clippy::expect_used)]
static RE_BR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("valid regex: RE_BR")
});

/// Regex matching closing tags of block-level elements.
#[allow(clippy::expect_used)]
static RE_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|h[1-6]|tr)\s*>").expect("valid regex: RE_BLOCK_CLOSE")
});

/// Regex matching any remaining tag.
#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("valid regex: RE_TAG")
});

/// Remove scripts, styles, navigation, headers, footers, frames and comments
/// from a raw HTML document before any text extraction.
#[must_use]
pub fn strip_noncontent(html: &str) -> String {
    RE_NONCONTENT.replace_all(html, "").to_string()
}

/// Convert an element's inner HTML to plain text with line breaks preserved.
///
/// `<br>` and closing block tags become newlines, remaining tags are
/// stripped, entities are decoded. The result is not trimmed.
#[must_use]
pub fn text_with_breaks(inner_html: &str) -> String {
    let with_breaks = RE_BR.replace_all(inner_html, "\n");
    let with_blocks = RE_BLOCK_CLOSE.replace_all(&with_breaks, "\n");
    let stripped = RE_TAG.replace_all(&with_blocks, "");
    decode_entities(&stripped)
}

/// Decode the handful of HTML entities that show up on lyric pages.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_strip_noncontent_removes_scripts_and_chrome() {
        let html = "<body><script>var x = 1;</script><nav>Home | About</nav>\
                    <div>keep me</div><footer>© 2024</footer></body>";
        let stripped = strip_noncontent(html);
        assert!(stripped.contains("keep me"));
        assert!(!stripped.contains("var x"));
        assert!(!stripped.contains("Home | About"));
        assert!(!stripped.contains("© 2024"));
    }

    #[test]
    fn test_strip_noncontent_is_case_insensitive() {
        let html = "<SCRIPT>bad()</SCRIPT><div>ok</div>";
        let stripped = strip_noncontent(html);
        assert!(!stripped.contains("bad()"));
        assert!(stripped.contains("ok"));
    }

    #[test]
    fn test_text_with_breaks_preserves_lines() {
        let inner = "First line<br>Second line<br/>Third line";
        assert_eq!(text_with_breaks(inner), "First line\nSecond line\nThird line");
    }

    #[test]
    fn test_text_with_breaks_strips_inline_tags() {
        let inner = "He said <i>hello</i><br><a href=\"/x\">and waved</a>";
        assert_eq!(text_with_breaks(inner), "He said hello\nand waved");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("it&#x27;s &amp; that&#39;s"), "it's & that's");
        assert_eq!(decode_entities("a&nbsp;b"), "a b");
    }
}
