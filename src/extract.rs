//! Candidate text-block scoring for the generic web fallback.
//!
//! Lyrics wrap more tightly than prose, so the fraction of short lines in a
//! block is the lyric-likelihood proxy. Selection is a two-stage filter: a
//! boolean eligibility predicate over each block, then a max-by-line-count
//! reduction over the survivors (line count, not ratio, breaks ties so a
//! complete lyric body beats a high-scoring excerpt).

use crate::constants::scoring as limits;

/// A contiguous unit of extracted page text with lyric-likelihood metrics.
///
/// Blocks are ephemeral: scored once, discarded after selection.
#[derive(Debug, Clone)]
pub struct TextBlock {
    text: String,
    line_count: usize,
    short_lines: usize,
}

impl TextBlock {
    /// Build a block and derive its metrics from the non-empty lines.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_count = 0;
        let mut short_lines = 0;
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            line_count += 1;
            if line.chars().count() < limits::SHORT_LINE_MAX_CHARS {
                short_lines += 1;
            }
        }
        Self { text, line_count, short_lines }
    }

    /// Number of non-empty lines in the block.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Fraction of non-empty lines under the short-line threshold.
    #[must_use]
    pub fn short_line_ratio(&self) -> f64 {
        if self.line_count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.short_lines as f64 / self.line_count as f64;
        ratio
    }

    /// Eligibility predicate: enough lines, and mostly short ones.
    #[must_use]
    pub fn is_contender(&self) -> bool {
        self.line_count > limits::CONTENDER_MIN_LINES
            && self.short_line_ratio() > limits::CONTENDER_MIN_SHORT_RATIO
    }

    /// The block text, line breaks intact.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the block, yielding its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Build scored blocks from raw candidate texts, discarding those too small
/// to be worth scoring at all.
pub fn candidate_blocks<I>(texts: I) -> Vec<TextBlock>
where
    I: IntoIterator<Item = String>,
{
    texts
        .into_iter()
        .map(TextBlock::new)
        .filter(|block| block.line_count() >= limits::MIN_BLOCK_LINES)
        .collect()
}

/// Select the winning contender: greatest line count, earliest block on ties.
#[must_use]
pub fn best_block(blocks: Vec<TextBlock>) -> Option<TextBlock> {
    let mut best: Option<TextBlock> = None;
    for block in blocks {
        if !block.is_contender() {
            continue;
        }
        match &best {
            Some(current) if block.line_count() <= current.line_count() => {}
            _ => best = Some(block),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn block_of_short_lines(count: usize) -> String {
        (0..count)
            .map(|i| format!("short lyric line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_metrics_ignore_blank_lines() {
        let block = TextBlock::new("one\n\ntwo\n\n\nthree");
        assert_eq!(block.line_count(), 3);
    }

    #[test]
    fn test_short_line_ratio() {
        let long = "y".repeat(80);
        let block = TextBlock::new(format!("short\nshort\n{long}\n{long}"));
        assert!((block.short_line_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ten_lines_is_not_a_contender() {
        // Threshold is strictly greater than ten
        let block = TextBlock::new(block_of_short_lines(10));
        assert!(!block.is_contender());
    }

    #[test]
    fn test_eleven_lines_is_a_contender() {
        let block = TextBlock::new(block_of_short_lines(11));
        assert!(block.is_contender());
    }

    #[test]
    fn test_long_lined_prose_is_not_a_contender() {
        let prose = (0..15)
            .map(|i| format!("{} sentence number {i}", "word ".repeat(20)))
            .collect::<Vec<_>>()
            .join("\n");
        let block = TextBlock::new(prose);
        assert!(block.line_count() > 10);
        assert!(!block.is_contender());
    }

    #[test]
    fn test_candidate_blocks_drops_tiny_ones() {
        let blocks = candidate_blocks(vec![
            block_of_short_lines(4),
            block_of_short_lines(5),
            block_of_short_lines(12),
        ]);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_best_block_prefers_line_count_over_ratio() {
        let long = "z".repeat(70);
        // 12 short lines: ratio 1.0
        let pure = block_of_short_lines(12);
        // 20 lines, 14 short: ratio 0.7, but more lines
        let mixed = format!(
            "{}\n{long}\n{long}\n{long}\n{long}\n{long}\n{long}",
            block_of_short_lines(14)
        );
        let winner = best_block(candidate_blocks(vec![pure, mixed.clone()])).unwrap();
        assert_eq!(winner.line_count(), 20);
        assert_eq!(winner.text(), mixed);
    }

    #[test]
    fn test_best_block_tie_keeps_earliest() {
        let first = block_of_short_lines(12);
        let second = (0..12)
            .map(|i| format!("other lyric line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let winner = best_block(candidate_blocks(vec![first.clone(), second])).unwrap();
        assert_eq!(winner.text(), first);
    }

    #[test]
    fn test_best_block_none_without_contenders() {
        assert!(best_block(candidate_blocks(vec![block_of_short_lines(8)])).is_none());
        assert!(best_block(Vec::new()).is_none());
    }
}
