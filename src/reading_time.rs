// src/reading_time.rs
// =============================================================================
// Reading time estimates for lesson READMEs.
//
// Two readers are modelled:
// - prose: every text node of the README, at 200 words per minute
// - python: every fenced ```python block, counting only the line that
//   follows the fence, at half speed (x2 words), plus a flat 5 minutes to
//   set up and run the code
//
// The flat 5 minutes is added unconditionally and taken back off the total
// when the README has no python blocks at all. Published estimates were
// produced this way, so the arithmetic is kept exactly:
//
//   prose_minutes  = round(prose_words / 200)
//   code_minutes   = round(code_words * 2 / 200) + 5
//   total_minutes  = prose_minutes + code_minutes  (- 5 if no code blocks)
//
// Rounding is half-to-even (2.5 -> 2, 3.5 -> 4).
//
// Words are counted by splitting on single spaces, so a run of two spaces
// or a lone newline node counts as a word. This matches the reference
// reports; do not "fix" it without regenerating them.
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

use crate::extract::text_nodes;

pub const WORDS_PER_MINUTE: f64 = 200.0;
pub const CODE_SETUP_MINUTES: f64 = 5.0;
const CODE_WORD_WEIGHT: f64 = 2.0;

fn python_fence() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"```python.*\n.*").unwrap())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingTimeRow {
    /// Text nodes of the parsed README
    pub text_blocks: Vec<String>,
    pub prose_word_count: usize,
    pub prose_minutes: f64,
    /// Each match: the fence line plus the first line of code
    pub code_blocks: Vec<String>,
    pub code_block_count: usize,
    pub code_words: usize,
    pub code_minutes: f64,
    pub total_minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingTime {
    Estimated(ReadingTimeRow),
    /// No README content to estimate from
    Unavailable,
}

fn count_words(text: &str) -> usize {
    text.split(' ').count()
}

fn minutes(words: f64) -> f64 {
    (words / WORDS_PER_MINUTE).round_ties_even()
}

// Estimates the reading time of a README
//
// `content` is the raw README source, or None when no README was found.
pub fn estimate_reading_time(content: Option<&str>) -> ReadingTime {
    let Some(source) = content else {
        return ReadingTime::Unavailable;
    };

    let text_blocks = text_nodes(source);
    let prose_word_count: usize = text_blocks.iter().map(|block| count_words(block)).sum();
    let prose_minutes = minutes(prose_word_count as f64);

    // Fences are matched on the raw source, not the parsed document
    let code_blocks: Vec<String> = python_fence()
        .find_iter(source)
        .map(|m| m.as_str().to_string())
        .collect();
    let code_block_count = code_blocks.len();
    let code_words: usize = code_blocks.iter().map(|block| count_words(block)).sum();
    let code_minutes = minutes(code_words as f64 * CODE_WORD_WEIGHT) + CODE_SETUP_MINUTES;

    let mut total_minutes = prose_minutes + code_minutes;
    if code_block_count == 0 {
        total_minutes -= CODE_SETUP_MINUTES;
    }

    ReadingTime::Estimated(ReadingTimeRow {
        text_blocks,
        prose_word_count,
        prose_minutes,
        code_blocks,
        code_block_count,
        code_words,
        code_minutes,
        total_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(content: &str) -> ReadingTimeRow {
        match estimate_reading_time(Some(content)) {
            ReadingTime::Estimated(row) => row,
            ReadingTime::Unavailable => panic!("expected an estimate"),
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_missing_content_is_unavailable() {
        let estimate = estimate_reading_time(None);
        assert_eq!(estimate, ReadingTime::Unavailable);
    }

    #[test]
    fn test_no_code_blocks_drops_setup_minutes() {
        let row = estimate(&words(400));

        assert_eq!(row.prose_word_count, 400);
        assert_eq!(row.prose_minutes, 2.0);
        assert_eq!(row.code_block_count, 0);
        assert_eq!(row.code_words, 0);
        assert_eq!(row.code_minutes, 5.0);
        assert_eq!(row.total_minutes, 2.0);
    }

    #[test]
    fn test_one_python_block_keeps_setup_minutes() {
        // The fence line and the first code line are counted together:
        // "```python\na" + 9 more space-separated tokens = 10 words
        let source = "```python\na b c d e f g h i j\n```";
        let row = estimate(source);

        assert_eq!(row.code_block_count, 1);
        assert_eq!(row.code_blocks, vec!["```python\na b c d e f g h i j".to_string()]);
        assert_eq!(row.code_words, 10);
        assert_eq!(row.code_minutes, 5.0);
        assert_eq!(row.prose_minutes, 0.0);
        assert_eq!(row.total_minutes, 5.0);
    }

    #[test]
    fn test_only_first_code_line_is_counted() {
        let source = "```python\nx = 1\ny = 2\nz = 3\n```";
        let row = estimate(source);
        assert_eq!(row.code_block_count, 1);
        // "```python\nx", "=", "1"
        assert_eq!(row.code_words, 3);
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        // 500 / 200 = 2.5 -> 2
        assert_eq!(estimate(&words(500)).prose_minutes, 2.0);
        // 700 / 200 = 3.5 -> 4
        assert_eq!(estimate(&words(700)).prose_minutes, 4.0);
        // 300 / 200 = 1.5 -> 2
        assert_eq!(estimate(&words(300)).prose_minutes, 2.0);
    }

    #[test]
    fn test_prose_and_code_combine() {
        let source = format!(
            "{}\n```python\n{}\n```\n```python\n{}\n```",
            words(599),
            words(100),
            words(100)
        );
        let row = estimate(&source);

        assert_eq!(row.code_block_count, 2);
        assert_eq!(row.code_words, 200);
        // 200 * 2 / 200 = 2, plus setup
        assert_eq!(row.code_minutes, 7.0);
        assert_eq!(row.total_minutes, row.prose_minutes + 7.0);
    }

    #[test]
    fn test_inline_html_is_split_into_text_nodes() {
        let row = estimate("Hello <b>bold world</b> again");
        assert_eq!(row.text_blocks, vec!["Hello ", "bold world", " again"]);
        // "Hello", "" + "bold", "world" + "", "again"
        assert_eq!(row.prose_word_count, 6);
    }

    #[test]
    fn test_comments_count_as_prose() {
        let row = estimate("<!-- three hidden words -->\nhello world");
        // " three hidden words " splits into 5 tokens, "hello world" into 2
        assert_eq!(row.prose_word_count, 7);
    }
}
