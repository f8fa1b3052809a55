//! Reading-time estimation
//!
//! Words are counted by splitting on single spaces, matching the original
//! front-end exactly: consecutive spaces produce empty tokens that are
//! still counted, so "a  b" counts as 3 words. Known inaccuracy, kept for
//! behavioral parity.

use crate::api::ContentSection;

/// Assumed reading speed
const WORDS_PER_MINUTE: usize = 200;

/// Estimated minutes to read the given content sections.
///
/// Empty content yields 0, not 1: no minimum floor is applied.
pub fn read_time_minutes(content: &[ContentSection]) -> u64 {
    let words: usize = content
        .iter()
        .map(|section| {
            let heading_words = section.heading.split(' ').count();
            let body_words: usize = section
                .body
                .iter()
                .map(|block| block.text.split(' ').count())
                .sum();
            heading_words + body_words
        })
        .sum();

    words.div_ceil(WORDS_PER_MINUTE) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RichTextBlock;

    fn section(heading: &str, body: &[&str]) -> ContentSection {
        ContentSection {
            heading: heading.to_string(),
            body: body
                .iter()
                .map(|text| RichTextBlock::new("paragraph", text))
                .collect(),
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_content_is_zero_minutes() {
        assert_eq!(read_time_minutes(&[]), 0);
    }

    #[test]
    fn test_five_words_round_up_to_one_minute() {
        let content = [section("a b c", &["d e"])];
        assert_eq!(read_time_minutes(&content), 1);
    }

    #[test]
    fn test_exact_multiple_of_reading_speed() {
        // 1 heading word + 399 body words = 400 -> ceil(400/200) = 2
        let content = [section("heading", &[&words(399)])];
        assert_eq!(read_time_minutes(&content), 2);
    }

    #[test]
    fn test_one_word_past_the_multiple_rounds_up() {
        // 1 heading word + 400 body words = 401 -> ceil(401/200) = 3
        let content = [section("heading", &[&words(400)])];
        assert_eq!(read_time_minutes(&content), 3);
    }

    #[test]
    fn test_consecutive_spaces_inflate_the_count() {
        // single-space split: "a  b" -> ["a", "", "b"] -> 3 tokens
        let content = [section("a  b", &[])];
        assert_eq!(read_time_minutes(&content), 1);

        let padded = [section("", &[&format!("{}  {}", words(100), words(97))])];
        // 100 + 97 words plus one empty token from the double space,
        // plus 1 for the empty heading: 199 total, still one minute
        assert_eq!(read_time_minutes(&padded), 1);
    }

    #[test]
    fn test_multiple_sections_accumulate() {
        let content = [
            section("one two", &[&words(100)]),
            section("three", &[&words(100)]),
        ];
        // 2 + 100 + 1 + 100 = 203 -> 2 minutes
        assert_eq!(read_time_minutes(&content), 2);
    }
}
