//! Greedy line wrapping against a caller-supplied width measure.
//!
//! The wrapper knows nothing about fonts. Hosts pass a `measure(text) -> width`
//! function (font metrics, terminal cells, ...) and a width budget in the same
//! unit. Lines are packed word by word; whitespace never forces a break.
//!
//! # Example
//! ```
//! use cellgrid_engine::layout::{wrap_lines, WrapOptions};
//!
//! let measure = |s: &str| s.chars().count() as f32 * 10.0;
//! let lines = wrap_lines("the quick brown fox", 100.0, measure, WrapOptions::default());
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

use std::convert::Infallible;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// How words wider than the budget are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WrapOptions {
    /// Split oversized words at grapheme boundaries instead of letting them overflow.
    pub break_word: bool,
}

impl WrapOptions {
    #[must_use]
    pub fn break_word(mut self, enabled: bool) -> Self {
        self.break_word = enabled;
        self
    }
}

/// Width of `text` in terminal cells. Usable as a `measure` when no font
/// metrics are available.
pub fn cell_width(text: &str) -> f32 {
    text.width() as f32
}

/// Wrap `text` into lines no wider than `max_width` (see [`try_wrap_lines`]).
pub fn wrap_lines<F>(text: &str, max_width: f32, mut measure: F, options: WrapOptions) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    match try_wrap_lines(
        text,
        max_width,
        |s| Ok::<f32, Infallible>(measure(s)),
        options,
    ) {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

/// Wrap `text` with a fallible measure. The first measure error is returned
/// unchanged.
///
/// Always returns at least one line (an empty text gives `[""]`), trims
/// trailing whitespace from every line, and terminates for any `max_width`:
/// each step consumes a token or a grapheme.
pub fn try_wrap_lines<F, E>(
    text: &str,
    max_width: f32,
    mut measure: F,
    options: WrapOptions,
) -> Result<Vec<String>, E>
where
    F: FnMut(&str) -> Result<f32, E>,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in tokenize(text) {
        if is_blank(token) {
            // Continuation lines never start with whitespace.
            if !(current.is_empty() && !lines.is_empty()) {
                current.push_str(token);
            }
            continue;
        }

        let mark = current.len();
        current.push_str(token);
        if measure(&current)? <= max_width {
            continue;
        }
        current.truncate(mark);
        flush(&mut lines, &mut current);

        if measure(token)? <= max_width {
            current.push_str(token);
        } else if options.break_word {
            for grapheme in token.graphemes(true) {
                let mark = current.len();
                current.push_str(grapheme);
                if mark > 0 && measure(&current)? > max_width {
                    current.truncate(mark);
                    flush(&mut lines, &mut current);
                    current.push_str(grapheme);
                }
            }
        } else {
            // Oversized word overflows on a line of its own.
            lines.push(token.to_string());
        }
    }

    flush(&mut lines, &mut current);
    if lines.is_empty() {
        lines.push(String::new());
    }
    Ok(lines)
}

/// Push the trimmed line if it has any visible content, then reset.
fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

/// Split into alternating runs of blank and non-blank grapheme clusters.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut run_blank: Option<bool> = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let blank = is_blank(grapheme);
        if run_blank.is_some_and(|b| b != blank) {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        run_blank = Some(blank);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ten_px(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    fn break_words() -> WrapOptions {
        WrapOptions::default().break_word(true)
    }

    #[test]
    fn test_tokenize_alternates_runs() {
        assert_eq!(tokenize("a  bc d"), vec!["a", "  ", "bc", " ", "d"]);
        assert_eq!(tokenize("  lead"), vec!["  ", "lead"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_quick_brown_fox_breaks_words() {
        let lines = wrap_lines("the quick brown fox", 40.0, ten_px, break_words());
        assert_eq!(lines, vec!["the", "quic", "k", "brow", "n", "fox"]);
        assert!(lines.iter().all(|l| ten_px(l) <= 40.0));
        assert_eq!(lines.concat(), "thequickbrownfox");
    }

    #[test]
    fn test_empty_text_gives_one_empty_line() {
        assert_eq!(wrap_lines("", 50.0, ten_px, WrapOptions::default()), vec![""]);
        assert_eq!(wrap_lines("   ", 50.0, ten_px, break_words()), vec![""]);
    }

    #[test]
    fn test_fitting_text_is_single_trimmed_line() {
        let lines = wrap_lines("hello world  ", 200.0, ten_px, WrapOptions::default());
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_whitespace_never_breaks_on_its_own() {
        // "ab" fits exactly; the trailing run would overflow but must not break.
        let lines = wrap_lines("ab      cd", 20.0, ten_px, WrapOptions::default());
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_oversized_word_overflows_without_break_word() {
        let lines = wrap_lines("a extraordinary b", 50.0, ten_px, WrapOptions::default());
        assert_eq!(lines, vec!["a", "extraordinary", "b"]);
    }

    #[test]
    fn test_zero_width_terminates() {
        let lines = wrap_lines("ab cd", 0.0, ten_px, WrapOptions::default());
        assert_eq!(lines, vec!["ab", "cd"]);

        let lines = wrap_lines("ab cd", 0.0, ten_px, break_words());
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_break_word_keeps_grapheme_clusters() {
        let text = "e\u{301}e\u{301}e\u{301}";
        let lines = wrap_lines(text, 10.0, |s| s.graphemes(true).count() as f32 * 10.0, break_words());
        assert_eq!(lines, vec!["e\u{301}", "e\u{301}", "e\u{301}"]);
    }

    #[test]
    fn test_cell_width_counts_wide_chars() {
        assert_eq!(cell_width("abc"), 3.0);
        assert_eq!(cell_width("日本"), 4.0);
        let lines = wrap_lines("日本 語", 4.0, cell_width, WrapOptions::default());
        assert_eq!(lines, vec!["日本", "語"]);
    }

    #[test]
    fn test_measure_error_propagates() {
        let mut calls = 0;
        let result: Result<Vec<String>, &str> = try_wrap_lines(
            "one two three",
            100.0,
            |s| {
                calls += 1;
                if s.contains("two") { Err("no font") } else { Ok(ten_px(s)) }
            },
            WrapOptions::default(),
        );
        assert_eq!(result, Err("no font"));
        assert!(calls >= 2);
    }

    proptest! {
        #[test]
        fn prop_lines_fit_when_breaking_words(text in "[a-z ]{0,60}", width in 0u32..120) {
            let width = width as f32;
            for line in wrap_lines(&text, width, ten_px, break_words()) {
                prop_assert!(ten_px(&line) <= width || line.chars().count() == 1);
                prop_assert_eq!(line.trim_end(), line.as_str());
            }
        }

        #[test]
        fn prop_only_single_words_overflow(text in "[a-z ]{0,60}", width in 0u32..120) {
            let width = width as f32;
            for line in wrap_lines(&text, width, ten_px, WrapOptions::default()) {
                prop_assert!(ten_px(&line) <= width || !line.contains(' '));
            }
        }

        #[test]
        fn prop_fitting_text_is_untouched(text in "[a-z ]{0,30}") {
            let lines = wrap_lines(&text, ten_px(&text), ten_px, break_words());
            prop_assert_eq!(lines, vec![text.trim_end().to_string()]);
        }

        #[test]
        fn prop_words_survive_in_order(text in "[a-z ]{0,60}", width in 0u32..120) {
            let lines = wrap_lines(&text, width as f32, ten_px, break_words());
            let joined: String = lines.concat().split_whitespace().collect();
            let expected: String = text.split_whitespace().collect();
            prop_assert_eq!(joined, expected);
        }
    }
}
