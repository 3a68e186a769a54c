//! Title wrapping against real glyph widths.
//!
//! Greedy word wrap: words accumulate into the current line until adding
//! the next one would exceed the pixel budget, measured through the
//! [`TextBackend`] so wrap points reflect actual advance widths. Output is
//! bounded by a line budget; overflowing content is truncated with an
//! ellipsis rather than dropped silently.

use super::backend::TextBackend;

/// Marker appended to truncated content.
pub const ELLIPSIS: char = '…';

/// Character budget for the final line when the text overflows `max_lines`.
const OVERFLOW_LINE_MAX_CHARS: usize = 40;

/// An ordered list of wrapped title lines.
///
/// At most `max_lines` entries; no entry is empty. Every line except
/// possibly the last fits the pixel budget it was wrapped against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
}

impl WrappedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Wrap `text` into at most `max_lines` lines of at most `max_width_px`
/// rendered pixels each.
///
/// A single word wider than the budget is truncated to roughly 4/5 of its
/// characters plus an ellipsis instead of looping; its line may still
/// exceed the budget. When the text needs more than `max_lines` lines, the
/// first `max_lines - 1` stay unchanged and the remainder is collapsed into
/// a final line of at most 40 characters plus an ellipsis.
pub fn wrap_title(
    text: &str,
    backend: &impl TextBackend,
    max_width_px: f32,
    max_lines: usize,
) -> WrappedText {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || max_lines == 0 {
        return WrappedText { lines: Vec::new() };
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in words {
        let word = if backend.line_width(word) > max_width_px {
            truncate_oversized(word)
        } else {
            word.to_string()
        };
        if current.is_empty() {
            current = word;
            continue;
        }
        let candidate = format!("{current} {word}");
        if backend.line_width(&candidate) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let rest = lines[max_lines - 1..].join(" ");
        lines.truncate(max_lines - 1);
        lines.push(truncate_overflow(&rest));
    }

    WrappedText { lines }
}

/// Shorten a word that alone exceeds the pixel budget: keep 4/5 of its
/// characters (at least one) and mark the cut.
fn truncate_oversized(word: &str) -> String {
    let count = word.chars().count();
    let keep = (count * 4 / 5).max(1);
    let mut out: String = word.chars().take(keep).collect();
    out.push(ELLIPSIS);
    out
}

/// Collapse overflowing content into one bounded, ellipsis-marked line.
fn truncate_overflow(rest: &str) -> String {
    if rest.chars().count() > OVERFLOW_LINE_MAX_CHARS {
        let cut: String = rest.chars().take(OVERFLOW_LINE_MAX_CHARS).collect();
        format!("{}{}", cut.trim_end(), ELLIPSIS)
    } else {
        format!("{rest}{ELLIPSIS}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::tests::MockTextBackend;

    // Mock widths: narrow chars 4px, 'm'/'w' 12px, space 5px, default 8px.

    #[test]
    fn empty_text_yields_no_lines() {
        let backend = MockTextBackend::new();
        assert!(wrap_title("", &backend, 100.0, 3).is_empty());
        assert!(wrap_title("   ", &backend, 100.0, 3).is_empty());
    }

    #[test]
    fn zero_line_budget_yields_no_lines() {
        let backend = MockTextBackend::new();
        assert!(wrap_title("hello", &backend, 100.0, 0).is_empty());
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let backend = MockTextBackend::new();
        let wrapped = wrap_title("ola", &backend, 100.0, 3);
        assert_eq!(wrapped.lines, vec!["ola"]);
    }

    #[test]
    fn greedy_wrap_breaks_before_overflow() {
        let backend = MockTextBackend::new();
        // "aaa" measures 24px, a space 5px: "aaa bbb" = 53px fits in 60px,
        // adding " ccc" would reach 82px.
        let wrapped = wrap_title("aaa bbb ccc", &backend, 60.0, 5);
        assert_eq!(wrapped.lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn wrap_points_follow_glyph_widths_not_char_counts() {
        let backend = MockTextBackend::new();
        // Same character counts, different widths: narrow "iiii" (16px)
        // packs three words per 60px line, wide "mmmm" (48px) only one.
        let narrow = wrap_title("iiii iiii iiii", &backend, 60.0, 5);
        let wide = wrap_title("mmmm mmmm mmmm", &backend, 60.0, 5);
        assert_eq!(narrow.lines.len(), 1);
        assert_eq!(wide.lines.len(), 3);
    }

    #[test]
    fn all_lines_except_last_fit_the_budget() {
        let backend = MockTextBackend::new();
        let text = "uma frase comprida que precisa de varias linhas para caber";
        let wrapped = wrap_title(text, &backend, 120.0, 10);
        for line in &wrapped.lines[..wrapped.lines.len() - 1] {
            assert!(
                backend.line_width(line) <= 120.0,
                "line {line:?} measures {}px",
                backend.line_width(line)
            );
        }
    }

    #[test]
    fn oversized_single_word_is_truncated_once() {
        let backend = MockTextBackend::new();
        // 20 'a's measure 160px; 4/5 of 20 chars survive plus the marker.
        let wrapped = wrap_title(&"a".repeat(20), &backend, 60.0, 3);
        assert_eq!(wrapped.lines.len(), 1);
        assert_eq!(wrapped.lines[0].chars().count(), 17);
        assert!(wrapped.lines[0].ends_with(ELLIPSIS));
    }

    #[test]
    fn overflow_beyond_line_budget_gets_ellipsis() {
        let backend = MockTextBackend::new();
        // Each "wwww" is 48px, so every word is its own 50px line.
        let wrapped = wrap_title("wwww wwww wwww wwww wwww", &backend, 50.0, 3);
        assert_eq!(wrapped.lines.len(), 3);
        assert_eq!(wrapped.lines[0], "wwww");
        assert_eq!(wrapped.lines[1], "wwww");
        assert_eq!(wrapped.lines[2], "wwww wwww wwww…");
    }

    #[test]
    fn long_overflow_is_capped_at_forty_chars() {
        let backend = MockTextBackend::new();
        let text = "palavra ".repeat(12);
        let wrapped = wrap_title(&text, &backend, 70.0, 2);
        assert_eq!(wrapped.lines.len(), 2);
        let last = wrapped.lines.last().unwrap();
        assert!(last.ends_with(ELLIPSIS));
        assert!(last.chars().count() <= OVERFLOW_LINE_MAX_CHARS + 1);
    }

    #[test]
    fn exact_fit_has_no_ellipsis() {
        let backend = MockTextBackend::new();
        let wrapped = wrap_title("wwww wwww wwww", &backend, 50.0, 3);
        assert_eq!(wrapped.lines.len(), 3);
        assert!(!wrapped.lines.last().unwrap().contains(ELLIPSIS));
    }

    #[test]
    fn never_exceeds_line_budget() {
        let backend = MockTextBackend::new();
        for text in ["a", "aa bb cc dd ee ff gg hh", &"mmmm ".repeat(30)] {
            for max_lines in 1..=4 {
                let wrapped = wrap_title(text, &backend, 40.0, max_lines);
                assert!(wrapped.lines.len() <= max_lines);
                assert!(wrapped.lines.iter().all(|l| !l.is_empty()));
            }
        }
    }
}
