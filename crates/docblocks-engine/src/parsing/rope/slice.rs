use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// The span is clamped to the rope so stale spans never panic inside xi-rope.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    let end = sp.end.min(rope.len());
    let start = sp.start.min(end);
    rope.slice_to_cow(start..end).into_owned()
}

/// Shortens `text` to at most `max` bytes on a char boundary, adding "..." when cut.
///
/// Used for human-readable snapshot and CLI output.
pub fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &text[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("hello", 0), "...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        // "é" is two bytes; cutting at 2 would split it
        assert_eq!(preview("aé b", 2), "a...");
    }

    #[test]
    fn slice_to_string_clamps_stale_spans() {
        let rope = Rope::from("hello world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 11)), "world");
        assert_eq!(slice_to_string(&rope, Span::new(6, 99)), "world");
        assert_eq!(slice_to_string(&rope, Span::new(50, 99)), "");
    }
}
