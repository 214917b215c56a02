use crate::parsing::{
    kinds::{BlockKind, FeedbackText, FillInBlank},
    rope::Span,
};

use super::{cursor::Cursor, types::InlineNode};

/// An opening/closing sentinel pair recognised inside running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineRule {
    pub kind: BlockKind,
    pub open: &'static str,
    pub close: &'static str,
}

impl InlineRule {
    /// Fill-in-blank quizzes and feedback annotations.
    pub const BUILTIN: [InlineRule; 2] = [
        InlineRule {
            kind: BlockKind::Quiz,
            open: FillInBlank::OPEN,
            close: FillInBlank::CLOSE,
        },
        InlineRule {
            kind: BlockKind::Feedback,
            open: FeedbackText::OPEN,
            close: FeedbackText::CLOSE,
        },
    ];
}

/// Parses `s` into text and inline block nodes covering the whole input.
///
/// `base` is the byte offset of `s` in the body. Rules are tried in order at
/// each position; an opener without a closer is left as text.
pub fn parse_inline(base: usize, s: &str, rules: &[InlineRule]) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s, base);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        if let Some(node) = rules.iter().find_map(|rule| try_parse_block(&mut cur, rule)) {
            let span = node.span();
            flush_text(&mut out, text_start, span.start);
            text_start = span.end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// Attempts to parse one inline block at the cursor.
///
/// The info runs to the first closing sentinel after the opener. On failure
/// the cursor is left where it was.
fn try_parse_block(cur: &mut Cursor<'_>, rule: &InlineRule) -> Option<InlineNode> {
    if !cur.starts_with(rule.open) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(rule.open.len());
    let info_start = cur.pos();

    let Some(len) = cur.find(rule.close) else {
        *cur = saved;
        return None;
    };
    cur.bump_n(len);
    let info_end = cur.pos();
    cur.bump_n(rule.close.len());

    Some(InlineNode::Block {
        kind: rule.kind,
        full: Span {
            start,
            end: cur.pos(),
        },
        info: Span {
            start: info_start,
            end: info_end,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> Vec<InlineNode> {
        parse_inline(0, s, &InlineRule::BUILTIN)
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse("hello world"), vec![InlineNode::Text(Span::new(0, 11))]);
    }

    #[test]
    fn fill_in_blank_between_text() {
        let s = "2 + 2 = {bl%abc%lb}!";
        assert_eq!(
            parse(s),
            vec![
                InlineNode::Text(Span::new(0, 8)),
                InlineNode::Block {
                    kind: BlockKind::Quiz,
                    full: Span::new(8, 19),
                    info: Span::new(12, 15),
                },
                InlineNode::Text(Span::new(19, 20)),
            ]
        );
    }

    #[test]
    fn feedback_info_keeps_separator() {
        let s = "{rr%id;#;Nice%rr}";
        let nodes = parse(s);
        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            InlineNode::Block { kind, info, .. } => {
                assert_eq!(*kind, BlockKind::Feedback);
                assert_eq!(info.slice(s), "id;#;Nice");
            }
            other => panic!("expected feedback block, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_opener_becomes_text() {
        assert_eq!(
            parse("{bl%never closed"),
            vec![InlineNode::Text(Span::new(0, 16))]
        );
    }

    #[test]
    fn spans_are_absolute() {
        let nodes = parse_inline(100, "x{rr%y%rr}", &InlineRule::BUILTIN);
        assert_eq!(nodes[0], InlineNode::Text(Span::new(100, 101)));
        assert_eq!(nodes[1].span(), Span::new(101, 110));
    }

    #[test]
    fn multibyte_text_is_kept_whole() {
        let s = "café {bl%q%lb}";
        let nodes = parse(s);
        assert_eq!(nodes[0].span().slice(s), "café ");
        assert_eq!(nodes[1].span().slice(s), "{bl%q%lb}");
    }
}
