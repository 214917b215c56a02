use crate::parsing::{ParsedDoc, inline::InlineNode, rope::Span};

fn in_bounds(sp: Span, len: usize) -> bool {
    sp.start <= sp.end && sp.end <= len
}

/// Panics when a scanner produced a span that cannot be sliced from `body`.
pub fn check(body: &str, doc: &ParsedDoc) {
    let n = body.len();

    for f in &doc.fences {
        assert!(
            in_bounds(f.span, n),
            "fence span out of bounds: {:?} (body len: {n})",
            f.span
        );
        assert!(
            f.content_span.start >= f.span.start && f.content_span.end <= f.span.end,
            "fence content not contained in block: content {:?}, block {:?}",
            f.content_span,
            f.span
        );
    }
    for pair in doc.fences.windows(2) {
        assert!(
            pair[0].span.end <= pair[1].span.start,
            "fences overlap: {:?} and {:?}",
            pair[0].span,
            pair[1].span
        );
    }

    let mut next = 0;
    for node in &doc.inline {
        let sp = node.span();
        assert!(in_bounds(sp, n), "inline span out of bounds: {sp:?} (body len: {n})");
        assert_eq!(sp.start, next, "inline nodes leave a gap before {sp:?}");
        if let InlineNode::Block { info, .. } = node {
            assert!(
                info.start >= sp.start && info.end <= sp.end,
                "inline info {info:?} outside block {sp:?}"
            );
        }
        next = sp.end;
    }
    assert!(
        doc.inline.is_empty() || next == n,
        "inline nodes stop at {next}, body len {n}"
    );

    for e in &doc.embeds {
        assert!(in_bounds(e.span, n), "embed span out of bounds: {:?}", e.span);
    }
}
