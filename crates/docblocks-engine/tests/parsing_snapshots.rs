use docblocks_engine::parsing::{parse_document, snapshot};

#[test]
fn fixture_ordering() {
    assert_fixture("ordering");
}

#[test]
fn fixture_inline_feedback() {
    assert_fixture("inline_feedback");
}

#[test]
fn fixture_unclosed_fence() {
    assert_fixture("unclosed_fence");
}

fn assert_fixture(name: &str) {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let doc = parse_document(&md, &[]);
    snapshot::invariants(&md, &doc);

    let snap = snapshot::normalize(&md, &doc);
    insta::assert_yaml_snapshot!(name, snap);
}

/// Every fence span slices back to text that starts with its own markup
#[test]
fn fence_spans_are_lossless() {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/ordering.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let doc = parse_document(&md, &[]);
    assert_eq!(doc.fences.len(), 3);
    for fence in &doc.fences {
        let text = fence.span.slice(&md);
        assert!(text.starts_with(&fence.markup), "{text:?}");
        assert!(text.contains(&fence.info));
    }
}

/// Sentinels inside a fenced quiz are not mistaken for inline blocks
/// by the ordering scan
#[test]
fn fenced_quiz_is_ordered_once() {
    let md = "&&&cccccccc-2222-4222-8222-222222222222\nPick {rr%a note%rr}\n&&&\n";
    let doc = parse_document(md, &[]);

    assert_eq!(doc.ordered.len(), 1);
    assert_eq!(doc.feedback.len(), 1);
    assert_eq!(doc.fences.len(), 1);
}
