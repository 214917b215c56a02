//! # Fence Block Rule
//!
//! Line-level recognition of blocks written on their own lines, the way the
//! editor's Markdown parser sees them:
//!
//! ```text
//! &&&3f2b8c1e-9a4d-4c2b-8e1f-0a9b8c7d6e5f
//! What is 2 + 2?
//! &&&
//! ```
//!
//! An opener is at least three marker bytes followed by an info string
//! (a strict block id or a URL, depending on the rule). A closer is a marker
//! run at least as long as the opener, indented less than four columns, with
//! nothing but whitespace after it. An unclosed block runs to the end of the
//! document.

use serde::Serialize;
use xi_rope::Rope;

use super::{
    extract::BlockRecord,
    kinds::{BlockKind, PageBlock, QuizBlock},
    patterns,
    rope::{LineRef, Span, lines_with_spans},
};

/// What an opener's info string must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FenceInfo {
    /// Exactly 36 chars matching the strict block id shape.
    Uuid,
    /// A link; used for embed fences.
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceRule {
    pub marker: u8,
    pub kind: BlockKind,
    pub info: FenceInfo,
}

impl FenceRule {
    pub const fn uuid(marker: u8, kind: BlockKind) -> Self {
        Self {
            marker,
            kind,
            info: FenceInfo::Uuid,
        }
    }

    pub const fn url(marker: u8, kind: BlockKind) -> Self {
        Self {
            marker,
            kind,
            info: FenceInfo::Url,
        }
    }

    /// Quiz (`&&&`) and page block (`(((`) fences.
    pub fn builtin() -> [FenceRule; 2] {
        [
            FenceRule::uuid(QuizBlock::MARKER, BlockKind::Quiz),
            FenceRule::uuid(PageBlock::MARKER, BlockKind::PageBlock),
        ]
    }

    fn open(&self, line: &LineRef) -> Option<Opener> {
        let (indent, skip) = line.indent();
        let rest = &line.content()[skip..];
        if rest.len() < 3 {
            return None;
        }

        let run = marker_run(rest, self.marker);
        if run < 3 {
            return None;
        }

        let info = &rest[run..];
        if info.as_bytes().contains(&self.marker) {
            return None;
        }
        let valid = match self.info {
            FenceInfo::Uuid => info.len() == 36 && patterns::strict_block_id().is_match(info),
            FenceInfo::Url => patterns::url().is_match(info),
        };
        if !valid {
            return None;
        }

        Some(Opener {
            rule: *self,
            run,
            indent,
            info: info.to_string(),
            start: line.span,
        })
    }
}

/// A fenced block found by [`scan_fences`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FencedBlock {
    pub kind: BlockKind,
    pub info_kind: FenceInfo,
    /// The opening marker run, e.g. `&&&`.
    pub markup: String,
    /// Text after the opening marker run: the block id or URL.
    pub info: String,
    /// Whole block including opener and closer lines.
    pub span: Span,
    /// Lines between opener and closer.
    pub content_span: Span,
    /// Content lines with the opener's indentation removed.
    pub content: String,
    /// False when the block was auto-closed by the end of the document.
    pub closed: bool,
}

impl FencedBlock {
    pub fn to_record(&self) -> BlockRecord {
        match self.info_kind {
            FenceInfo::Uuid => BlockRecord {
                id: self.info.clone(),
                kind: self.kind,
                content: self.content.trim().to_string(),
            },
            FenceInfo::Url => BlockRecord {
                id: super::embeds::embed_id(&self.info),
                kind: self.kind,
                content: self.info.clone(),
            },
        }
    }
}

struct Opener {
    rule: FenceRule,
    run: usize,
    indent: usize,
    info: String,
    start: Span,
}

impl Opener {
    fn closes(&self, line: &LineRef) -> bool {
        let (indent, skip) = line.indent();
        if indent >= 4 {
            return false;
        }
        let rest = &line.content()[skip..];
        let run = marker_run(rest, self.rule.marker);
        run >= self.run && rest[run..].trim_matches([' ', '\t']).is_empty()
    }
}

/// Line-at-a-time state machine, mirroring how block openers and closers are
/// consumed by the Markdown block parser.
pub struct FenceScanner<'r> {
    rules: &'r [FenceRule],
    open: Option<(Opener, Vec<LineRef>)>,
    out: Vec<FencedBlock>,
}

impl<'r> FenceScanner<'r> {
    pub fn new(rules: &'r [FenceRule]) -> Self {
        Self {
            rules,
            open: None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: LineRef) {
        if let Some((opener, lines)) = &mut self.open {
            if opener.closes(&line) {
                self.close(line.span.end, true);
            } else {
                lines.push(line);
            }
            return;
        }

        if let Some(opener) = self.rules.iter().find_map(|rule| rule.open(&line)) {
            self.open = Some((opener, vec![]));
        }
    }

    pub fn finish(mut self, doc_end: usize) -> Vec<FencedBlock> {
        // EOF auto-close
        if self.open.is_some() {
            self.close(doc_end, false);
        }
        self.out
    }

    fn close(&mut self, end: usize, closed: bool) {
        let Some((opener, lines)) = self.open.take() else {
            return;
        };

        let content_span = match (lines.first(), lines.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::new(opener.start.end, opener.start.end),
        };
        let content = lines
            .iter()
            .map(|l| strip_indent(&l.text, opener.indent))
            .collect();

        self.out.push(FencedBlock {
            kind: opener.rule.kind,
            info_kind: opener.rule.info,
            markup: char::from(opener.rule.marker).to_string().repeat(opener.run),
            info: opener.info,
            span: Span::new(opener.start.start, end),
            content_span,
            content,
            closed,
        });
    }
}

/// Every fenced block in the rope, in document order.
pub fn scan_fences(rope: &Rope, rules: &[FenceRule]) -> Vec<FencedBlock> {
    let mut scanner = FenceScanner::new(rules);
    for line in lines_with_spans(rope) {
        scanner.push(line);
    }
    scanner.finish(rope.len())
}

fn marker_run(s: &str, marker: u8) -> usize {
    s.bytes().take_while(|&b| b == marker).count()
}

/// Removes up to `cols` columns of leading whitespace.
fn strip_indent(line: &str, cols: usize) -> &str {
    let mut seen = 0;
    for (i, b) in line.bytes().enumerate() {
        if seen >= cols {
            return &line[i..];
        }
        match b {
            b' ' => seen += 1,
            b'\t' => seen += 4 - seen % 4,
            _ => return &line[i..],
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ID: &str = "3f2b8c1e-9a4d-4c2b-8e1f-0a9b8c7d6e5f";

    fn scan(text: &str) -> Vec<FencedBlock> {
        scan_fences(&Rope::from(text), &FenceRule::builtin())
    }

    #[test]
    fn closed_quiz_fence() {
        let text = format!("Intro\n&&&{ID}\nWhat is 2 + 2?\n&&&\nOutro\n");
        let blocks = scan(&text);
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.kind, BlockKind::Quiz);
        assert_eq!(b.info, ID);
        assert_eq!(b.markup, "&&&");
        assert_eq!(b.content, "What is 2 + 2?\n");
        assert!(b.closed);
        assert_eq!(b.span.slice(&text), format!("&&&{ID}\nWhat is 2 + 2?\n&&&\n"));
        assert_eq!(b.content_span.slice(&text), "What is 2 + 2?\n");
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let text = format!("((({ID}\nchild page\nmore");
        let blocks = scan(&text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::PageBlock);
        assert!(!blocks[0].closed);
        assert_eq!(blocks[0].span.end, text.len());
        assert_eq!(blocks[0].content, "child page\nmore");
    }

    #[test]
    fn shorter_closing_run_does_not_close() {
        let text = format!("&&&&{ID}\nbody\n&&&\nstill body\n&&&&\n");
        let blocks = scan(&text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].closed);
        assert_eq!(blocks[0].content, "body\n&&&\nstill body\n");
    }

    #[test]
    fn closer_with_trailing_text_is_content() {
        let text = format!("&&&{ID}\n&&& not a closer\n&&&  \n");
        let blocks = scan(&text);
        assert_eq!(blocks[0].content, "&&& not a closer\n");
    }

    #[test]
    fn invalid_header_is_not_a_fence() {
        assert!(scan("&&&not-a-uuid\nbody\n&&&\n").is_empty());
        // trailing space makes the info 37 chars
        assert!(scan(&format!("&&&{ID} \nbody\n&&&\n")).is_empty());
        // version nibble 9 is not a block id
        assert!(scan("&&&3f2b8c1e-9a4d-9c2b-8e1f-0a9b8c7d6e5f\nbody\n&&&\n").is_empty());
    }

    #[test]
    fn indented_opener_strips_indent_from_content() {
        let text = format!("  &&&{ID}\n    nested\n  &&&\n");
        let blocks = scan(&text);
        assert_eq!(blocks[0].content, "  nested\n");
    }

    #[test]
    fn url_rule_recognises_embed_fence() {
        let rules = [FenceRule::url(b'!', BlockKind::Embed)];
        let text = "!!!https://www.youtube.com/watch?v=abc\n!!!\n";
        let blocks = scan_fences(&Rope::from(text), &rules);
        assert_eq!(blocks.len(), 1);
        let record = blocks[0].to_record();
        assert_eq!(record.kind, BlockKind::Embed);
        assert_eq!(record.content, "https://www.youtube.com/watch?v=abc");
        assert_eq!(record.id.len(), 36);
    }

    #[test]
    fn to_record_trims_uuid_fence_content() {
        let text = format!("&&&{ID}\n\n  Pick one  \n\n&&&\n");
        let record = scan(&text)[0].to_record();
        assert_eq!(record.id, ID);
        assert_eq!(record.content, "Pick one");
    }
}
