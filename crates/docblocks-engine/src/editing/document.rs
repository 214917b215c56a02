use std::ops::Range;

use tree_sitter::{InputEdit, Parser, Point, Tree};
use tree_sitter_md::LANGUAGE;
use xi_rope::delta::DeltaElement;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::{Cmd, EditError, Patch};
use crate::parsing::{
    self, BlockRecord, FenceRule, FencedBlock, OrderedBlockReference,
    rope::{Span, slice_to_string},
    scan_fences,
};

/// A node of the Markdown block tree, by kind and byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRange {
    pub kind: &'static str,
    pub range: Range<usize>,
}

/// The editable document body.
///
/// - **Lossless storage**: the whole body in one `xi_rope::Rope`; `to_bytes()`
///   returns exactly what was loaded plus the applied edits
/// - **Incremental parsing**: a tree-sitter Markdown block tree, updated via
///   `tree.edit()` before every re-parse
/// - **Versioned**: the version counter increments once per applied delta
///
/// ```rust
/// # use docblocks_engine::editing::{Cmd, Document};
/// let mut doc = Document::from_bytes(b"- one\n- two\n").unwrap();
/// doc.apply(&Cmd::InsertText { at: 0, text: "# List\n\n".into() }).unwrap();
///
/// let item = doc.find_parent_node_closest_to_pos(10, "list_item").unwrap();
/// assert_eq!(item.range.start, 8);
/// ```
pub struct Document {
    pub(crate) buffer: Rope,
    /// Incremented on each applied delta
    pub(crate) version: u64,
    pub(crate) parser: Parser,
    /// None only if tree-sitter gave up parsing
    pub(crate) tree: Option<Tree>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        let buffer = Rope::from(text);

        let mut parser = Parser::new();
        parser.set_language(&LANGUAGE.into())?;
        let tree = parser.parse(text, None);

        Ok(Self {
            buffer,
            version: 0,
            parser,
            tree,
        })
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn buffer(&self) -> &Rope {
        &self.buffer
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    /// Compiles and applies a single command.
    pub fn apply(&mut self, cmd: &Cmd) -> Result<Patch, EditError> {
        let delta = cmd.compile(&self.buffer)?;
        Ok(self.apply_delta(&delta))
    }

    /// Applies an already validated delta.
    ///
    /// `tree.edit()` must see the OLD buffer to compute row/column points, so
    /// the input edits are derived before the buffer is replaced.
    pub(crate) fn apply_delta(&mut self, delta: &Delta<RopeInfo>) -> Patch {
        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in &delta.els {
            match op {
                DeltaElement::Copy(from, to) => cursor += to - from,
                DeltaElement::Insert(inserted) => {
                    changed.push(cursor..cursor + inserted.len());
                    cursor += inserted.len();
                }
            }
        }

        if let Some(mut old_tree) = self.tree.take() {
            for edit in self.delta_to_input_edits(delta) {
                old_tree.edit(&edit);
            }
            self.buffer = delta.apply(&self.buffer);
            self.tree = self.parser.parse(self.buffer.to_string(), Some(&old_tree));
        } else {
            self.buffer = delta.apply(&self.buffer);
            self.tree = self.parser.parse(self.buffer.to_string(), None);
        }

        self.version += 1;
        Patch {
            changed,
            version: self.version,
        }
    }

    /// Nearest node of kind `node_type` containing `pos`, starting from the
    /// smallest node at `pos` and walking up through its ancestors.
    pub fn find_parent_node_closest_to_pos(
        &self,
        pos: usize,
        node_type: &str,
    ) -> Option<NodeRange> {
        if pos > self.len() {
            return None;
        }
        let tree = self.tree.as_ref()?;
        let mut node = tree.root_node().descendant_for_byte_range(pos, pos);
        while let Some(n) = node {
            if n.kind() == node_type {
                return Some(NodeRange {
                    kind: n.kind(),
                    range: n.start_byte()..n.end_byte(),
                });
            }
            node = n.parent();
        }
        None
    }

    pub fn quiz_blocks(&self) -> Vec<BlockRecord> {
        parsing::extract_quiz_blocks(Some(&self.text()))
    }

    pub fn page_blocks(&self) -> Vec<BlockRecord> {
        parsing::extract_page_blocks(Some(&self.text()))
    }

    pub fn blocks_in_order(&self) -> Vec<OrderedBlockReference> {
        parsing::blocks_in_order(Some(&self.text()))
    }

    pub fn fenced_blocks(&self) -> Vec<FencedBlock> {
        scan_fences(&self.buffer, &FenceRule::builtin())
    }

    /// The fenced quiz or page block whose lines contain `pos`.
    pub fn fenced_block_at(&self, pos: usize) -> Option<FencedBlock> {
        self.fenced_blocks().into_iter().find(|b| b.span.contains(pos))
    }

    /// Text of `span`, clamped to the buffer.
    pub fn slice(&self, span: Span) -> String {
        slice_to_string(&self.buffer, span)
    }

    /// Convert xi-rope delta to tree-sitter InputEdits
    ///
    /// - xi-rope Delta: sequence of Copy(from, to) and Insert(text) operations
    /// - Gaps between Copy operations indicate deletions
    /// - tree-sitter InputEdit uses OLD document byte offsets and coordinates,
    ///   shifted by the edits already emitted
    fn delta_to_input_edits(&self, delta: &Delta<RopeInfo>) -> Vec<InputEdit> {
        let old_text = self.buffer.to_string();
        let mut edits = Vec::new();
        let mut old_pos = 0;
        // new_pos - old_pos, applied to every later old offset
        let mut shift: isize = 0;

        let mut push_edit = |start: usize, old_end: usize, inserted: &str, shift: isize| {
            let at = start.saturating_add_signed(shift);
            let start_position = to_point(byte_to_point_in_text(&old_text, start));
            let old_end_position = to_point(byte_to_point_in_text(&old_text, old_end));
            edits.push(InputEdit {
                start_byte: at,
                old_end_byte: at + (old_end - start),
                new_end_byte: at + inserted.len(),
                start_position,
                old_end_position,
                new_end_position: to_point(end_point(start_position, inserted)),
            });
        };

        for op in &delta.els {
            match op {
                DeltaElement::Copy(from, to) => {
                    if old_pos < *from {
                        push_edit(old_pos, *from, "", shift);
                        shift -= (*from - old_pos) as isize;
                    }
                    old_pos = *to;
                }
                DeltaElement::Insert(text) => {
                    let inserted = text.to_string();
                    push_edit(old_pos, old_pos, &inserted, shift);
                    shift += inserted.len() as isize;
                }
            }
        }

        if old_pos < delta.base_len {
            push_edit(old_pos, delta.base_len, "", shift);
        }

        edits
    }
}

fn to_point((row, column): (usize, usize)) -> Point {
    Point { row, column }
}

/// Position reached after inserting `text` at `start`.
fn end_point(start: Point, text: &str) -> (usize, usize) {
    match text.rsplit_once('\n') {
        Some((head, last)) => (start.row + head.matches('\n').count() + 1, last.len()),
        None => (start.row, start.column + text.len()),
    }
}

/// Convert byte offset to (row, column) position in given text
fn byte_to_point_in_text(text: &str, byte_offset: usize) -> (usize, usize) {
    let offset = byte_offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    (row, offset - line_start)
}

impl Clone for Document {
    fn clone(&self) -> Self {
        // Parser doesn't implement Clone
        let mut parser = Parser::new();
        let _ = parser.set_language(&LANGUAGE.into());
        let tree = parser.parse(self.buffer.to_string(), None);

        Self {
            buffer: self.buffer.clone(),
            version: self.version,
            parser,
            tree,
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
