//! # Block Extractor
//!
//! Finds every block of one kind in a document body and decodes it into a
//! [`BlockRecord`]. Any input is valid input: malformed spans are skipped,
//! never reported as errors.

use serde::Serialize;

use super::{
    kinds::{BlockKind, FeedbackText, HARD_BREAK},
    patterns::{self, BlockPattern},
};

/// One structurally recognised region of a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRecord {
    pub id: String,
    pub kind: BlockKind,
    pub content: String,
}

impl BlockRecord {
    /// Feedback without a target id applies to the whole document.
    pub fn is_global_feedback(&self) -> bool {
        self.kind == BlockKind::Feedback && self.id.is_empty()
    }
}

/// Extracts every `pattern` match that carries a UUID, in source order.
///
/// The id is the first UUID inside the match. Content is the match with the
/// strip sentinels and that id removed, then trimmed. Matches without a UUID
/// are dropped. Ids are neither validated for uniqueness nor deduplicated.
pub fn extract_blocks(
    body: Option<&str>,
    pattern: BlockPattern,
    kind: BlockKind,
) -> Vec<BlockRecord> {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return Vec::new();
    };

    pattern
        .find
        .find_iter(body)
        .filter_map(|m| {
            let text = m.as_str();
            let Some(id) = patterns::uuid().find(text).map(|id| id.as_str()) else {
                log::trace!("dropping {kind:?} span at {} without an id", m.start());
                return None;
            };
            let content = pattern
                .strip
                .replace_all(text, "")
                .replacen(id, "", 1)
                .trim()
                .to_string();
            Some(BlockRecord {
                id: id.to_string(),
                kind,
                content,
            })
        })
        .collect()
}

pub fn extract_quiz_blocks(body: Option<&str>) -> Vec<BlockRecord> {
    extract_blocks(body, patterns::quiz_block(), BlockKind::Quiz)
}

pub fn extract_page_blocks(body: Option<&str>) -> Vec<BlockRecord> {
    extract_blocks(body, patterns::page_block(), BlockKind::PageBlock)
}

/// Extracts `{rr%…%rr}` feedback annotations.
///
/// Feedback ids are free-form, so the id is whatever precedes the first
/// `;#;` and the content runs up to the next one; anything after a second
/// separator is dropped. Without a separator the record gets an empty id
/// and the whole payload as content.
pub fn extract_feedback_blocks(body: Option<&str>) -> Vec<BlockRecord> {
    let Some(body) = body else {
        return Vec::new();
    };

    patterns::feedback()
        .find_iter(body)
        .map(|m| {
            let payload = m
                .as_str()
                .replacen(FeedbackText::OPEN, "", 1)
                .replacen(FeedbackText::CLOSE, "", 1);
            let mut parts = payload.split(FeedbackText::SEPARATOR);
            let head = parts.next().unwrap_or_default().to_string();
            let (id, content) = match parts.next() {
                Some(text) => (head, text.to_string()),
                None => (String::new(), head),
            };
            BlockRecord {
                id,
                kind: BlockKind::Feedback,
                content,
            }
        })
        .collect()
}

/// True when nothing but page blocks (and editor line-break artifacts) remains.
///
/// Quizzes are not stripped: a body holding page blocks and a quiz is not
/// "only page blocks".
pub fn is_only_page_blocks(body: &str) -> bool {
    let remaining = patterns::page_block().find.replace_all(body, "");
    remaining.replace(HARD_BREAK, "").trim().is_empty()
}
