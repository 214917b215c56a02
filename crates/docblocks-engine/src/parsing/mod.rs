//! # Block Parsing
//!
//! Recognition of ID-tagged block regions inside a single serialized
//! Markdown body. Every function here is a pure function of the body text:
//! any input is valid and produces a (possibly empty) result.
//!
//! ## Modules
//!
//! - **`kinds`**: `BlockKind` and the sentinel strings of each block syntax
//! - **`patterns`**: compiled regex library (UUID, quiz, page, feedback, URL)
//! - **`extract`**: per-kind extractors producing `BlockRecord`s
//! - **`order`**: left-to-right ordering of quiz and page blocks
//! - **`fences`**: line-level fenced block rule (`&&&<uuid>` ... `&&&`)
//! - **`inline`**: sentinel blocks inside running text (`{bl%…%lb}`, `{rr%…%rr}`)
//! - **`embeds`**: paragraphs rendered as embeds by registered descriptors
//! - **`rope`**: spans and line iteration over an xi-rope buffer
//! - **`snapshot`**: stable serializable view for snapshot tests

pub mod embeds;
pub mod extract;
pub mod fences;
pub mod inline;
pub mod kinds;
pub mod order;
pub mod patterns;
pub mod rope;
pub mod snapshot;

use xi_rope::Rope;

pub use embeds::{EmbedBlock, EmbedDescriptor, embed_id, extract_embed_blocks, recognize_embeds};
pub use extract::{
    BlockRecord, extract_feedback_blocks, extract_page_blocks, extract_quiz_blocks,
    is_only_page_blocks,
};
pub use fences::{FenceRule, FencedBlock, scan_fences};
pub use kinds::BlockKind;
pub use order::{BlockScanner, OrderedBlockReference, blocks_in_order, sequence_numbers};

/// Everything the scanners recognise in one body.
#[derive(Debug)]
pub struct ParsedDoc {
    pub ordered: Vec<OrderedBlockReference>,
    pub quizzes: Vec<BlockRecord>,
    pub pages: Vec<BlockRecord>,
    pub feedback: Vec<BlockRecord>,
    pub fences: Vec<FencedBlock>,
    pub inline: Vec<inline::InlineNode>,
    pub embeds: Vec<EmbedBlock>,
}

pub fn parse_document(body: &str, embeds: &[EmbedDescriptor]) -> ParsedDoc {
    let rope = Rope::from(body);
    ParsedDoc {
        ordered: blocks_in_order(Some(body)),
        quizzes: extract_quiz_blocks(Some(body)),
        pages: extract_page_blocks(Some(body)),
        feedback: extract_feedback_blocks(Some(body)),
        fences: scan_fences(&rope, &FenceRule::builtin()),
        inline: inline::parse_inline(0, body, &inline::InlineRule::BUILTIN),
        embeds: recognize_embeds(body, embeds),
    }
}
