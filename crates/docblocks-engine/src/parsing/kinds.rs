//! # Block Kinds
//!
//! Every embedded block convention owns its sentinel strings here. Scanners,
//! patterns and serializers refer to these constants; they never hardcode
//! `&&&` or `{rr%` themselves.

use serde::Serialize;

/// The kind of a recognised block region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Quiz,
    PageBlock,
    Feedback,
    Embed,
}

impl BlockKind {
    /// Human-facing label used when numbering blocks ("Question 3", "Page 1").
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Quiz => "Question",
            BlockKind::PageBlock => "Page",
            BlockKind::Feedback => "Feedback",
            BlockKind::Embed => "Embed",
        }
    }
}

/// Fenced quiz: `&&&<uuid>\n<content>\n&&&`.
pub struct QuizBlock;

impl QuizBlock {
    pub const MARKER: u8 = b'&';
    pub const FENCE: &'static str = "&&&";
}

/// Self-closing fill-in-blank quiz: `{bl%<uuid>%lb}`.
pub struct FillInBlank;

impl FillInBlank {
    pub const OPEN: &'static str = "{bl%";
    pub const CLOSE: &'static str = "%lb}";
}

/// Nested page reference: `(((<uuid>\n<content>(((`.
pub struct PageBlock;

impl PageBlock {
    pub const MARKER: u8 = b'(';
    pub const FENCE: &'static str = "(((";
}

/// Inline reviewer feedback: `{rr%<id>;#;<text>%rr}`.
pub struct FeedbackText;

impl FeedbackText {
    pub const OPEN: &'static str = "{rr%";
    pub const CLOSE: &'static str = "%rr}";
    pub const SEPARATOR: &'static str = ";#;";
}

/// Line-break artifact the rich editor leaves in serialized bodies.
pub const HARD_BREAK: char = '\\';
