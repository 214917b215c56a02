use serde::Serialize;

use crate::parsing::{kinds::BlockKind, rope::Span};

/// A parsed inline node with absolute byte spans into the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InlineNode {
    /// Text outside any inline block.
    Text(Span),
    /// A sentinel-delimited inline block such as `{bl%<id>%lb}`.
    Block {
        kind: BlockKind,
        /// Full span including both sentinels.
        full: Span,
        /// Span between the opening and closing sentinel.
        info: Span,
    },
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::Block { full, .. } => *full,
        }
    }
}
