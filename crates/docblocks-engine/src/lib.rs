pub mod editing;
pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::{
    Cmd, Decoration, DecorationSet, DecorationTag, Document, EditError, EditorState, HoverAction,
    HoverEvent, HoverPlugin, Transaction, ViewDom,
};
pub use io::*;
pub use parsing::{
    BlockKind, BlockRecord, EmbedBlock, EmbedDescriptor, OrderedBlockReference, ParsedDoc,
    blocks_in_order, extract_embed_blocks, extract_feedback_blocks, extract_page_blocks,
    extract_quiz_blocks, is_only_page_blocks, parse_document,
};
