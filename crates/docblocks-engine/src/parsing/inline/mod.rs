//! # Inline Block Parsing
//!
//! Cursor-based recognition of blocks that live inside running text rather
//! than on their own lines: fill-in-blank quizzes `{bl%…%lb}` and feedback
//! annotations `{rr%…%rr}`.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, Block)
//! - **`cursor`**: `Cursor` for char-by-char scanning with absolute positions
//! - **`parser`**: `parse_inline()` entry point and the `InlineRule` table

pub mod cursor;
pub mod parser;
pub mod types;

pub use parser::{InlineRule, parse_inline};
pub use types::InlineNode;
