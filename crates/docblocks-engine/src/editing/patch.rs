use std::ops::Range;

/// Result of applying a command or transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    /// Inserted byte ranges in the new document.
    pub changed: Vec<Range<usize>>,
    pub version: u64,
}
