use std::fmt;
use std::ops::Range;

use xi_rope::delta::Transformer;
use xi_rope::{Delta, RopeInfo};

/// Which side of an insertion at exactly this position a mapped position sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Before,
    After,
}

/// The deltas of one transaction, in application order.
#[derive(Default)]
pub struct Mapping {
    deltas: Vec<Delta<RopeInfo>>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, delta: Delta<RopeInfo>) {
        self.deltas.push(delta);
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Maps a position in the pre-transaction document to the current one.
    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.deltas.iter().fold(pos, |pos, delta| {
            Transformer::new(delta).transform(pos, assoc == Assoc::After)
        })
    }

    /// Maps a node range. Insertions at either edge stay outside the range;
    /// a range whose content was deleted collapses and yields `None`.
    pub fn map_range(&self, range: &Range<usize>) -> Option<Range<usize>> {
        let start = self.map(range.start, Assoc::After);
        let end = self.map(range.end, Assoc::Before);
        (start < end).then_some(start..end)
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("steps", &self.deltas.len())
            .finish()
    }
}
