use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

/// Why a command could not be compiled against the current buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("range {start}..{end} out of bounds (document length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("inverted range {start}..{end}")]
    Inverted { start: usize, end: usize },
    #[error("offset {0} is not on a char boundary")]
    NotCharBoundary(usize),
}

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
}

impl Cmd {
    /// The range of the old buffer this command replaces.
    pub fn range(&self) -> Range<usize> {
        match self {
            Cmd::InsertText { at, .. } => *at..*at,
            Cmd::DeleteRange { range } | Cmd::ReplaceRange { range, .. } => range.clone(),
        }
    }

    /// Compile into a delta against `rope`, rejecting ranges xi-rope would
    /// panic on.
    pub fn compile(&self, rope: &Rope) -> Result<Delta<RopeInfo>, EditError> {
        let range = self.range();
        check_range(rope, &range)?;

        let mut builder = Builder::new(rope.len());
        match self {
            Cmd::InsertText { text, .. } | Cmd::ReplaceRange { text, .. } => {
                builder.replace(range, Rope::from(text.as_str()));
            }
            Cmd::DeleteRange { .. } => builder.delete(range),
        }
        Ok(builder.build())
    }
}

fn check_range(rope: &Rope, range: &Range<usize>) -> Result<(), EditError> {
    let (start, end, len) = (range.start, range.end, rope.len());
    if start > end {
        return Err(EditError::Inverted { start, end });
    }
    if end > len {
        return Err(EditError::OutOfBounds { start, end, len });
    }

    let text = rope.slice_to_cow(0..len);
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary(offset));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn apply(text: &str, cmd: Cmd) -> Result<String, EditError> {
        let rope = Rope::from(text);
        Ok(cmd.compile(&rope)?.apply(&rope).to_string())
    }

    #[test]
    fn insert_text() {
        let cmd = Cmd::InsertText {
            at: 5,
            text: " there".into(),
        };
        assert_eq!(apply("Hello World", cmd).unwrap(), "Hello there World");
    }

    #[test]
    fn delete_range() {
        let cmd = Cmd::DeleteRange { range: 5..11 };
        assert_eq!(apply("Hello World", cmd).unwrap(), "Hello");
    }

    #[test]
    fn replace_range() {
        let cmd = Cmd::ReplaceRange {
            range: 0..5,
            text: "Howdy".into(),
        };
        assert_eq!(apply("Hello World", cmd).unwrap(), "Howdy World");
    }

    #[test]
    fn insert_at_end_is_valid() {
        let cmd = Cmd::InsertText {
            at: 2,
            text: "!".into(),
        };
        assert_eq!(apply("hi", cmd).unwrap(), "hi!");
    }

    #[rstest]
    #[case(Cmd::InsertText { at: 3, text: "x".into() }, EditError::OutOfBounds { start: 3, end: 3, len: 2 })]
    #[case(Cmd::DeleteRange { range: 0..9 }, EditError::OutOfBounds { start: 0, end: 9, len: 2 })]
    #[case(Cmd::DeleteRange { range: 2..1 }, EditError::Inverted { start: 2, end: 1 })]
    fn invalid_ranges_are_rejected(#[case] cmd: Cmd, #[case] expected: EditError) {
        assert_eq!(apply("hi", cmd), Err(expected));
    }

    #[test]
    fn offset_inside_multibyte_char_is_rejected() {
        let cmd = Cmd::InsertText {
            at: 1,
            text: "x".into(),
        };
        assert_eq!(apply("é!", cmd), Err(EditError::NotCharBoundary(1)));
    }
}
