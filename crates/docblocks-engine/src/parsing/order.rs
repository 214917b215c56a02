//! # Ordering Resolver
//!
//! One left-to-right pass over the body that yields quiz and page blocks in
//! the order they appear. That order is the only source of the human-facing
//! numbering ("Question 3").
//!
//! The scan is value-semantic: [`BlockScanner::scan_from`] takes an offset
//! and returns the match plus the offset to continue from, so no cursor is
//! shared between callers and repeated scans always agree.

use regex::Regex;
use serde::Serialize;

use super::{kinds::BlockKind, patterns, rope::Span};

/// Position of a block relative to every other block in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedBlockReference {
    pub id: String,
    pub kind: BlockKind,
}

/// A raw quiz-or-page match before id extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    pub kind: BlockKind,
    pub span: Span,
    /// First UUID inside the match, if any.
    pub id: Option<String>,
}

/// Stateless scanner over the combined quiz-or-page pattern.
#[derive(Debug, Clone, Copy)]
pub struct BlockScanner {
    pattern: &'static Regex,
}

impl Default for BlockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockScanner {
    pub fn new() -> Self {
        Self {
            pattern: patterns::quiz_or_page_block(),
        }
    }

    /// Finds the next block starting at or after `offset`.
    ///
    /// Returns the match and the offset to pass to the next call, or `None`
    /// when the rest of the body holds no block.
    pub fn scan_from(&self, body: &str, offset: usize) -> Option<(BlockMatch, usize)> {
        if offset > body.len() {
            return None;
        }
        let caps = self.pattern.captures_at(body, offset)?;
        let (kind, m) = match (caps.name("quiz"), caps.name("page")) {
            (Some(m), _) => (BlockKind::Quiz, m),
            (None, Some(m)) => (BlockKind::PageBlock, m),
            (None, None) => return None,
        };
        let span = Span::new(m.start(), m.end());
        let id = patterns::uuid()
            .find(m.as_str())
            .map(|id| id.as_str().to_string());

        let next = if span.is_empty() {
            span.end + body[span.end..].chars().next().map_or(1, char::len_utf8)
        } else {
            span.end
        };
        Some((BlockMatch { kind, span, id }, next))
    }

    /// Iterates every match in the body from the start.
    pub fn matches(self, body: &str) -> impl Iterator<Item = BlockMatch> + '_ {
        let mut offset = 0;
        std::iter::from_fn(move || {
            let (found, next) = self.scan_from(body, offset)?;
            offset = next;
            Some(found)
        })
    }
}

/// Quiz and page blocks in document order. Matches without a UUID are skipped.
pub fn blocks_in_order(body: Option<&str>) -> Vec<OrderedBlockReference> {
    let Some(body) = body else {
        return Vec::new();
    };

    BlockScanner::new()
        .matches(body)
        .filter_map(|m| match m.id {
            Some(id) => Some(OrderedBlockReference { id, kind: m.kind }),
            None => {
                log::trace!("skipping {:?} at {:?} without an id", m.kind, m.span);
                None
            }
        })
        .collect()
}

/// 1-based sequence number of each reference among blocks of the same kind.
///
/// `[Quiz, Page, Quiz]` numbers as `[1, 1, 2]`: "Question 1", "Page 1", "Question 2".
pub fn sequence_numbers(refs: &[OrderedBlockReference]) -> Vec<usize> {
    let mut quizzes = 0;
    let mut pages = 0;
    let mut others = 0;
    refs.iter()
        .map(|r| {
            let counter = match r.kind {
                BlockKind::Quiz => &mut quizzes,
                BlockKind::PageBlock => &mut pages,
                _ => &mut others,
            };
            *counter += 1;
            *counter
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const Q1: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";
    const P1: &str = "b7e6d5c4-b3a2-4f1e-9d8c-7b6a5f4e3d2c";
    const P2: &str = "c0ffee00-1234-4abc-9def-0123456789ab";

    fn reference(id: &str, kind: BlockKind) -> OrderedBlockReference {
        OrderedBlockReference {
            id: id.to_string(),
            kind,
        }
    }

    fn mixed_body() -> String {
        format!(
            "Intro\n((({P1}\nFirst page\n(((\n\
             &&&{Q1}\nWhich one?\n&&&\n\
             ((({P2}\nSecond page\n(((\n"
        )
    }

    #[test]
    fn page_quiz_page_in_order() {
        assert_eq!(
            blocks_in_order(Some(&mixed_body())),
            vec![
                reference(P1, BlockKind::PageBlock),
                reference(Q1, BlockKind::Quiz),
                reference(P2, BlockKind::PageBlock),
            ]
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let body = mixed_body();
        let first = blocks_in_order(Some(&body));
        let second = blocks_in_order(Some(&body));
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn fill_in_blank_counts_as_quiz() {
        let body = format!("Answer {{bl%{Q1}%lb}} here");
        assert_eq!(
            blocks_in_order(Some(&body)),
            vec![reference(Q1, BlockKind::Quiz)]
        );
    }

    #[test]
    fn block_without_id_is_skipped() {
        let body = format!("&&&broken\nQ\n&&&\n((({P1}\nPage\n(((");
        assert_eq!(
            blocks_in_order(Some(&body)),
            vec![reference(P1, BlockKind::PageBlock)]
        );
    }

    #[test]
    fn scan_from_returns_next_offset() {
        let body = mixed_body();
        let scanner = BlockScanner::new();
        let (first, next) = scanner.scan_from(&body, 0).unwrap();
        assert_eq!(first.kind, BlockKind::PageBlock);
        assert_eq!(next, first.span.end);
        assert_eq!(first.span.slice(&body), format!("((({P1}\nFirst page\n((("));

        let (second, _) = scanner.scan_from(&body, next).unwrap();
        assert_eq!(second.kind, BlockKind::Quiz);
        assert_eq!(second.id.as_deref(), Some(Q1));
    }

    #[test]
    fn scan_past_end_is_none() {
        let scanner = BlockScanner::new();
        assert!(scanner.scan_from("abc", 3).is_none());
        assert!(scanner.scan_from("abc", 10).is_none());
    }

    #[test]
    fn missing_body_is_empty() {
        assert!(blocks_in_order(None).is_empty());
    }

    #[test]
    fn sequence_numbers_count_per_kind() {
        let refs = blocks_in_order(Some(&mixed_body()));
        assert_eq!(sequence_numbers(&refs), vec![1, 1, 2]);
    }
}
