//! # Pattern Library
//!
//! The lexical shape of each embedded block convention, compiled once per
//! process. `regex` iterators carry no state between calls, so every scan
//! starts from a clean cursor.

use std::sync::OnceLock;

use regex::Regex;

use super::kinds::{FeedbackText, FillInBlank, PageBlock, QuizBlock};

/// Canonical 8-4-4-4-12 hex-grouped identifier, unanchored.
pub const UUID: &str =
    r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// A find pattern plus the sentinels stripped from each match's text.
#[derive(Debug, Clone, Copy)]
pub struct BlockPattern {
    pub find: &'static Regex,
    pub strip: &'static Regex,
}

fn compile(cell: &'static OnceLock<Regex>, src: impl FnOnce() -> String) -> &'static Regex {
    cell.get_or_init(|| Regex::new(&src()).expect("built-in block pattern must compile"))
}

fn quiz_source() -> String {
    let fence = regex::escape(QuizBlock::FENCE);
    format!(
        r"{fence}[^\n]*\n.*?{fence}|{open}[^%]*{close}",
        open = regex::escape(FillInBlank::OPEN),
        close = regex::escape(FillInBlank::CLOSE),
    )
}

fn page_source() -> String {
    let fence = regex::escape(PageBlock::FENCE);
    format!(r"{fence}[^\n]*\n.*?{fence}")
}

/// Generic UUID, used to pull the id out of a located span.
pub fn uuid() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, || UUID.to_string())
}

/// Strict block id as the editor writes it: version nibble 0-5, RFC variant.
pub fn strict_block_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, || {
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-5][0-9a-f]{3}-[089ab][0-9a-f]{3}-[0-9a-f]{12}$"
            .to_string()
    })
}

/// Loose URL shape accepted as the info string of URL fences.
pub fn url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, || {
        r"https?://(?:www\.)?[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9]\.[^\s]{2,}|www\.[a-zA-Z0-9][a-zA-Z0-9-]+[a-zA-Z0-9]\.[^\s]{2,}"
            .to_string()
    })
}

/// Quiz blocks: fenced `&&&` form or self-closing `{bl%…%lb}` form.
pub fn quiz_block() -> BlockPattern {
    static FIND: OnceLock<Regex> = OnceLock::new();
    static STRIP: OnceLock<Regex> = OnceLock::new();
    BlockPattern {
        find: compile(&FIND, || format!("(?s){}", quiz_source())),
        strip: compile(&STRIP, || {
            format!(
                "{}|{}|{}",
                regex::escape(QuizBlock::FENCE),
                regex::escape(FillInBlank::OPEN),
                regex::escape(FillInBlank::CLOSE)
            )
        }),
    }
}

/// Page blocks: `(((<id>` header spanning to the next `(((`.
pub fn page_block() -> BlockPattern {
    static FIND: OnceLock<Regex> = OnceLock::new();
    static STRIP: OnceLock<Regex> = OnceLock::new();
    BlockPattern {
        find: compile(&FIND, || format!("(?s){}", page_source())),
        strip: compile(&STRIP, || regex::escape(PageBlock::FENCE)),
    }
}

/// Feedback annotations wrapped in `{rr%…%rr}`.
pub fn feedback() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, || {
        format!(
            "(?s){}.*?{}",
            regex::escape(FeedbackText::OPEN),
            regex::escape(FeedbackText::CLOSE)
        )
    })
}

/// Quiz-or-page alternation for the ordering scan. Feedback is excluded.
///
/// The `quiz` and `page` capture groups tell which form matched.
pub fn quiz_or_page_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, || {
        format!(
            "(?s)(?P<quiz>{})|(?P<page>{})",
            quiz_source(),
            page_source()
        )
    })
}
