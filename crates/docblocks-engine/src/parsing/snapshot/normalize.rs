use serde::Serialize;

use crate::parsing::{
    ParsedDoc, inline::InlineNode, kinds::BlockKind, rope::preview, sequence_numbers,
};

#[derive(Serialize)]
pub struct Snap {
    pub ordered: Vec<OrderedSnap>,
    pub records: Vec<RecordSnap>,
    pub fences: Vec<FenceSnap>,
    pub inline: Vec<InlineSnap>,
    pub embeds: Vec<EmbedSnap>,
}

#[derive(Serialize)]
pub struct OrderedSnap {
    pub label: String,
    pub id: String,
}

#[derive(Serialize)]
pub struct RecordSnap {
    pub kind: BlockKind,
    pub id: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct FenceSnap {
    pub kind: BlockKind,
    pub info: String,
    pub span: (usize, usize),
    pub closed: bool,
    pub text: String,
}

#[derive(Serialize)]
pub struct InlineSnap {
    pub kind: BlockKind,
    pub span: (usize, usize),
    pub info: String,
}

#[derive(Serialize)]
pub struct EmbedSnap {
    pub component: String,
    pub href: String,
    pub span: (usize, usize),
}

/// Inline text nodes are left out; only the blocks between them are kept.
pub fn normalize(body: &str, doc: &ParsedDoc) -> Snap {
    let numbers = sequence_numbers(&doc.ordered);
    let ordered = doc
        .ordered
        .iter()
        .zip(numbers)
        .map(|(r, n)| OrderedSnap {
            label: format!("{} {n}", r.kind.label()),
            id: r.id.clone(),
        })
        .collect();

    let records = doc
        .quizzes
        .iter()
        .chain(&doc.pages)
        .chain(&doc.feedback)
        .map(|r| RecordSnap {
            kind: r.kind,
            id: r.id.clone(),
            content: preview(&r.content, 60),
        })
        .collect();

    let fences = doc
        .fences
        .iter()
        .map(|f| FenceSnap {
            kind: f.kind,
            info: f.info.clone(),
            span: (f.span.start, f.span.end),
            closed: f.closed,
            text: preview(f.content.trim(), 60),
        })
        .collect();

    let inline = doc
        .inline
        .iter()
        .filter_map(|n| match n {
            InlineNode::Text(_) => None,
            InlineNode::Block { kind, full, info } => Some(InlineSnap {
                kind: *kind,
                span: (full.start, full.end),
                info: info.slice(body).to_string(),
            }),
        })
        .collect();

    let embeds = doc
        .embeds
        .iter()
        .map(|e| EmbedSnap {
            component: e.component.clone(),
            href: e.href.clone(),
            span: (e.span.start, e.span.end),
        })
        .collect();

    Snap {
        ordered,
        records,
        fences,
        inline,
        embeds,
    }
}
