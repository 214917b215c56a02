//! # Embed Recognition
//!
//! A top-level paragraph whose first link is a "simple" link (its text is
//! exactly its destination) and whose destination one of the registered
//! descriptors accepts is rendered as an embed instead of a paragraph.

use std::fmt;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::{extract::BlockRecord, kinds::BlockKind, rope::Span};

/// Returns the match array for a URL the embed accepts, `None` otherwise.
pub type Matcher = Box<dyn Fn(&str) -> Option<Vec<String>> + Send + Sync>;

/// An embeddable content type supplied by the host application.
pub struct EmbedDescriptor {
    pub title: String,
    pub component: String,
    pub keywords: Vec<String>,
    pub matcher: Matcher,
}

impl EmbedDescriptor {
    pub fn new(
        title: impl Into<String>,
        component: impl Into<String>,
        keywords: Vec<String>,
        matcher: impl Fn(&str) -> Option<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            component: component.into(),
            keywords,
            matcher: Box::new(matcher),
        }
    }

    /// Matches with `regex`; the match array is every capture group, group 0
    /// first, unmatched groups as empty strings.
    pub fn from_regex(
        title: impl Into<String>,
        component: impl Into<String>,
        keywords: Vec<String>,
        regex: Regex,
    ) -> Self {
        Self::new(title, component, keywords, move |href| {
            regex.captures(href).map(|caps| {
                caps.iter()
                    .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect()
            })
        })
    }

    pub fn matches(&self, href: &str) -> Option<Vec<String>> {
        (self.matcher)(href)
    }
}

impl fmt::Debug for EmbedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedDescriptor")
            .field("title", &self.title)
            .field("component", &self.component)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// A paragraph recognised as an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedBlock {
    pub href: String,
    pub title: String,
    pub component: String,
    pub matches: Vec<String>,
    /// The paragraph the embed replaces.
    pub span: Span,
}

/// Stable id for an embed: UUIDv5 of its URL in the URL namespace.
pub fn embed_id(href: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, href.as_bytes()).to_string()
}

/// Finds embeds in top-level paragraphs, at most one per paragraph.
pub fn recognize_embeds(body: &str, embeds: &[EmbedDescriptor]) -> Vec<EmbedBlock> {
    if embeds.is_empty() {
        return Vec::new();
    }

    let mut out = vec![];
    let mut depth = 0usize;
    let mut paragraph: Option<Span> = None;
    let mut done = false;
    let mut link: Option<(String, String)> = None;

    for (event, range) in Parser::new(body).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                match &tag {
                    Tag::Paragraph if depth == 0 => {
                        paragraph = Some(range.into());
                        done = false;
                    }
                    Tag::Link { dest_url, .. } if paragraph.is_some() && !done => {
                        link = Some((dest_url.to_string(), String::new()));
                    }
                    _ => {}
                }
                depth += 1;
            }
            Event::End(end) => {
                depth = depth.saturating_sub(1);
                match end {
                    TagEnd::Paragraph if depth == 0 => paragraph = None,
                    TagEnd::Link => {
                        let (Some((href, text)), Some(span)) = (link.take(), paragraph) else {
                            continue;
                        };
                        if text != href {
                            continue;
                        }
                        if let Some(embed) = match_embed(&href, span, embeds) {
                            log::debug!("paragraph at {span:?} is a {} embed", embed.title);
                            out.push(embed);
                            done = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, link_text)) = &mut link {
                    link_text.push_str(&text);
                }
            }
            _ => {}
        }
    }

    out
}

fn match_embed(href: &str, span: Span, embeds: &[EmbedDescriptor]) -> Option<EmbedBlock> {
    embeds.iter().find_map(|embed| {
        embed.matches(href).map(|matches| EmbedBlock {
            href: href.to_string(),
            title: embed.title.clone(),
            component: embed.component.clone(),
            matches,
            span,
        })
    })
}

/// Embeds as block records, keyed by [`embed_id`].
pub fn extract_embed_blocks(body: &str, embeds: &[EmbedDescriptor]) -> Vec<BlockRecord> {
    recognize_embeds(body, embeds)
        .into_iter()
        .map(|embed| BlockRecord {
            id: embed_id(&embed.href),
            kind: BlockKind::Embed,
            content: embed.href,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn youtube() -> EmbedDescriptor {
        EmbedDescriptor::from_regex(
            "YouTube",
            "YoutubeEmbed",
            vec!["video".to_string()],
            Regex::new(r"^https://(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]+)$").unwrap(),
        )
    }

    #[test]
    fn autolink_paragraph_becomes_embed() {
        let body = "Intro\n\n<https://www.youtube.com/watch?v=abc123>\n\nOutro\n";
        let embeds = recognize_embeds(body, &[youtube()]);
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].href, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(embeds[0].component, "YoutubeEmbed");
        assert_eq!(
            embeds[0].matches,
            vec![
                "https://www.youtube.com/watch?v=abc123".to_string(),
                "abc123".to_string()
            ]
        );
        assert!(embeds[0].span.slice(body).starts_with("<https://"));
    }

    #[test]
    fn link_with_different_text_is_not_embed() {
        let body = "[watch this](https://www.youtube.com/watch?v=abc123)\n";
        assert!(recognize_embeds(body, &[youtube()]).is_empty());
    }

    #[test]
    fn unmatched_url_is_not_embed() {
        let body = "<https://example.com/page>\n";
        assert!(recognize_embeds(body, &[youtube()]).is_empty());
    }

    #[test]
    fn closure_matcher() {
        let any_pdf = EmbedDescriptor::new("PDF", "PdfViewer", vec![], |href: &str| {
            href.ends_with(".pdf").then(|| vec![href.to_string()])
        });
        let body = "<https://example.com/notes.pdf>\n";
        let records = extract_embed_blocks(body, &[any_pdf]);
        assert_eq!(
            records,
            vec![BlockRecord {
                id: embed_id("https://example.com/notes.pdf"),
                kind: BlockKind::Embed,
                content: "https://example.com/notes.pdf".to_string(),
            }]
        );
    }

    #[test]
    fn embed_id_is_stable() {
        let a = embed_id("https://example.com");
        assert_eq!(a, embed_id("https://example.com"));
        assert_ne!(a, embed_id("https://example.org"));
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn no_descriptors_no_embeds() {
        assert!(recognize_embeds("<https://example.com>", &[]).is_empty());
    }
}
