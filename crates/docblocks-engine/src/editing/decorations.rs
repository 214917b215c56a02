use std::ops::Range;

use super::mapping::Mapping;

/// What a decoration draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationTag {
    /// Border/background of the hovered node. Carries the hover marker.
    Hover,
    /// Overlay counter badge.
    Counter,
}

impl DecorationTag {
    /// CSS class the renderer puts on the decorated node.
    pub fn class(self) -> &'static str {
        match self {
            DecorationTag::Hover => "hovering",
            DecorationTag::Counter => "counter",
        }
    }

    pub fn is_hover(self) -> bool {
        self == DecorationTag::Hover
    }
}

/// A node decoration over a byte range of the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub range: Range<usize>,
    pub tag: DecorationTag,
}

impl Decoration {
    pub fn node(range: Range<usize>, tag: DecorationTag) -> Self {
        Self { range, tag }
    }

    pub fn class(&self) -> &'static str {
        self.tag.class()
    }
}

/// Persistent-style set of decorations: every operation consumes the set
/// and returns the updated one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    items: Vec<Decoration>,
}

impl DecorationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }

    /// Adds decorations, keeping the set ordered by start position.
    /// Duplicates are kept.
    pub fn add(mut self, decorations: impl IntoIterator<Item = Decoration>) -> Self {
        self.items.extend(decorations);
        self.items.sort_by_key(|d| d.range.start);
        self
    }

    /// Removes every decoration equal to one of `decorations`.
    pub fn remove(mut self, decorations: &[Decoration]) -> Self {
        self.items.retain(|d| !decorations.contains(d));
        self
    }

    /// Decorations touching `from..=to` (boundaries included) that satisfy `pred`.
    pub fn find(
        &self,
        from: usize,
        to: usize,
        pred: impl Fn(&Decoration) -> bool,
    ) -> Vec<Decoration> {
        self.items
            .iter()
            .filter(|d| d.range.start <= to && d.range.end >= from && pred(d))
            .cloned()
            .collect()
    }

    /// Repositions every decoration through `mapping`, dropping the ones
    /// whose node was deleted.
    pub fn map(self, mapping: &Mapping) -> Self {
        if mapping.is_empty() {
            return self;
        }
        let items = self
            .items
            .into_iter()
            .filter_map(|d| {
                let range = mapping.map_range(&d.range)?;
                Some(Decoration { range, tag: d.tag })
            })
            .collect();
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(range: Range<usize>) -> [Decoration; 2] {
        [
            Decoration::node(range.clone(), DecorationTag::Hover),
            Decoration::node(range, DecorationTag::Counter),
        ]
    }

    #[test]
    fn classes() {
        assert_eq!(DecorationTag::Hover.class(), "hovering");
        assert_eq!(DecorationTag::Counter.class(), "counter");
        assert!(DecorationTag::Hover.is_hover());
        assert!(!DecorationTag::Counter.is_hover());
    }

    #[test]
    fn add_keeps_start_order() {
        let set = DecorationSet::empty().add(pair(10..20)).add(pair(0..5));
        let starts: Vec<_> = set.iter().map(|d| d.range.start).collect();
        assert_eq!(starts, vec![0, 0, 10, 10]);
    }

    #[test]
    fn find_includes_touching_boundaries() {
        let set = DecorationSet::empty().add(pair(10..20));
        assert_eq!(set.find(20, 25, |_| true).len(), 2);
        assert_eq!(set.find(0, 10, |_| true).len(), 2);
        assert!(set.find(21, 30, |_| true).is_empty());
    }

    #[test]
    fn remove_hover_only() {
        let set = DecorationSet::empty().add(pair(10..20));
        let hovers = set.find(10, 20, |d| d.tag.is_hover());
        let set = set.remove(&hovers);
        assert_eq!(
            set.iter().cloned().collect::<Vec<_>>(),
            vec![Decoration::node(10..20, DecorationTag::Counter)]
        );
    }
}
