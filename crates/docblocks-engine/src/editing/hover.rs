//! # Hover Decorations
//!
//! Keeps `hovering`/`counter` node decorations over the node of a configured
//! type under the pointer. The set only changes inside [`HoverPlugin::apply`],
//! which [`EditorState::dispatch`](super::EditorState::dispatch) calls once
//! per transaction.

use std::mem;

use super::decorations::{Decoration, DecorationSet, DecorationTag};
use super::document::Document;
use super::mapping::Mapping;
use super::transaction::{HoverAction, HoverEvent, Transaction};

/// The slice of a rendered view the plugin needs to turn a DOM event into a
/// document position.
pub trait ViewDom {
    type Node;

    /// The node itself or its nearest ancestor with tag `tag_name`.
    fn closest(&self, target: &Self::Node, tag_name: &str) -> Option<Self::Node>;

    /// Whether `node` belongs to this editor's DOM subtree.
    fn contains(&self, node: &Self::Node) -> bool;

    /// Document position of `offset` inside `node`, if it maps to one.
    fn pos_at_dom(&self, node: &Self::Node, offset: usize) -> Option<usize>;
}

#[derive(Debug, Clone)]
pub struct HoverPlugin {
    tag_name: String,
    node_type: String,
    decorations: DecorationSet,
    clear_counter_on_mouseout: bool,
}

impl HoverPlugin {
    /// `tag_name` is both the DOM tag events are matched against and the
    /// transaction meta key; `node_type` is the tree node kind decorated.
    pub fn new(tag_name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            node_type: node_type.into(),
            decorations: DecorationSet::empty(),
            clear_counter_on_mouseout: false,
        }
    }

    /// Also remove the counter badge on mouseout. Off by default, which
    /// leaves counters behind after the hover border is gone.
    pub fn clear_counter_on_mouseout(mut self, enabled: bool) -> Self {
        self.clear_counter_on_mouseout = enabled;
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    /// Updates the decoration set for a transaction that has just been applied
    /// to `doc`.
    pub fn apply(&mut self, tr: &Transaction, mapping: &Mapping, doc: &Document) {
        let action = tr.meta(&self.tag_name);
        if action.is_none() && !tr.doc_changed() {
            return;
        }

        let set = mem::take(&mut self.decorations).map(mapping);
        self.decorations = match action {
            Some(action) => self.on_action(set, action, doc),
            None => set,
        };
    }

    fn on_action(&self, set: DecorationSet, action: HoverAction, doc: &Document) -> DecorationSet {
        let Some(node) = doc.find_parent_node_closest_to_pos(action.pos, &self.node_type) else {
            return set;
        };
        let range = node.range;

        match action.event {
            HoverEvent::Mouseover => {
                log::debug!("{}: hover {} at {range:?}", self.tag_name, node.kind);
                set.add([
                    Decoration::node(range.clone(), DecorationTag::Hover),
                    Decoration::node(range, DecorationTag::Counter),
                ])
            }
            HoverEvent::Mouseout => {
                let clear_counter = self.clear_counter_on_mouseout;
                let found = set.find(range.start, range.end, |d| {
                    d.tag.is_hover() || clear_counter
                });
                let set = set.remove(&found);

                let lingering = set.find(range.start, range.end, |d| {
                    d.tag == DecorationTag::Counter
                });
                if !lingering.is_empty() {
                    log::debug!(
                        "{}: {} counter decoration(s) kept after mouseout at {range:?}",
                        self.tag_name,
                        lingering.len()
                    );
                }
                set
            }
        }
    }

    /// Turns a pointer event on `target` into a hover transaction.
    ///
    /// Returns `None` when no element with this plugin's tag encloses the
    /// target, when that element is outside the editor, or when it has no
    /// document position.
    pub fn handle_dom_event<V: ViewDom>(
        &self,
        view: &V,
        event: HoverEvent,
        target: &V::Node,
    ) -> Option<Transaction> {
        let closest = view.closest(target, &self.tag_name)?;
        if !view.contains(&closest) {
            return None;
        }
        let pos = view.pos_at_dom(&closest, 0)?;
        Some(Transaction::new().set_meta(&self.tag_name, HoverAction { event, pos }))
    }
}
