use super::commands::EditError;
use super::decorations::Decoration;
use super::document::Document;
use super::hover::{HoverPlugin, ViewDom};
use super::mapping::Mapping;
use super::patch::Patch;
use super::transaction::{HoverEvent, Transaction};

/// The document plus the plugins observing it. All decoration changes go
/// through [`EditorState::dispatch`], one transaction at a time.
#[derive(Debug)]
pub struct EditorState {
    doc: Document,
    plugins: Vec<HoverPlugin>,
}

impl EditorState {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            plugins: Vec::new(),
        }
    }

    pub fn with_plugin(mut self, plugin: HoverPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn plugins(&self) -> &[HoverPlugin] {
        &self.plugins
    }

    pub fn plugin(&self, tag_name: &str) -> Option<&HoverPlugin> {
        self.plugins.iter().find(|p| p.tag_name() == tag_name)
    }

    /// Applies every step of `tr`, then lets each plugin update its state.
    ///
    /// Steps are compiled against a scratch copy of the buffer first: if any
    /// step is invalid nothing is applied and no plugin runs.
    pub fn dispatch(&mut self, tr: Transaction) -> Result<Patch, EditError> {
        let mut scratch = self.doc.buffer().clone();
        let mut deltas = Vec::with_capacity(tr.steps().len());
        for cmd in tr.steps() {
            let delta = cmd.compile(&scratch)?;
            scratch = delta.apply(&scratch);
            deltas.push(delta);
        }

        let mut patch = Patch {
            changed: Vec::new(),
            version: self.doc.version(),
        };
        let mut mapping = Mapping::new();
        for delta in deltas {
            // earlier inserted ranges move with later steps
            let step = self.doc.apply_delta(&delta);
            let mut moved = Mapping::new();
            moved.push(delta.clone());
            patch.changed = patch
                .changed
                .iter()
                .filter_map(|r| moved.map_range(r))
                .chain(step.changed)
                .collect();
            patch.version = step.version;
            mapping.push(delta);
        }

        for plugin in &mut self.plugins {
            plugin.apply(&tr, &mapping, &self.doc);
        }
        Ok(patch)
    }

    /// Routes a pointer event through every plugin and dispatches the
    /// resulting transactions. Returns how many were dispatched.
    pub fn handle_dom_event<V: ViewDom>(
        &mut self,
        view: &V,
        event: HoverEvent,
        target: &V::Node,
    ) -> Result<usize, EditError> {
        let transactions: Vec<_> = self
            .plugins
            .iter()
            .filter_map(|p| p.handle_dom_event(view, event, target))
            .collect();
        let count = transactions.len();
        for tr in transactions {
            self.dispatch(tr)?;
        }
        Ok(count)
    }

    /// Decorations of every plugin, for the renderer.
    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> {
        self.plugins.iter().flat_map(|p| p.decorations().iter())
    }
}
