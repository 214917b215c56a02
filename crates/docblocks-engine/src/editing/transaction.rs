use std::collections::BTreeMap;

use super::commands::Cmd;

/// Pointer event forwarded from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Mouseover,
    Mouseout,
}

/// Metadata a hover plugin reads from a transaction addressed to its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverAction {
    pub event: HoverEvent,
    pub pos: usize,
}

/// An ordered list of edit steps plus per-plugin metadata, applied as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    steps: Vec<Cmd>,
    meta: BTreeMap<String, HoverAction>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, cmd: Cmd) -> Self {
        self.steps.push(cmd);
        self
    }

    pub fn set_meta(mut self, tag_name: impl Into<String>, action: HoverAction) -> Self {
        self.meta.insert(tag_name.into(), action);
        self
    }

    pub fn meta(&self, tag_name: &str) -> Option<HoverAction> {
        self.meta.get(tag_name).copied()
    }

    pub fn steps(&self) -> &[Cmd] {
        &self.steps
    }

    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_only_transaction_does_not_change_doc() {
        let action = HoverAction {
            event: HoverEvent::Mouseover,
            pos: 4,
        };
        let tr = Transaction::new().set_meta("li", action);
        assert!(!tr.doc_changed());
        assert_eq!(tr.meta("li"), Some(action));
        assert_eq!(tr.meta("p"), None);
    }

    #[test]
    fn steps_keep_order() {
        let tr = Transaction::new()
            .step(Cmd::DeleteRange { range: 0..1 })
            .step(Cmd::InsertText {
                at: 0,
                text: "x".into(),
            });
        assert!(tr.doc_changed());
        assert_eq!(tr.steps().len(), 2);
        assert!(matches!(tr.steps()[0], Cmd::DeleteRange { .. }));
    }
}
