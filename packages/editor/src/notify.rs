//! Change notification for editor state

use crate::node_tree::NodeId;
use std::fmt;
use twinspect_style::StyleKey;

/// A published state change. Only real value changes are published.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Selection { node: NodeId, selected: bool },
    Hover { node: Option<NodeId> },
    Collapse { node: NodeId, collapsed: bool },
    /// `node` now sits under `parent`
    Structure { node: NodeId, parent: NodeId },
    Attribute { node: NodeId, name: String },
    Style { node: NodeId, key: StyleKey },
    /// Source text was regenerated
    Code { version: u64 },
    /// Everything was rebuilt from source text
    Reloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Change)>;

#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn publish(&mut self, change: &Change) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
