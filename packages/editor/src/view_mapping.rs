//! Association between node-tree entries and rendered view elements
//!
//! Valid for one render generation only. [`ViewMapping::rebuild`] replaces
//! every entry; nothing is merged across renders.

use crate::node_tree::{NodeId, NodeTree};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Identity of a rendered view element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Half-open on the right and bottom edges
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// A rendered element with geometry and, when it came from a node, that
/// node's key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewElement {
    pub id: ViewId,
    pub tag: String,
    pub rect: Rect,
    pub node_key: Option<String>,
    pub children: Vec<ViewElement>,
}

impl ViewElement {
    /// Depth-first search by id
    pub fn find(&self, id: ViewId) -> Option<&ViewElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewEntry {
    pub view: ViewId,
    pub rect: Rect,
}

#[derive(Debug, Default)]
pub struct ViewMapping {
    generation: u64,
    node_to_view: HashMap<NodeId, ViewEntry>,
    view_to_node: HashMap<ViewId, NodeId>,
    /// Tagged views in paint order (parents before children)
    paint_order: Vec<(ViewId, Rect)>,
}

impl ViewMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries with those of a fresh render. Returns the number
    /// of mapped nodes.
    pub fn rebuild(&mut self, root: &ViewElement, tree: &NodeTree) -> usize {
        self.generation += 1;
        self.node_to_view.clear();
        self.view_to_node.clear();
        self.paint_order.clear();

        let mut stack = vec![root];
        while let Some(view) = stack.pop() {
            if let Some(key) = &view.node_key {
                match tree.find_by_key(key) {
                    Some(node) => {
                        self.node_to_view.entry(node).or_insert(ViewEntry {
                            view: view.id,
                            rect: view.rect,
                        });
                        self.view_to_node.insert(view.id, node);
                        self.paint_order.push((view.id, view.rect));
                    }
                    None => warn!(key = %key, view = view.id.0, "View marker names no node"),
                }
            }
            stack.extend(view.children.iter().rev());
        }

        debug!(generation = self.generation, nodes = self.node_to_view.len(), "Rebuilt view mapping");
        self.node_to_view.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dom_for_node(&self, node: NodeId) -> Option<ViewEntry> {
        self.node_to_view.get(&node).copied()
    }

    pub fn node_for_dom(&self, view: ViewId) -> Option<NodeId> {
        self.view_to_node.get(&view).copied()
    }

    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.dom_for_node(node).map(|entry| entry.rect)
    }

    /// Topmost mapped view under the point
    pub fn hit_test(&self, x: f64, y: f64) -> Option<(ViewId, NodeId)> {
        self.paint_order
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .and_then(|(view, _)| self.node_for_dom(*view).map(|node| (*view, node)))
    }

    pub fn len(&self) -> usize {
        self.view_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_node.is_empty()
    }
}
