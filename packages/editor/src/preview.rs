//! Render execution boundary and a built-in block-layout preview

use crate::errors::EditorError;
use crate::node_tree::{NodeId, NodePayload, NodeTree};
use crate::source_file::SourceFile;
use crate::view_mapping::{Rect, ViewElement, ViewId};

/// Produces a view tree for the current state of a file. Every view that
/// comes from a node must carry that node's key.
pub trait Renderer {
    fn render(&mut self, file: &SourceFile) -> Result<ViewElement, EditorError>;
}

const LINE_HEIGHT: f64 = 20.0;
const INDENT: f64 = 16.0;
const PADDING: f64 = 4.0;

/// Lays nodes out as stacked blocks: each element gets a header line, its
/// children are indented below it. Whitespace-only text is not drawn.
#[derive(Debug)]
pub struct PreviewRenderer {
    viewport_width: f64,
    next_view: u64,
}

impl PreviewRenderer {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            next_view: 0,
        }
    }

    fn view_id(&mut self) -> ViewId {
        self.next_view += 1;
        ViewId(self.next_view)
    }

    fn layout(&mut self, tree: &NodeTree, id: NodeId, x: f64, y: f64) -> Option<ViewElement> {
        let node = tree.node(id);
        let width = (self.viewport_width - x).max(0.0);

        match node.payload() {
            NodePayload::Text { value } if value.trim().is_empty() => None,
            NodePayload::Text { .. } | NodePayload::Other { .. } => Some(ViewElement {
                id: self.view_id(),
                tag: "#text".to_string(),
                rect: Rect::new(x, y, width, LINE_HEIGHT),
                node_key: Some(node.key().to_string()),
                children: Vec::new(),
            }),
            NodePayload::Element { tag, .. } => {
                let view = self.view_id();
                let mut children = Vec::new();
                let mut cursor = y + LINE_HEIGHT;

                for child in tree.children(id) {
                    if let Some(child_view) = self.layout(tree, *child, x + INDENT, cursor) {
                        cursor = child_view.rect.bottom();
                        children.push(child_view);
                    }
                }

                Some(ViewElement {
                    id: view,
                    tag: tag.clone(),
                    rect: Rect::new(x, y, width, cursor - y + PADDING),
                    node_key: Some(node.key().to_string()),
                    children,
                })
            }
            NodePayload::Component { .. } | NodePayload::File { .. } => None,
        }
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl Renderer for PreviewRenderer {
    fn render(&mut self, file: &SourceFile) -> Result<ViewElement, EditorError> {
        let tree = file.tree();
        let body = self.view_id();
        let mut children = Vec::new();
        let mut cursor = 0.0;

        for component in tree.components() {
            for root in tree.children(*component) {
                if let Some(view) = self.layout(tree, *root, 0.0, cursor) {
                    cursor = view.rect.bottom() + PADDING;
                    children.push(view);
                }
            }
        }

        Ok(ViewElement {
            id: body,
            tag: "body".to_string(),
            rect: Rect::new(0.0, 0.0, self.viewport_width, cursor),
            node_key: None,
            children,
        })
    }
}
