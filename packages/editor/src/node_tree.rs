//! Identity-stable tree mirroring the JSX structure of one module
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. The tree is built
//! once per parse; moves re-link existing nodes so their ids and keys
//! survive, copies append new nodes. Mutation is crate-private and always
//! driven by [`SourceFile`](crate::SourceFile), which applies the same edit
//! to the syntax tree.

use crate::errors::{InvalidOperation, SyncError};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use twinspect_parser::{
    component_roots, AttributeValue, GenerateError, JsxAttribute, JsxChild, JsxElement, Module, Serializer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Component,
    Element,
    Text,
    Other,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Component => "component",
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Other => "other",
        }
    }

    /// Kinds that have children and a collapse flag
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::File | NodeKind::Component | NodeKind::Element)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    File { path: String },
    Component { name: Option<String> },
    Element { tag: String, attributes: Vec<JsxAttribute> },
    Text { value: String },
    /// Expression container or fragment, shown as its generated code
    Other { code: String },
}

#[derive(Debug, Clone)]
pub struct Node {
    key: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    selected: bool,
    collapsed: bool,
    payload: NodePayload,
}

impl Node {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> NodeKind {
        match self.payload {
            NodePayload::File { .. } => NodeKind::File,
            NodePayload::Component { .. } => NodeKind::Component,
            NodePayload::Element { .. } => NodeKind::Element,
            NodePayload::Text { .. } => NodeKind::Text,
            NodePayload::Other { .. } => NodeKind::Other,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.payload {
            NodePayload::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attributes(&self) -> &[JsxAttribute] {
        match &self.payload {
            NodePayload::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        self.attributes().iter().find_map(|attr| match attr {
            JsxAttribute::Named {
                name: attr_name,
                value: Some(AttributeValue::String { value, .. }),
                ..
            } if attr_name == name => Some(value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
    root: NodeId,
    by_key: HashMap<String, NodeId>,
}

impl NodeTree {
    /// Build the tree for every component root in the module
    pub fn build(module: &Module, path: &str) -> Result<Self, GenerateError> {
        let mut tree = NodeTree {
            nodes: Vec::new(),
            root: NodeId(0),
            by_key: HashMap::new(),
        };
        let serializer = Serializer::new();

        let root = tree.push(
            None,
            path.to_string(),
            NodePayload::File {
                path: path.to_string(),
            },
        );
        tree.root = root;

        for component in component_roots(module) {
            let id = tree.push(
                Some(root),
                component.return_id.to_string(),
                NodePayload::Component {
                    name: component.name.map(str::to_string),
                },
            );
            tree.add_element(id, component.element, &serializer)?;
        }

        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Node by id.
    ///
    /// Panics when `id` was issued by another tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.by_key.get(key).copied()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Current children, read from structural state
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Components under the file root, in source order
    pub fn components(&self) -> &[NodeId] {
        self.children(self.root)
    }

    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is the single root element of a component
    pub fn is_component_root(&self, id: NodeId) -> bool {
        self.parent(id)
            .map_or(false, |parent| self.node(parent).kind() == NodeKind::Component)
    }

    /// All attached nodes in pre-order
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|id| self.node(*id).selected)
            .collect()
    }

    pub fn selected_elements(&self) -> Vec<NodeId> {
        self.selected_nodes()
            .into_iter()
            .filter(|id| self.node(*id).kind() == NodeKind::Element)
            .collect()
    }

    pub(crate) fn lookup(&self, id: NodeId) -> Result<&Node, InvalidOperation> {
        self.get(id)
            .ok_or_else(|| InvalidOperation::NodeNotFound(id.to_string()))
    }

    pub(crate) fn set_selected(&mut self, id: NodeId, selected: bool) -> bool {
        let node = &mut self.nodes[id.0];
        let changed = node.selected != selected;
        node.selected = selected;
        changed
    }

    pub(crate) fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> Result<bool, InvalidOperation> {
        let node = self.lookup(id)?;
        if !node.kind().is_container() {
            return Err(InvalidOperation::NotCollapsible(node.key.clone()));
        }
        let node = &mut self.nodes[id.0];
        let changed = node.collapsed != collapsed;
        node.collapsed = collapsed;
        Ok(changed)
    }

    pub(crate) fn set_attributes(&mut self, id: NodeId, new_attributes: Vec<JsxAttribute>) {
        if let NodePayload::Element { attributes, .. } = &mut self.nodes[id.0].payload {
            *attributes = new_attributes;
        }
    }

    /// Check that `node` may be placed under `parent` before `reference`
    pub(crate) fn validate_insert(
        &self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), InvalidOperation> {
        let moved = self.lookup(node)?;
        if matches!(moved.kind(), NodeKind::File | NodeKind::Component) || self.is_component_root(node) {
            return Err(InvalidOperation::Immovable(moved.key.clone()));
        }

        self.validate_target(parent, reference)?;

        if node == parent || self.is_ancestor(node, parent) {
            return Err(InvalidOperation::CycleDetected {
                node: moved.key.clone(),
                parent: self.node(parent).key.clone(),
            });
        }
        Ok(())
    }

    /// Check that a copy of `node` may be placed under `parent`
    pub(crate) fn validate_copy(
        &self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), InvalidOperation> {
        let copied = self.lookup(node)?;
        if matches!(copied.kind(), NodeKind::File | NodeKind::Component) {
            return Err(InvalidOperation::Immovable(copied.key.clone()));
        }
        self.validate_target(parent, reference)
    }

    fn validate_target(&self, parent: NodeId, reference: Option<NodeId>) -> Result<(), InvalidOperation> {
        let target = self.lookup(parent)?;
        if target.kind() != NodeKind::Element {
            return Err(InvalidOperation::NotAContainer {
                key: target.key.clone(),
                kind: target.kind().to_string(),
            });
        }

        if let Some(reference) = reference {
            let sibling = self.lookup(reference)?;
            if sibling.parent != Some(parent) {
                return Err(InvalidOperation::ReferenceNotChild {
                    reference: sibling.key.clone(),
                    parent: target.key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Re-link `node` under `parent` before `reference` (validated by caller)
    pub(crate) fn move_node(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        if reference == Some(node) {
            return;
        }

        if let Some(old_parent) = self.nodes[node.0].parent {
            self.nodes[old_parent.0].children.retain(|child| *child != node);
        }
        self.attach(parent, node, reference);
    }

    /// Build nodes for a freshly keyed syntax subtree and attach them
    pub(crate) fn insert_subtree(
        &mut self,
        parent: NodeId,
        reference: Option<NodeId>,
        child: &JsxChild,
    ) -> Result<NodeId, GenerateError> {
        let id = self.add_child(parent, child, &Serializer::new())?;
        self.nodes[parent.0].children.retain(|existing| *existing != id);
        self.attach(parent, id, reference);
        Ok(id)
    }

    fn attach(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        let siblings = &mut self.nodes[parent.0].children;
        let index = reference
            .and_then(|reference| siblings.iter().position(|child| *child == reference))
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
    }

    fn push(&mut self, parent: Option<NodeId>, key: String, payload: NodePayload) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_key.insert(key.clone(), id);
        self.nodes.push(Node {
            key,
            parent,
            children: Vec::new(),
            selected: false,
            collapsed: false,
            payload,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn add_child(&mut self, parent: NodeId, child: &JsxChild, serializer: &Serializer) -> Result<NodeId, GenerateError> {
        match child {
            JsxChild::Element(element) => self.add_element(parent, element, serializer),
            JsxChild::Text { value, span } => Ok(self.push(
                Some(parent),
                span.id.clone(),
                NodePayload::Text { value: value.clone() },
            )),
            other => {
                let code = serializer.serialize_child(other)?;
                Ok(self.push(Some(parent), other.id().to_string(), NodePayload::Other { code }))
            }
        }
    }

    fn add_element(&mut self, parent: NodeId, element: &JsxElement, serializer: &Serializer) -> Result<NodeId, GenerateError> {
        let id = self.push(
            Some(parent),
            element.span.id.clone(),
            NodePayload::Element {
                tag: element.name.clone(),
                attributes: element.attributes.clone(),
            },
        );
        for child in &element.children {
            self.add_child(id, child, serializer)?;
        }
        Ok(id)
    }

    /// Check that the tree describes exactly the structure of `module`
    pub fn verify(&self, module: &Module) -> Result<(), SyncError> {
        let roots = component_roots(module);
        let components = self.components();

        if roots.len() != components.len() {
            return Err(self.diverged(
                self.root,
                format!("{} components in tree, {} in syntax", components.len(), roots.len()),
            ));
        }

        for (root, &component) in roots.iter().zip(components) {
            let node = self.node(component);
            if node.key != root.return_id {
                return Err(self.diverged(component, format!("component key differs from {}", root.return_id)));
            }
            match node.children.as_slice() {
                [element] => self.verify_element(*element, root.element)?,
                _ => return Err(self.diverged(component, "component must have exactly one root")),
            }
        }
        Ok(())
    }

    fn verify_element(&self, id: NodeId, element: &JsxElement) -> Result<(), SyncError> {
        let node = self.node(id);
        if node.key != element.span.id || node.tag() != Some(element.name.as_str()) {
            return Err(self.diverged(id, format!("expected <{}> {}", element.name, element.span.id)));
        }
        if node.attributes() != element.attributes.as_slice() {
            return Err(self.diverged(id, "attributes differ"));
        }
        if node.children.len() != element.children.len() {
            return Err(self.diverged(
                id,
                format!("{} children in tree, {} in syntax", node.children.len(), element.children.len()),
            ));
        }

        for (&child_id, child) in node.children.iter().zip(&element.children) {
            match child {
                JsxChild::Element(child_element) => self.verify_element(child_id, child_element)?,
                JsxChild::Text { value, span } => {
                    let child_node = self.node(child_id);
                    let same_text = matches!(&child_node.payload, NodePayload::Text { value: v } if v == value);
                    if child_node.key != span.id || !same_text {
                        return Err(self.diverged(child_id, format!("expected text {}", span.id)));
                    }
                }
                other => {
                    if self.node(child_id).key != other.id() {
                        return Err(self.diverged(child_id, format!("expected {}", other.id())));
                    }
                }
            }
        }
        Ok(())
    }

    fn diverged(&self, id: NodeId, message: impl Into<String>) -> SyncError {
        SyncError::Diverged {
            key: self.node(id).key.clone(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinspect_parser::parse;

    const SOURCE: &str = r#"export default function List() {
  return <ul><li>A</li><li>B</li><li>C</li></ul>;
}
"#;

    fn tree() -> (Module, NodeTree) {
        let module = parse(SOURCE).unwrap();
        let tree = NodeTree::build(&module, "/List.tsx").unwrap();
        (module, tree)
    }

    fn list_items(tree: &NodeTree) -> (NodeId, Vec<NodeId>) {
        let component = tree.components()[0];
        let ul = tree.children(component)[0];
        (ul, tree.children(ul).to_vec())
    }

    #[test]
    fn test_build_mirrors_jsx() {
        let (module, tree) = tree();
        let (ul, items) = list_items(&tree);

        assert_eq!(tree.node(ul).tag(), Some("ul"));
        assert_eq!(items.len(), 3);
        assert_eq!(tree.node(tree.children(items[0])[0]).kind(), NodeKind::Text);
        assert!(tree.verify(&module).is_ok());
    }

    #[test]
    fn test_move_before_sibling() {
        let (_, mut tree) = tree();
        let (ul, items) = list_items(&tree);
        let (a, b, c) = (items[0], items[1], items[2]);

        tree.validate_insert(ul, c, Some(b)).unwrap();
        tree.move_node(ul, c, Some(b));

        assert_eq!(tree.children(ul), &[a, c, b]);
        assert_eq!(tree.parent(c), Some(ul));
    }

    #[test]
    fn test_reference_must_be_child_of_parent() {
        let (_, tree) = tree();
        let (ul, items) = list_items(&tree);
        let text_of_a = tree.children(items[0])[0];

        assert!(matches!(
            tree.validate_insert(ul, items[2], Some(text_of_a)),
            Err(InvalidOperation::ReferenceNotChild { .. })
        ));
    }

    #[test]
    fn test_cycles_and_roots_are_rejected() {
        let (_, tree) = tree();
        let (ul, items) = list_items(&tree);

        assert!(matches!(
            tree.validate_insert(items[0], ul, None),
            Err(InvalidOperation::Immovable(_))
        ));
        assert!(matches!(
            tree.validate_insert(items[0], items[0], None),
            Err(InvalidOperation::CycleDetected { .. })
        ));
        let text = tree.children(items[0])[0];
        assert!(matches!(
            tree.validate_insert(text, items[1], None),
            Err(InvalidOperation::NotAContainer { .. })
        ));
    }

    #[test]
    fn test_selection_in_document_order() {
        let (_, mut tree) = tree();
        let (ul, items) = list_items(&tree);

        tree.set_selected(items[2], true);
        tree.set_selected(ul, true);
        tree.set_selected(tree.children(items[0])[0], true);

        assert_eq!(tree.selected_nodes()[0], ul);
        assert_eq!(tree.selected_nodes()[2], items[2]);
        assert_eq!(tree.selected_elements(), vec![ul, items[2]]);
    }

    #[test]
    fn test_verify_detects_divergence() {
        let (module, mut tree) = tree();
        let (ul, items) = list_items(&tree);
        tree.move_node(ul, items[2], Some(items[0]));

        assert!(matches!(tree.verify(&module), Err(SyncError::Diverged { .. })));
    }
}
