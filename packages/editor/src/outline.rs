//! Read model and actions for a hierarchical list of the node tree

use crate::errors::{EditorError, InvalidOperation};
use crate::node_tree::{NodeId, NodeKind, NodePayload};
use crate::source_file::SourceFile;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineItem {
    pub key: String,
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub label: String,
    pub depth: usize,
    pub selected: bool,
    pub hovered: bool,
    pub collapsed: bool,
    pub shows_collapse_button: bool,
    pub children: Vec<OutlineItem>,
}

/// Build the outline of the whole file
pub fn outline(file: &SourceFile) -> Result<OutlineItem, InvalidOperation> {
    item(file, file.tree().root(), 0)
}

fn item(file: &SourceFile, id: NodeId, depth: usize) -> Result<OutlineItem, InvalidOperation> {
    let tree = file.tree();
    let node = tree.node(id);

    let children = tree
        .children(id)
        .iter()
        .filter(|child| is_listed(file, **child))
        .map(|child| item(file, *child, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OutlineItem {
        key: node.key().to_string(),
        node: id,
        parent: node.parent(),
        kind: node.kind(),
        label: file.label(id)?,
        depth,
        selected: node.is_selected(),
        hovered: file.hovered() == Some(id),
        collapsed: node.is_collapsed(),
        shows_collapse_button: node.kind().is_container() && !children.is_empty(),
        children,
    })
}

/// Formatting whitespace between tags is not listed
fn is_listed(file: &SourceFile, id: NodeId) -> bool {
    match file.tree().node(id).payload() {
        NodePayload::Text { value } if file.options().hide_whitespace_text => {
            !(value.trim().is_empty() && value.contains('\n'))
        }
        _ => true,
    }
}

/// Rows a list widget shows: pre-order, skipping children of collapsed items
pub fn visible_rows(root: &OutlineItem) -> Vec<&OutlineItem> {
    let mut rows = Vec::new();
    let mut stack = vec![root];
    while let Some(item) = stack.pop() {
        rows.push(item);
        if !item.collapsed {
            stack.extend(item.children.iter().rev());
        }
    }
    rows
}

pub fn select(file: &mut SourceFile, node: NodeId) -> Result<(), InvalidOperation> {
    file.select(node)
}

pub fn deselect(file: &mut SourceFile, node: NodeId) -> Result<(), InvalidOperation> {
    file.deselect(node)
}

pub fn toggle_collapsed(file: &mut SourceFile, node: NodeId) -> Result<(), InvalidOperation> {
    file.toggle_collapsed(node)
}

/// Dragging an unselected node makes it the selection
pub fn drag_start(file: &mut SourceFile, node: NodeId) -> Result<(), InvalidOperation> {
    if !file.tree().lookup(node)?.is_selected() {
        file.clear_selection();
        file.select(node)?;
    }
    Ok(())
}

/// Selected nodes without a selected ancestor, in document order
fn dragged_nodes(file: &SourceFile) -> Vec<NodeId> {
    let tree = file.tree();
    let selected = tree.selected_nodes();
    selected
        .iter()
        .copied()
        .filter(|node| !selected.iter().any(|other| tree.is_ancestor(*other, *node)))
        .collect()
}

pub fn can_drop(file: &SourceFile, parent: NodeId, before: Option<NodeId>, copy: bool) -> bool {
    let nodes = dragged_nodes(file);
    !nodes.is_empty()
        && nodes.iter().all(|node| {
            if copy {
                file.tree().validate_copy(parent, *node, before).is_ok()
            } else {
                file.tree().validate_insert(parent, *node, before).is_ok()
            }
        })
}

/// Move (or copy) every dragged node under `parent` before `before`, then
/// regenerate once. Returns the nodes now at the drop position.
pub fn drop(
    file: &mut SourceFile,
    parent: NodeId,
    before: Option<NodeId>,
    copy: bool,
) -> Result<Vec<NodeId>, EditorError> {
    let nodes = dragged_nodes(file);
    for node in &nodes {
        if copy {
            file.tree().validate_copy(parent, *node, before)?;
        } else {
            file.tree().validate_insert(parent, *node, before)?;
        }
    }

    let mut placed = Vec::with_capacity(nodes.len());
    for node in nodes {
        if copy {
            placed.push(file.duplicate_before(parent, node, before)?);
        } else {
            file.insert_before(parent, node, before)?;
            placed.push(node);
        }
    }

    file.update_code()?;
    info!(count = placed.len(), copy, "Dropped nodes");
    Ok(placed)
}
