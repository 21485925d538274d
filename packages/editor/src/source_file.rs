//! # Source File
//!
//! One source file and all of its editing state.
//!
//! ```text
//! text → parse → Module ──build──→ NodeTree
//!                  │                  │
//!                  └──── edits ───────┘   (always applied to both)
//!                  │
//!          CodeGenerator → text → verify → last known-good source
//! ```
//!
//! Structural edits do not regenerate. Callers batch edits and call
//! [`SourceFile::update_code`] once.

use crate::errors::{EditorError, InvalidOperation, SyncError};
use crate::node_tree::{NodeId, NodeKind, NodePayload, NodeTree};
use crate::notify::{Change, Notifier, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use twinspect_parser::{is_printable_attribute_value, CodeGenerator, IDGenerator, JsxChild, Module, Parser, Serializer};
use twinspect_style::{decode, merge_class_names, Style, StyleKey};

/// Editing options shared by the CLI config and embedders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Attribute that carries utility classes
    pub class_attribute: String,
    /// Indent used by the bundled code generator
    pub indent: String,
    /// Hide whitespace-only text children that span lines in the outline
    pub hide_whitespace_text: bool,
    /// Width of the preview viewport in pixels
    pub viewport_width: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            class_attribute: "className".to_string(),
            indent: "  ".to_string(),
            hide_whitespace_text: true,
            viewport_width: 800.0,
        }
    }
}

pub struct SourceFile {
    path: PathBuf,
    module: Module,
    ids: IDGenerator,
    tree: NodeTree,
    code: String,
    last_good_source: String,
    hovered: Option<NodeId>,
    notifier: Notifier,
    generator: Box<dyn CodeGenerator>,
    options: EditorOptions,
    /// Bumped on each regeneration
    version: u64,
    /// Bumped on each structural or attribute edit and on reload
    revision: u64,
}

impl SourceFile {
    /// Parse `source`; a parse failure leaves nothing behind
    pub fn from_source(
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        options: EditorOptions,
    ) -> Result<Self, EditorError> {
        let path = path.into();
        let source = source.into();
        let (module, ids, tree) = load(&path, &source)?;

        info!(path = %path.display(), components = tree.components().len(), nodes = tree.len(), "Loaded source file");

        Ok(Self {
            generator: Box::new(Serializer::with_indent(&options.indent)),
            path,
            module,
            ids,
            tree,
            code: source.clone(),
            last_good_source: source,
            hovered: None,
            notifier: Notifier::new(),
            options,
            version: 0,
            revision: 0,
        })
    }

    /// Read and parse a file from disk
    pub fn open(path: impl AsRef<Path>, options: EditorOptions) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::from_source(path, source, options)
    }

    /// Swap in another code generator
    pub fn with_generator(mut self, generator: Box<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Write the current code back to `path`
    pub fn save(&self) -> Result<(), EditorError> {
        std::fs::write(&self.path, &self.code)?;
        info!(path = %self.path.display(), version = self.version, "Saved source file");
        Ok(())
    }

    /// Replace everything with a new parse of `source`. On a parse failure the
    /// current state is kept.
    pub fn reload(&mut self, source: impl Into<String>) -> Result<(), EditorError> {
        let source = source.into();
        let (module, ids, tree) = load(&self.path, &source)?;

        self.module = module;
        self.ids = ids;
        self.tree = tree;
        self.hovered = None;
        self.code = source.clone();
        self.last_good_source = source;
        self.revision += 1;

        info!(path = %self.path.display(), nodes = self.tree.len(), "Reloaded source file");
        self.notifier.publish(&Change::Reloaded);
        Ok(())
    }

    /// Rebuild from the last known-good source after a [`SyncError`]
    pub fn recover(&mut self) -> Result<(), EditorError> {
        warn!(path = %self.path.display(), "Rebuilding from last known-good source");
        let source = self.last_good_source.clone();
        self.reload(source)
    }

    // ---- Read access -----------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn last_good_source(&self) -> &str {
        &self.last_good_source
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.tree.selected_nodes()
    }

    pub fn selected_elements(&self) -> Vec<NodeId> {
        self.tree.selected_elements()
    }

    /// Display label: component name (or "default"), tag name, text value,
    /// or generated code
    pub fn label(&self, id: NodeId) -> Result<String, InvalidOperation> {
        let node = self.tree.lookup(id)?;
        Ok(match node.payload() {
            NodePayload::File { path } => Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone()),
            NodePayload::Component { name } => name.clone().unwrap_or_else(|| "default".to_string()),
            NodePayload::Element { tag, .. } => tag.clone(),
            NodePayload::Text { value } => value.clone(),
            NodePayload::Other { code } => code.clone(),
        })
    }

    // ---- Notification ----------------------------------------------------

    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ---- Selection, hover, collapse ----------------------------------------

    pub fn select(&mut self, id: NodeId) -> Result<(), InvalidOperation> {
        self.set_selected(id, true)
    }

    pub fn deselect(&mut self, id: NodeId) -> Result<(), InvalidOperation> {
        self.set_selected(id, false)
    }

    pub fn clear_selection(&mut self) {
        for id in self.tree.selected_nodes() {
            if self.tree.set_selected(id, false) {
                self.notifier.publish(&Change::Selection { node: id, selected: false });
            }
        }
    }

    fn set_selected(&mut self, id: NodeId, selected: bool) -> Result<(), InvalidOperation> {
        self.tree.lookup(id)?;
        if self.tree.set_selected(id, selected) {
            debug!(node = %id, selected, "Selection changed");
            self.notifier.publish(&Change::Selection { node: id, selected });
        }
        Ok(())
    }

    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> Result<(), InvalidOperation> {
        if self.tree.set_collapsed(id, collapsed)? {
            self.notifier.publish(&Change::Collapse { node: id, collapsed });
        }
        Ok(())
    }

    pub fn toggle_collapsed(&mut self, id: NodeId) -> Result<(), InvalidOperation> {
        let collapsed = self.tree.lookup(id)?.is_collapsed();
        self.set_collapsed(id, !collapsed)
    }

    /// Set the single hover pointer
    pub fn set_hovered(&mut self, id: Option<NodeId>) -> Result<(), InvalidOperation> {
        if let Some(id) = id {
            self.tree.lookup(id)?;
        }
        if self.hovered != id {
            self.hovered = id;
            self.notifier.publish(&Change::Hover { node: id });
        }
        Ok(())
    }

    // ---- Structural edits ----------------------------------------------------

    /// Move `node` under `parent`, before `reference` or at the end.
    ///
    /// Validation happens before anything changes; the syntax tree is edited
    /// first, then the node tree. Does not regenerate code.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), EditorError> {
        self.tree.validate_insert(parent, node, reference)?;
        if reference == Some(node) {
            return Ok(());
        }

        let node_key = self.tree.node(node).key().to_string();
        let parent_key = self.tree.node(parent).key().to_string();
        let old_parent_key = self
            .tree
            .parent(node)
            .map(|id| self.tree.node(id).key().to_string())
            .ok_or_else(|| InvalidOperation::Immovable(node_key.clone()))?;
        let reference_key = reference.map(|id| self.tree.node(id).key().to_string());

        self.check_syntax_target(&parent_key, reference_key.as_deref())?;
        let detached = self
            .module
            .find_element_mut(&old_parent_key)
            .and_then(|element| element.remove_child(&node_key))
            .ok_or_else(|| diverged(&node_key, "node is missing from its syntax parent"))?;

        let target = self
            .module
            .find_element_mut(&parent_key)
            .ok_or_else(|| diverged(&parent_key, "parent left the syntax tree"))?;
        let index = reference_key
            .as_deref()
            .and_then(|key| target.child_position(key))
            .unwrap_or(target.children.len());
        target.children.insert(index, detached);

        self.tree.move_node(parent, node, reference);
        self.revision += 1;

        debug!(node = %node_key, parent = %parent_key, before = ?reference_key, "Moved node");
        self.notifier.publish(&Change::Structure { node, parent });
        Ok(())
    }

    /// Insert a deep copy of `node` with fresh keys under `parent`, before
    /// `reference` or at the end. Returns the copy.
    pub fn duplicate_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId, EditorError> {
        self.tree.validate_copy(parent, node, reference)?;

        let node_key = self.tree.node(node).key().to_string();
        let parent_key = self.tree.node(parent).key().to_string();
        let reference_key = reference.map(|id| self.tree.node(id).key().to_string());
        self.check_syntax_target(&parent_key, reference_key.as_deref())?;

        let mut copy = self.syntax_child(node)?;
        let ids = &mut self.ids;
        copy.rekey(&mut || ids.new_id());

        let target = self
            .module
            .find_element_mut(&parent_key)
            .ok_or_else(|| diverged(&parent_key, "parent left the syntax tree"))?;
        let index = reference_key
            .as_deref()
            .and_then(|key| target.child_position(key))
            .unwrap_or(target.children.len());
        target.children.insert(index, copy.clone());

        let id = self
            .tree
            .insert_subtree(parent, reference, &copy)
            .map_err(SyncError::from)?;
        self.revision += 1;

        debug!(node = %node_key, copy = %copy.id(), parent = %parent_key, "Copied node");
        self.notifier.publish(&Change::Structure { node: id, parent });
        Ok(id)
    }

    /// Set (`Some`) or remove (`None`) a string attribute. Returns whether
    /// anything changed.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: Option<&str>) -> Result<bool, EditorError> {
        let node = self.tree.lookup(id)?;
        if node.kind() != NodeKind::Element {
            return Err(InvalidOperation::NotAnElement(node.key().to_string()).into());
        }
        let printable = !name.is_empty() && value.map_or(true, is_printable_attribute_value);
        if !printable {
            return Err(InvalidOperation::UnprintableAttribute {
                key: node.key().to_string(),
                name: name.to_string(),
            }
            .into());
        }
        let unchanged = match value {
            Some(value) => node.string_attribute(name) == Some(value),
            None => node.attributes().iter().all(|attr| attr.name() != Some(name)),
        };
        if unchanged {
            return Ok(false);
        }
        let key = node.key().to_string();

        let element = self
            .module
            .find_element_mut(&key)
            .ok_or_else(|| diverged(&key, "element left the syntax tree"))?;
        match value {
            Some(value) => {
                let ids = &mut self.ids;
                element.set_string_attribute(name, value, || ids.new_id());
            }
            None => {
                element.remove_attribute(name);
            }
        }
        let attributes = element.attributes.clone();

        self.tree.set_attributes(id, attributes);
        self.revision += 1;

        debug!(node = %key, attribute = name, value = ?value, "Set attribute");
        self.notifier.publish(&Change::Attribute {
            node: id,
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Style decoded from the element's class attribute
    pub fn element_style(&self, id: NodeId) -> Result<Style, InvalidOperation> {
        let node = self.tree.lookup(id)?;
        if node.kind() != NodeKind::Element {
            return Err(InvalidOperation::NotAnElement(node.key().to_string()));
        }
        Ok(decode(node.string_attribute(&self.options.class_attribute).unwrap_or("")))
    }

    /// Merge `style` into the element's class attribute. Returns the
    /// longhands whose value changed.
    pub fn set_element_style(&mut self, id: NodeId, style: &Style) -> Result<Vec<StyleKey>, EditorError> {
        let previous = self.element_style(id)?;
        let node = self.tree.node(id);
        let class_attribute = self.options.class_attribute.clone();

        let has_expression = node.attributes().iter().any(|attr| attr.name() == Some(class_attribute.as_str()))
            && node.string_attribute(&class_attribute).is_none();
        if has_expression {
            return Err(InvalidOperation::ExpressionAttribute(node.key().to_string()).into());
        }

        let existing = node.string_attribute(&class_attribute).unwrap_or("").to_string();
        let merged = merge_class_names(&existing, style);
        let value = if merged.is_empty() { None } else { Some(merged.as_str()) };
        self.set_attribute(id, &class_attribute, value)?;

        let changed: Vec<StyleKey> = StyleKey::ALL
            .iter()
            .copied()
            .filter(|key| previous.get(*key) != style.get(*key))
            .collect();
        for key in &changed {
            self.notifier.publish(&Change::Style { node: id, key: *key });
        }
        Ok(changed)
    }

    // ---- Regeneration ----------------------------------------------------------

    /// Regenerate source text from the syntax tree and check that the node
    /// tree still agrees with it. A failure here means the trees diverged;
    /// call [`SourceFile::recover`].
    pub fn update_code(&mut self) -> Result<(), EditorError> {
        let code = self.generator.generate(&self.module).map_err(SyncError::from)?;
        self.verify_sync()?;

        self.code = code.clone();
        self.last_good_source = code;
        self.version += 1;

        info!(path = %self.path.display(), version = self.version, bytes = self.code.len(), "Regenerated source");
        self.notifier.publish(&Change::Code { version: self.version });
        Ok(())
    }

    pub fn verify_sync(&self) -> Result<(), SyncError> {
        self.tree.verify(&self.module)
    }

    /// Syntax node behind a tree node, cloned
    fn syntax_child(&self, id: NodeId) -> Result<JsxChild, EditorError> {
        let node = self.tree.node(id);
        let key = node.key();

        if node.kind() == NodeKind::Element {
            return self
                .module
                .find_element(key)
                .cloned()
                .map(JsxChild::Element)
                .ok_or_else(|| diverged(key, "element left the syntax tree").into());
        }

        self.tree
            .parent(id)
            .and_then(|parent| self.module.find_element(self.tree.node(parent).key()))
            .and_then(|parent| parent.children.iter().find(|child| child.id() == key))
            .cloned()
            .ok_or_else(|| diverged(key, "node is missing from its syntax parent").into())
    }

    /// The syntax tree must hold the target parent and reference too
    fn check_syntax_target(&self, parent_key: &str, reference_key: Option<&str>) -> Result<(), SyncError> {
        let target = self
            .module
            .find_element(parent_key)
            .ok_or_else(|| diverged(parent_key, "parent left the syntax tree"))?;
        if let Some(reference_key) = reference_key {
            if target.child_position(reference_key).is_none() {
                return Err(diverged(reference_key, "reference is missing from its syntax parent"));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("nodes", &self.tree.len())
            .field("version", &self.version)
            .field("revision", &self.revision)
            .field("hovered", &self.hovered)
            .field("notifier", &self.notifier)
            .finish()
    }
}

fn load(path: &Path, source: &str) -> Result<(Module, IDGenerator, NodeTree), EditorError> {
    let path_str = path.to_string_lossy();
    let mut parser = Parser::new(source, IDGenerator::new(&path_str));
    let module = parser.parse_module()?;
    let tree = NodeTree::build(&module, &path_str).map_err(SyncError::from)?;
    Ok((module, parser.into_id_generator(), tree))
}

fn diverged(key: &str, message: &str) -> SyncError {
    SyncError::Diverged {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SOURCE: &str = r#"export default function List() {
  return <ul className="pt-[4px]"><li>A</li><li>B</li><li>C</li></ul>;
}
"#;

    fn file() -> SourceFile {
        SourceFile::from_source("/List.tsx", SOURCE, EditorOptions::default()).unwrap()
    }

    fn items(file: &SourceFile) -> (NodeId, Vec<NodeId>) {
        let tree = file.tree();
        let ul = tree.children(tree.components()[0])[0];
        (ul, tree.children(ul).to_vec())
    }

    #[test]
    fn test_insert_before_updates_both_trees() {
        let mut file = file();
        let (ul, li) = items(&file);

        file.insert_before(ul, li[2], Some(li[1])).unwrap();
        file.update_code().unwrap();

        assert_eq!(file.tree().children(ul), &[li[0], li[2], li[1]]);
        assert_eq!(
            file.code(),
            "export default function List() {\n  return <ul className=\"pt-[4px]\"><li>A</li><li>C</li><li>B</li></ul>;\n}\n"
        );
        assert_eq!(file.version(), 1);
    }

    #[test]
    fn test_invalid_reference_leaves_state_intact() {
        let mut file = file();
        let (ul, li) = items(&file);
        let text = file.tree().children(li[0])[0];

        let err = file.insert_before(ul, li[2], Some(text)).unwrap_err();
        assert!(matches!(
            err,
            EditorError::InvalidOperation(InvalidOperation::ReferenceNotChild { .. })
        ));
        assert_eq!(file.tree().children(ul), li.as_slice());
        assert!(file.verify_sync().is_ok());
    }

    #[test]
    fn test_insert_before_self_is_noop() {
        let mut file = file();
        let (ul, li) = items(&file);

        file.insert_before(ul, li[1], Some(li[1])).unwrap();
        assert_eq!(file.revision(), 0);
    }

    #[test]
    fn test_move_into_other_parent() {
        let mut file = file();
        let (ul, li) = items(&file);

        file.insert_before(li[0], li[2], None).unwrap();
        file.update_code().unwrap();

        assert_eq!(file.tree().parent(li[2]), Some(li[0]));
        assert_eq!(file.tree().children(ul).len(), 2);
        assert!(file.code().contains("<li>A<li>C</li></li>"));
    }

    #[test]
    fn test_duplicate_gets_fresh_keys() {
        let mut file = file();
        let (ul, li) = items(&file);

        let copy = file.duplicate_before(ul, li[0], None).unwrap();
        file.update_code().unwrap();

        assert_ne!(file.tree().node(copy).key(), file.tree().node(li[0]).key());
        assert_eq!(file.tree().children(ul).len(), 4);
        assert!(file.code().contains("<li>C</li><li>A</li></ul>"));
    }

    #[test]
    fn test_element_style_roundtrip() {
        let mut file = file();
        let (ul, _) = items(&file);

        let mut style = file.element_style(ul).unwrap();
        assert_eq!(style.get(StyleKey::PaddingTop), Some("4px"));

        style.set(StyleKey::MarginTop, "2px");
        let changed = file.set_element_style(ul, &style).unwrap();
        file.update_code().unwrap();

        assert_eq!(changed, vec![StyleKey::MarginTop]);
        assert!(file.code().contains(r#"className="mt-[2px] pt-[4px]""#));
    }

    #[test]
    fn test_unprintable_style_is_rejected_before_any_change() {
        let mut file = file();
        let (ul, _) = items(&file);

        let mut style = file.element_style(ul).unwrap();
        style.set(StyleKey::FontFamily, r#"Say "Hi""#);
        let err = file.set_element_style(ul, &style).unwrap_err();

        assert!(matches!(
            err,
            EditorError::InvalidOperation(InvalidOperation::UnprintableAttribute { .. })
        ));
        assert_eq!(file.tree().node(ul).string_attribute("className"), Some("pt-[4px]"));
        let element = file.module().find_element(file.tree().node(ul).key()).unwrap();
        assert_eq!(element.string_attribute("className"), Some("pt-[4px]"));
        assert_eq!(file.revision(), 0);
        assert!(file.update_code().is_ok());
    }

    #[test]
    fn test_changes_are_published() {
        let mut file = file();
        let (ul, li) = items(&file);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        file.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        file.select(ul).unwrap();
        file.select(ul).unwrap();
        file.set_hovered(Some(li[0])).unwrap();
        file.toggle_collapsed(ul).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                Change::Selection { node: ul, selected: true },
                Change::Hover { node: Some(li[0]) },
                Change::Collapse { node: ul, collapsed: true },
            ]
        );
    }

    #[test]
    fn test_text_cannot_collapse() {
        let mut file = file();
        let (_, li) = items(&file);
        let text = file.tree().children(li[0])[0];

        assert!(matches!(file.toggle_collapsed(text), Err(InvalidOperation::NotCollapsible(_))));
    }

    #[test]
    fn test_parse_failure_is_fatal_and_reload_keeps_state() {
        assert!(matches!(
            SourceFile::from_source("/x.tsx", "export default function A() { return <a></b>; }", EditorOptions::default()),
            Err(EditorError::Parse(_))
        ));

        let mut file = file();
        assert!(file.reload("const a = (;\n").is_err());
        assert_eq!(file.code(), SOURCE);
    }

    #[test]
    fn test_labels() {
        let file = file();
        let tree = file.tree();
        let component = tree.components()[0];
        let (ul, li) = items(&file);

        assert_eq!(file.label(tree.root()).unwrap(), "List.tsx");
        assert_eq!(file.label(component).unwrap(), "List");
        assert_eq!(file.label(ul).unwrap(), "ul");
        assert_eq!(file.label(tree.children(li[1])[0]).unwrap(), "B");
    }
}
