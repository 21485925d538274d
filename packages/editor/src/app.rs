//! Application context: one file, its renderer and the current view mapping

use crate::errors::EditorError;
use crate::node_tree::NodeId;
use crate::preview::Renderer;
use crate::source_file::SourceFile;
use crate::view_mapping::{Rect, ViewElement, ViewId, ViewMapping};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
    };

    pub fn shift() -> Self {
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        }
    }

    /// Alt or ctrl turns a drop into a copy
    pub fn is_copy(&self) -> bool {
        self.alt || self.ctrl
    }
}

/// Highlight geometry in overlay coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub hovered: Option<Rect>,
    pub selected: Vec<Rect>,
}

/// Owns everything one editing session needs. Render, then rebuild the
/// mapping, then accept input; pointer input that arrives while the mapping
/// is stale is ignored.
pub struct AppContext {
    file: SourceFile,
    mapping: ViewMapping,
    renderer: Box<dyn Renderer>,
    /// Top-left of the overlay in view coordinates
    origin: (f64, f64),
    rendered_revision: Option<u64>,
    last_render: Option<ViewElement>,
}

impl AppContext {
    pub fn new(file: SourceFile, renderer: Box<dyn Renderer>) -> Self {
        Self {
            file,
            mapping: ViewMapping::new(),
            renderer,
            origin: (0.0, 0.0),
            rendered_revision: None,
            last_render: None,
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut SourceFile {
        &mut self.file
    }

    pub fn mapping(&self) -> &ViewMapping {
        &self.mapping
    }

    pub fn last_render(&self) -> Option<&ViewElement> {
        self.last_render.as_ref()
    }

    /// Render the file and rebuild the mapping from the result
    pub fn render(&mut self) -> Result<usize, EditorError> {
        let root = self.renderer.render(&self.file)?;
        let mapped = self.mapping.rebuild(&root, self.file.tree());
        self.rendered_revision = Some(self.file.revision());
        self.last_render = Some(root);
        Ok(mapped)
    }

    /// Whether the file changed structurally since the last render
    pub fn is_stale(&self) -> bool {
        self.rendered_revision != Some(self.file.revision())
    }

    fn resolve(&self, target: ViewId, event: &str) -> Option<NodeId> {
        if self.is_stale() {
            debug!(event, view = target.0, "Ignoring input on stale view mapping");
            return None;
        }
        self.mapping.node_for_dom(target)
    }

    /// Select the node behind `target`. Without shift the selection becomes
    /// exactly that node; with shift its membership is toggled.
    pub fn pointer_down(&mut self, target: ViewId, modifiers: Modifiers) -> Result<Option<NodeId>, EditorError> {
        let Some(node) = self.resolve(target, "pointer_down") else {
            return Ok(None);
        };

        if modifiers.shift {
            if self.file.tree().node(node).is_selected() {
                self.file.deselect(node)?;
            } else {
                self.file.select(node)?;
            }
        } else {
            self.file.clear_selection();
            self.file.select(node)?;
        }
        Ok(Some(node))
    }

    pub fn pointer_move(&mut self, target: ViewId) -> Result<Option<NodeId>, EditorError> {
        let Some(node) = self.resolve(target, "pointer_move") else {
            return Ok(None);
        };
        self.file.set_hovered(Some(node))?;
        Ok(Some(node))
    }

    pub fn pointer_leave(&mut self) -> Result<(), EditorError> {
        self.file.set_hovered(None)?;
        Ok(())
    }

    /// Hit-test a point in view coordinates, then treat it as a pointer-down
    pub fn click_at(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Result<Option<NodeId>, EditorError> {
        match self.mapping.hit_test(x, y) {
            Some((view, _)) => self.pointer_down(view, modifiers),
            None => Ok(None),
        }
    }

    /// Empty while the mapping is stale: its geometry belongs to a tree
    /// that no longer exists
    pub fn overlay(&self) -> Overlay {
        if self.is_stale() {
            return Overlay::default();
        }
        let (dx, dy) = (-self.origin.0, -self.origin.1);
        let rect_of = |node: NodeId| self.mapping.rect_of(node).map(|rect| rect.translate(dx, dy));

        Overlay {
            hovered: self.file.hovered().and_then(rect_of),
            selected: self.file.selected_nodes().into_iter().filter_map(rect_of).collect(),
        }
    }

    /// Tear the context down and hand back the file
    pub fn close(self) -> SourceFile {
        debug!(path = %self.file.path().display(), generation = self.mapping.generation(), "Closing app context");
        self.file
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("file", &self.file)
            .field("mapping", &self.mapping)
            .field("origin", &self.origin)
            .field("rendered_revision", &self.rendered_revision)
            .finish()
    }
}
