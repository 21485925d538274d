//! # Twinspect Editor
//!
//! Keeps three views of one component file in sync.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: source text → Module                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: SourceFile                          │
//! │  - NodeTree with stable keys                │
//! │  - selection / hover / collapse             │
//! │  - structural edits on both trees at once   │
//! │  - regenerate through a CodeGenerator       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Renderer → ViewElement tree → ViewMapping   │
//! │  - hit-testing, overlay geometry            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use twinspect_editor::{AppContext, EditorOptions, Modifiers, PreviewRenderer, SourceFile};
//!
//! let file = SourceFile::open("src/Card.tsx", EditorOptions::default())?;
//! let mut app = AppContext::new(file, Box::new(PreviewRenderer::default()));
//!
//! app.render()?;
//! app.click_at(20.0, 30.0, Modifiers::NONE)?;
//! ```

mod app;
mod errors;
pub mod inspector;
mod node_tree;
mod notify;
pub mod outline;
mod preview;
mod source_file;
mod view_mapping;

pub use app::{AppContext, Modifiers, Overlay};
pub use errors::{EditorError, InvalidOperation, SyncError};
pub use inspector::Inspection;
pub use node_tree::{Node, NodeId, NodeKind, NodePayload, NodeTree};
pub use notify::{Change, Notifier, SubscriptionId};
pub use outline::OutlineItem;
pub use preview::{PreviewRenderer, Renderer};
pub use source_file::{EditorOptions, SourceFile};
pub use view_mapping::{Rect, ViewElement, ViewEntry, ViewId, ViewMapping};

// Re-export for embedders that drive styles directly
pub use twinspect_style::{AnyStyleKey, MaybeMixed, ShorthandKey, Style, StyleKey};
