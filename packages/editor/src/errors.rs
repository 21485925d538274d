//! Error types for the editor

use thiserror::Error;
use twinspect_parser::{GenerateError, ParseError};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Render error: {0}")]
    Render(String),
}

/// An edit the tree cannot apply. Nothing was changed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidOperation {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Reference node {reference} is not a child of {parent}")]
    ReferenceNotChild { reference: String, parent: String },

    #[error("Node {key} ({kind}) cannot hold children")]
    NotAContainer { key: String, kind: String },

    #[error("Node {0} cannot be moved")]
    Immovable(String),

    #[error("Moving {node} into {parent} would create a cycle")]
    CycleDetected { node: String, parent: String },

    #[error("Node {0} cannot be collapsed")]
    NotCollapsible(String),

    #[error("Node {0} is not an element")]
    NotAnElement(String),

    #[error("Attribute of {0} is an expression and cannot be rewritten")]
    ExpressionAttribute(String),

    #[error("Attribute '{name}' of {key} cannot be written as a JSX string")]
    UnprintableAttribute { key: String, name: String },
}

/// The node tree and the syntax tree no longer describe the same structure.
/// Recover by rebuilding from the last known-good source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    #[error("Code generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("Node tree and syntax tree diverged at {key}: {message}")]
    Diverged { key: String, message: String },
}
