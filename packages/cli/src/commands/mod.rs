pub mod format;
pub mod hit;
pub mod move_nodes;
pub mod outline;
pub mod set_style;
pub mod style;

pub use format::{format, FormatArgs};
pub use hit::{hit, HitArgs};
pub use move_nodes::{move_nodes, MoveArgs};
pub use outline::{outline, OutlineArgs};
pub use set_style::{set_style, SetStyleArgs};
pub use style::{style, StyleArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use twinspect_editor::{EditorError, NodeId, SourceFile};
use twinspect_parser::format_error;

/// Open a source file with the configured editor options. Parse failures
/// are rendered with source context.
pub(crate) fn open(path: &Path, cwd: &str) -> Result<SourceFile> {
    let config = Config::load(cwd)?;
    let path = resolve_path(path, cwd);

    match SourceFile::open(&path, config.editor) {
        Ok(file) => Ok(file),
        Err(EditorError::Parse(err)) => {
            let source = std::fs::read_to_string(&path).unwrap_or_default();
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown");
            Err(anyhow!("\n{}", format_error(&source, file_name, &err)))
        }
        Err(err) => Err(anyhow!("{}: {}", path.display(), err)),
    }
}

fn resolve_path(path: &Path, cwd: &str) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Look up nodes by the keys `outline` prints
pub(crate) fn find_nodes(file: &SourceFile, keys: &[String]) -> Result<Vec<NodeId>> {
    keys.iter()
        .map(|key| {
            file.tree()
                .find_by_key(key)
                .ok_or_else(|| anyhow!("No node with key {}", key))
        })
        .collect()
}

/// Select exactly `nodes`
pub(crate) fn select_only(file: &mut SourceFile, nodes: &[NodeId]) -> Result<()> {
    file.clear_selection();
    for node in nodes {
        file.select(*node)?;
    }
    Ok(())
}

/// Write the regenerated source back, or print it
pub(crate) fn emit(file: &SourceFile, write: bool) -> Result<()> {
    if write {
        file.save()?;
        println!("  {} Wrote {}", "✓".green(), file.path().display());
    } else {
        print!("{}", file.code());
    }
    Ok(())
}
