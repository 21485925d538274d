use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use twinspect_editor::{AppContext, Modifiers, PreviewRenderer, Rect};

#[derive(Debug, Args)]
pub struct HitArgs {
    /// Component source file
    pub file: PathBuf,

    /// X coordinate in the preview
    pub x: f64,

    /// Y coordinate in the preview
    pub y: f64,
}

/// Render the preview and report the node under a point
pub fn hit(args: HitArgs, cwd: &str) -> Result<()> {
    let file = super::open(&args.file, cwd)?;
    let renderer = PreviewRenderer::new(file.options().viewport_width);
    let mut app = AppContext::new(file, Box::new(renderer));

    let mapped = app.render()?;
    tracing::debug!(nodes = mapped, "Rendered preview");

    match app.click_at(args.x, args.y, Modifiers::NONE)? {
        Some(node) => {
            let label = app.file().label(node)?;
            let key = app.file().tree().node(node).key().to_string();
            let rect = app.overlay().selected.first().copied().unwrap_or_default();
            println!("{} {} {}", label.cyan(), key.dimmed(), describe(&rect));
        }
        None => println!("{}", "(nothing)".dimmed()),
    }
    Ok(())
}

fn describe(rect: &Rect) -> String {
    format!("{}x{} at ({}, {})", rect.width, rect.height, rect.x, rect.y)
}
