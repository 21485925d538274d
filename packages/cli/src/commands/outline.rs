use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use twinspect_editor::outline::{self as outline_model, visible_rows};
use twinspect_editor::{NodeKind, OutlineItem};

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Component source file
    pub file: PathBuf,

    /// Print the outline as JSON
    #[arg(long)]
    pub json: bool,

    /// Collapse these nodes before printing
    #[arg(short, long = "collapse", value_name = "KEY")]
    pub collapse: Vec<String>,
}

pub fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    let mut file = super::open(&args.file, cwd)?;
    for node in super::find_nodes(&file, &args.collapse)? {
        file.set_collapsed(node, true)?;
    }

    let root = outline_model::outline(&file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        for row in render_rows(&root) {
            println!("{}", row);
        }
    }
    Ok(())
}

fn render_rows(root: &OutlineItem) -> Vec<String> {
    visible_rows(root)
        .into_iter()
        .map(|item| {
            let marker = match (item.shows_collapse_button, item.collapsed) {
                (true, true) => "▸ ",
                (true, false) => "▾ ",
                _ => "  ",
            };
            let label = match item.kind {
                NodeKind::Component => item.label.bold().to_string(),
                NodeKind::Element => item.label.cyan().to_string(),
                NodeKind::Text => format!("{:?}", item.label),
                _ => item.label.clone(),
            };
            format!("{}{}{} {}", "  ".repeat(item.depth), marker, label, item.key.dimmed())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinspect_editor::{EditorOptions, SourceFile};

    #[test]
    fn test_rows_are_indented_by_depth() {
        colored::control::set_override(false);
        let source = "export default function Card() {\n  return <div><h1>Title</h1></div>;\n}\n";
        let file = SourceFile::from_source("/Card.tsx", source, EditorOptions::default()).unwrap();
        let root = outline_model::outline(&file).unwrap();

        let rows = render_rows(&root);
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with("▾ Card.tsx"));
        assert!(rows[1].starts_with("  ▾ Card"));
        assert!(rows[2].starts_with("    ▾ div"));
        assert!(rows[3].starts_with("      ▾ h1"));
        assert!(rows[4].starts_with("          \"Title\""));
    }
}
