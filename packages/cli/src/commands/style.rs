use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use twinspect_editor::{inspector, Inspection, MaybeMixed};

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Component source file
    pub file: PathBuf,

    /// Elements to inspect, by outline key
    #[arg(short, long = "node", value_name = "KEY", required = true)]
    pub nodes: Vec<String>,

    /// Print the inspection as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn style(args: StyleArgs, cwd: &str) -> Result<()> {
    let mut file = super::open(&args.file, cwd)?;
    let nodes = super::find_nodes(&file, &args.nodes)?;
    super::select_only(&mut file, &nodes)?;

    let inspection = inspector::inspect(&file)?;
    if inspection.elements.is_empty() {
        bail!("None of the selected nodes is an element");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        let rows = render_rows(&inspection);
        if rows.is_empty() {
            println!("{}", "(no style)".dimmed());
        }
        for row in rows {
            println!("{}", row);
        }
    }
    Ok(())
}

fn render_rows(inspection: &Inspection) -> Vec<String> {
    inspection
        .present()
        .map(|(key, value)| match value {
            MaybeMixed::Value(value) => format!("{}: {}", key, value.as_deref().unwrap_or_default()),
            MaybeMixed::Mixed => format!("{}: {}", key, "mixed".yellow()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use twinspect_editor::{EditorOptions, SourceFile};

    #[test]
    fn test_rows_list_present_keys() {
        colored::control::set_override(false);
        let source = r#"export default function A() {
  return <div><p className="mt-[1px] bg-[red]" /><p className="mt-[2px] bg-[red]" /></div>;
}
"#;
        let mut file = SourceFile::from_source("/A.tsx", source, EditorOptions::default()).unwrap();
        let div = file.tree().children(file.tree().components()[0])[0];
        let ps = file.tree().children(div).to_vec();
        super::super::select_only(&mut file, &ps).unwrap();

        let rows = render_rows(&inspector::inspect(&file).unwrap());
        assert_eq!(rows, vec!["marginTop: mixed", "background: red", "margin: mixed"]);
    }
}
