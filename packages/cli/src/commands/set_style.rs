use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use twinspect_editor::{inspector, AnyStyleKey, MaybeMixed};

#[derive(Debug, Args)]
pub struct SetStyleArgs {
    /// Component source file
    pub file: PathBuf,

    /// Elements to change, by outline key
    #[arg(short, long = "node", value_name = "KEY", required = true)]
    pub nodes: Vec<String>,

    /// Property name, longhand or shorthand (e.g. marginTop, padding)
    pub property: AnyStyleKey,

    /// New value; an empty string clears the property
    pub value: String,

    /// Write the result back to the file
    #[arg(short, long)]
    pub write: bool,
}

pub fn set_style(args: SetStyleArgs, cwd: &str) -> Result<()> {
    let mut file = super::open(&args.file, cwd)?;
    let nodes = super::find_nodes(&file, &args.nodes)?;
    super::select_only(&mut file, &nodes)?;

    if file.selected_elements().is_empty() {
        bail!("None of the selected nodes is an element");
    }

    let changed = inspector::set(&mut file, args.property, MaybeMixed::Value(args.value.as_str()))?;
    tracing::info!(property = %args.property, elements = changed, "Applied style");

    super::emit(&file, args.write)
}
