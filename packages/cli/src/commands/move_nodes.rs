use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use twinspect_editor::outline;

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Component source file
    pub file: PathBuf,

    /// Nodes to move, by outline key
    #[arg(short, long = "node", value_name = "KEY", required = true)]
    pub nodes: Vec<String>,

    /// New parent element
    #[arg(short, long, value_name = "KEY")]
    pub parent: String,

    /// Sibling to insert before; appends when omitted
    #[arg(short, long, value_name = "KEY")]
    pub before: Option<String>,

    /// Copy instead of moving
    #[arg(short, long)]
    pub copy: bool,

    /// Write the result back to the file
    #[arg(short, long)]
    pub write: bool,
}

pub fn move_nodes(args: MoveArgs, cwd: &str) -> Result<()> {
    let mut file = super::open(&args.file, cwd)?;
    let nodes = super::find_nodes(&file, &args.nodes)?;
    let parent = super::find_nodes(&file, std::slice::from_ref(&args.parent))?[0];
    let before = match &args.before {
        Some(key) => Some(super::find_nodes(&file, std::slice::from_ref(key))?[0]),
        None => None,
    };

    super::select_only(&mut file, &nodes)?;
    if !outline::can_drop(&file, parent, before, args.copy) {
        bail!("Cannot drop the selected nodes under {}", args.parent);
    }
    outline::drop(&mut file, parent, before, args.copy)?;

    super::emit(&file, args.write)
}
