use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Component source file
    pub file: PathBuf,

    /// Write the result back to the file
    #[arg(short, long)]
    pub write: bool,

    /// Exit with an error if the file is not already formatted
    #[arg(long, conflicts_with = "write")]
    pub check: bool,
}

/// Regenerate the file from its syntax tree
pub fn format(args: FormatArgs, cwd: &str) -> Result<()> {
    let mut file = super::open(&args.file, cwd)?;
    let original = file.code().to_string();
    file.update_code()?;

    if args.check {
        if file.code() != original {
            anyhow::bail!("{} is not formatted", args.file.display());
        }
        println!("  {} {}", "✓".green(), args.file.display());
        return Ok(());
    }

    super::emit(&file, args.write)
}
