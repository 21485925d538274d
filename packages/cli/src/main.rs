mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    format, hit, move_nodes, outline, set_style, style, FormatArgs, HitArgs, MoveArgs, OutlineArgs, SetStyleArgs,
    StyleArgs,
};
use tracing_subscriber::EnvFilter;

/// Twinspect - inspect and edit JSX components from the command line
#[derive(Parser, Debug)]
#[command(name = "twinspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log editor activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the node tree with keys
    Outline(OutlineArgs),

    /// Show the style of one or more elements
    Style(StyleArgs),

    /// Set a style property on one or more elements
    SetStyle(SetStyleArgs),

    /// Move or copy nodes to a new position
    Move(MoveArgs),

    /// Regenerate source from the syntax tree
    Format(FormatArgs),

    /// Report the node under a point of the preview
    Hit(HitArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Outline(args) => outline(args, &cwd),
                Command::Style(args) => style(args, &cwd),
                Command::SetStyle(args) => set_style(args, &cwd),
                Command::Move(args) => move_nodes(args, &cwd),
                Command::Format(args) => format(args, &cwd),
                Command::Hit(args) => hit(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
