use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dirsnap",
    about = "Timestamped snapshot copies of a directory with name-based exclusions",
    version = crate::VERSION,
    long_about = "dirsnap copies a source directory into a dated subfolder of an\n\
                  archive directory, skipping a configured set of top-level file\n\
                  and folder names. Each run produces one snapshot folder named\n\
                  YYYY-MM-DD_HH-MM-SS."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: ~/.dirsnap.json)
    #[arg(short, long, global = true, env = "DIRSNAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take one snapshot of the configured source directory
    Run(RunArgs),

    /// Write a default config file for a source directory
    Init(InitArgs),

    /// Show the current configuration
    Show,

    /// List existing snapshots in the archive directory
    List,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory the snapshots will be taken of
    #[arg(default_value = ".")]
    pub source: PathBuf,

    /// Archive directory (default: an "Archive" subfolder of the source)
    #[arg(long)]
    pub archive: Option<PathBuf>,
}
