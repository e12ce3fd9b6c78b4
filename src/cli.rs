use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "bootmgr", version, about = "Provision the bootmgr directory layout")]
pub struct Cli {
    /// Change to this directory before resolving anything else.
    #[arg(short = 'C', long = "chdir")]
    pub chdir: Option<PathBuf>,
    /// Explicit config file.
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,
    /// Root directory; defaults to the config value, then the parent of the working directory.
    #[arg(long = "root", global = true)]
    pub root: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify the root and create `projects/` and `logs/` beneath it.
    Ensure,
    /// Print the resolved layout without touching the filesystem.
    Paths,
    /// Configuration helpers.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config path in effect and how it was found.
    Path,
}

pub fn parse() -> Cli {
    Cli::parse()
}
