//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Selector-driven JSON projection: pick fields and nested relations at call time
#[derive(Parser, Debug)]
#[command(name = "jsonfn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project a JSON document through selectors
    Project {
        /// JSON file (default: stdin, also `-`)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Selector, e.g. `Id`, `Author{Id,Name}`, `Author:Country{*}` (repeatable)
        #[arg(short, long = "select", value_name = "SELECTOR")]
        selectors: Vec<String>,

        /// Pretty-print the result
        #[arg(short, long)]
        pretty: bool,

        /// Match relation keys exactly instead of upper-casing the first letter
        #[arg(long)]
        verbatim: bool,

        /// Override the configured relation depth limit
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },

    /// Show the merged selection tree
    Tree {
        /// Selector (repeatable)
        #[arg(short, long = "select", value_name = "SELECTOR")]
        selectors: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
