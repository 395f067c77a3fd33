//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Rebuild and display the element tree of an SVG from its row-table export
#[derive(Parser, Debug)]
#[command(name = "svgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colored tree output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Converter program (overrides configuration)
    #[arg(long, global = true, value_hint = ValueHint::CommandName)]
    pub engine: Option<String>,

    /// Treat SOURCE as an already exported row table
    #[arg(long, global = true)]
    pub from_table: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the element tree, attributes indented below their element
    Tree {
        /// SVG document (or exported table with --from-table)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
    },

    /// Print the tree model with attribute nodes as box-drawing tree
    Model {
        /// SVG document (or exported table with --from-table)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
    },

    /// Print the raw row table
    Table {
        /// SVG document (or exported table with --from-table)
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
    },

    /// Convert SOURCE and let the engine write its table to DESTINATION
    Export {
        /// SVG document
        #[arg(value_hint = ValueHint::FilePath)]
        source: PathBuf,
        /// Table file to write
        #[arg(value_hint = ValueHint::FilePath)]
        destination: PathBuf,
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
    /// Show effective settings
    Show,
    /// Print a commented template
    Template,
    /// Print the global config file location
    Path,
}
