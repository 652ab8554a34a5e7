//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::traversal::DEFAULT_EXTENSION;

/// When to enable an output feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum When {
    Never,
    #[default]
    Auto,
    Always,
}

impl When {
    /// Resolve against whether stdout is a terminal.
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            When::Never => false,
            When::Auto => is_terminal,
            When::Always => true,
        }
    }
}

/// List TODO and DONE messages in TeX documents.
#[derive(Debug, Parser)]
#[command(name = "todotex", version, long_about = None)]
pub struct Arguments {
    /// TeX files and/or directories to search. Reads stdin if none is given
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Configuration file to use (default: ./.todotex.toml,
    /// ~/.config/todotex/todotex.toml, ~/.todotex.toml, first found wins)
    #[arg(short = 'C', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allow a message to continue on following comment lines indented
    /// deeper than its keyword
    #[arg(short = 'c', long = "continuation")]
    pub allow_continuation: bool,

    /// Search recursively into directories given as PATH
    #[arg(short, long)]
    pub recursive: bool,

    /// File extensions searched inside directories
    #[arg(long = "ext", value_name = "EXT", default_values_t = [DEFAULT_EXTENSION.to_string()])]
    pub extensions: Vec<String>,

    /// Text encoding of the documents
    #[arg(long, value_name = "LABEL", default_value = "utf-8")]
    pub encoding: String,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Print annotations as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the built-in keyword configuration and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options controlling the layout of the output.
#[derive(Debug, Clone, clap::Args)]
#[command(next_help_heading = "Layout")]
pub struct LayoutArgs {
    /// Suppress printing line numbers
    #[arg(short = 'L')]
    pub no_line_number: bool,

    /// Suppress printing entries of resolved keywords
    #[arg(short = 'D')]
    pub no_resolved: bool,

    /// Suppress printing the label of the entry keywords
    #[arg(short = 'B')]
    pub no_label: bool,

    /// Suppress printing messages
    #[arg(short = 'M')]
    pub no_message: bool,

    /// Show paths as absolute paths, resolving symbolic links and `..`
    #[arg(short = 'a')]
    pub absolute_path: bool,

    /// Group output under a file name heading instead of prefixing each line
    #[arg(long, value_enum, default_value_t = When::Auto)]
    pub heading: When,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = When::Auto)]
    pub color: When,
}
