//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// choicecfg - Read, resolve, and update choice configuration documents
#[derive(Parser, Debug)]
#[command(name = "choicecfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Document to operate on (.yaml, .yml, .json or .toml)
    #[arg(
        short,
        long,
        global = true,
        env = "CHOICECFG_FILE",
        default_value = "config.yaml"
    )]
    pub file: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value at a dotted path
    ///
    /// Examples:
    ///   choicecfg get name
    ///   choicecfg get mode.slow.value
    Get {
        /// Dotted key path
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the value at a dotted path
    ///
    /// VALUE is read as a YAML scalar or sequence, so `10`, `true` and `[1, 2]`
    /// keep their types. Mapping text such as `a: b` is stored as a string.
    /// Parent groups must already exist.
    Set {
        /// Dotted key path
        path: String,

        /// New value
        value: String,
    },

    /// Print the resolved selection chain of a group, outermost first
    Resolve {
        /// Dotted path of the choice group
        group: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Choose an option in a group
    ///
    /// Examples:
    ///   choicecfg select mode slow
    ///   choicecfg select mode.slow b
    Select {
        /// Dotted path of the choice group
        group: String,

        /// Option key to select
        option: String,
    },

    /// Show the options of one group, or of every top-level group
    Show {
        /// Dotted path of the choice group
        group: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
