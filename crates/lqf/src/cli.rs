//! CLI argument parsing using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lucene_filters::PositiveOperator;

/// lqf - Inspect Lucene queries as typed search filters
#[derive(Parser, Debug)]
#[command(name = "lqf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Field registry file, TOML or JSON (default: fields from the config file)
    #[arg(long, global = true, env = "LQF_FIELDS", value_name = "FILE")]
    pub fields: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a query into its positive and negative filters
    #[command(alias = "f")]
    Filters {
        /// Query text, e.g. 'size:3 AND NOT color:(red OR blue)'
        query: String,

        /// Operator joining the filters (default: from config, else implicit)
        #[arg(short, long, value_enum)]
        operator: Option<OperatorArg>,
    },

    /// Print the query fragment for a filter
    #[command(alias = "s")]
    Serialize {
        /// Field name
        field: String,

        /// Value; ranges take two (min and max), enums any number
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// List the known fields
    Fields,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Operators accepted by `--operator`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorArg {
    /// Filters separated by whitespace
    Implicit,
    /// Filters joined by AND
    And,
    /// Filters joined by OR
    Or,
}

impl From<OperatorArg> for PositiveOperator {
    fn from(operator: OperatorArg) -> Self {
        match operator {
            OperatorArg::Implicit => PositiveOperator::Implicit,
            OperatorArg::And => PositiveOperator::And,
            OperatorArg::Or => PositiveOperator::Or,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show current configuration (default)
    Show,

    /// Print config file path
    Path,

    /// Write a default config file if none exists
    Init,
}
