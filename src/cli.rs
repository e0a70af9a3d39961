//! Command-line interface for brainstorm
//!
//! Provides argument parsing using clap derive macros.

use crate::config::{Config, InputMode, OutputFormat};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Group framed or keyword-selected lines into debounced blocks
#[derive(Parser, Debug)]
#[command(
    name = "brainstorm",
    version,
    about = "Group keyword lines into debounced blocks"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file (default: stdin, also with "-")
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress diagnostics and the run summary
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: run summary)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// How to read input lines
    #[arg(long, value_enum, value_name = "MODE")]
    pub input_mode: Option<InputMode>,

    /// Keyword that selects a line (repeatable, replaces configured keywords)
    #[arg(short, long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Match keywords case-insensitively
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Unselected lines allowed between two blocks before they stay separate
    #[arg(short = 'p', long, value_name = "LINES")]
    pub quiet_period: Option<usize>,

    /// Do not merge nearby blocks
    #[arg(long)]
    pub no_debounce: bool,

    /// Print each block as one group instead of a token stream
    #[arg(short, long)]
    pub aggregate: bool,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Color text output (default: when stdout is a terminal)
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Never color output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with an error if any diagnostic was reported
    #[arg(long)]
    pub strict: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

impl Cli {
    /// Apply command-line overrides on top of file and environment config.
    ///
    /// `stdout_is_terminal` decides coloring when neither `--color` nor
    /// `--no-color` is given and the config leaves color off.
    pub fn apply_overrides(&self, config: &mut Config, stdout_is_terminal: bool) {
        if let Some(mode) = self.input_mode {
            config.input.mode = mode;
        }
        if !self.keywords.is_empty() {
            config.selector.keywords = self.keywords.clone();
        }
        if self.ignore_case {
            config.selector.ignore_case = true;
        }
        if let Some(quiet_period) = self.quiet_period {
            config.debouncer.quiet_period = quiet_period;
        }
        if self.no_debounce {
            config.debouncer.enabled = false;
        }
        if self.aggregate {
            config.output.aggregate = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }

        if self.no_color {
            config.output.color = false;
        } else if self.color {
            config.output.color = true;
        } else if !config.output.color {
            config.output.color = stdout_is_terminal;
        }
    }

    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.input
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }
}
