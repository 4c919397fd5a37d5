use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "GAP_FINDER_LOG";

/// How search results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Banner and one campsite name per line
    #[default]
    Text,
    /// The full search report as JSON
    Json,
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "gap-finder",
    version,
    about = "Find the campsites a reservation can be placed at without leaving forbidden gaps"
)]
pub struct Cli {
    /// JSON file holding the search, campsites, reservations and gap rules
    #[arg(value_name = "FILE", env = "GAP_FINDER_INPUT")]
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, env = "GAP_FINDER_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print debug messages while searching
    #[arg(long, env = "GAP_FINDER_DEBUG")]
    pub debug: bool,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Input document path
    pub input: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Verbosity level, 0 meaning warnings only
    pub verbosity: u8,
}

impl FinderConfig {
    /// Default log filter for the configured verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl From<Cli> for FinderConfig {
    fn from(cli: Cli) -> Self {
        // Debug mode is the same as -vv.
        let verbosity = if cli.debug {
            cli.verbose.max(2)
        } else {
            cli.verbose
        };

        Self {
            input: cli.input,
            format: cli.format,
            verbosity,
        }
    }
}
