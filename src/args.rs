//! Command-line argument definition and processing.

use clap::Parser;

/// Turmalin - a terminal front-end for a school-management REST backend
#[derive(Parser, Debug)]
#[command(name = "turmalin")]
#[command(version)]
#[command(about = "A fast, friendly TUI for managing school classes and students", long_about = None)]
pub struct Args {
    /// Base URL of the REST backend (overrides config and environment)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Log in as USER from the command line and exit without starting the TUI
    #[arg(long, value_name = "USER")]
    pub login: Option<String>,
}
