//! CLI argument parsing for fleet
//!
//! Uses clap for argument parsing.
//! Supports global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod output;
pub mod tags;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;
pub use tags::{TagSetArgs, TagsCommands, TargetArgs};

/// Fleet - manage applications, devices and releases from the command line
#[derive(Parser, Debug)]
#[command(name = "fleet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human or json
    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        value_parser = output::parse_format,
        default_value = "human"
    )]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging and phase timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tags on applications, devices and releases
    Tag {
        #[command(subcommand)]
        command: TagsCommands,
    },
}
