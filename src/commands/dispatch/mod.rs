//! Command dispatch logic for fleet

use std::time::Instant;

use clap::CommandFactory;
use fleet_core::error::Result;

use crate::cli::{Cli, Commands, TagsCommands};

mod macros;

pub(crate) use macros::trace_command;

pub async fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
        Some(Commands::Tag { command }) => match command {
            TagsCommands::Set(args) => crate::commands::tag::set::execute(cli, args, start).await,
        },
    }
}
