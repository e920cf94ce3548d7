//! `fleet tag set` command

use std::time::Instant;

use fleet_core::api::HttpClient;
use fleet_core::config::FleetConfig;
use fleet_core::error::Result;
use fleet_core::resource::ResourceSelector;
use fleet_core::tag::{set_tag, Tag, TagAssignment};
use tracing::warn;

use crate::cli::{Cli, OutputFormat, TagSetArgs, TargetArgs};
use crate::commands::dispatch::trace_command;

/// Execute the tag set command
pub async fn execute(cli: &Cli, args: &TagSetArgs, start: Instant) -> Result<()> {
    // Argument problems are reported before config or credentials are read.
    let (selector, tag) = prepare(args)?;

    let config = FleetConfig::load()?;
    let api = HttpClient::from_config(&config)?;
    trace_command!(cli, start, "load_config");

    let assignment = set_tag(&api, &selector, &tag).await?;
    trace_command!(cli, start, "tag_set");

    output(cli, &assignment)
}

/// Validate the parsed arguments into a tag target and a tag.
fn prepare(args: &TagSetArgs) -> Result<(ResourceSelector, Tag)> {
    let selector = selector_from_args(&args.target)?;
    let tag = Tag::new(args.tag_key.as_str(), args.value.clone())?;
    Ok((selector, tag))
}

fn selector_from_args(target: &TargetArgs) -> Result<ResourceSelector> {
    if target.app.is_some() && target.application.is_none() {
        warn!("--app is deprecated, use --application instead");
    }

    ResourceSelector::from_options(
        target.application.as_deref(),
        target.app.as_deref(),
        target.device.as_deref(),
        target.release.as_deref(),
    )
}

fn output(cli: &Cli, assignment: &TagAssignment) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(assignment)?);
        }
        OutputFormat::Human => {}
    }
    Ok(())
}
