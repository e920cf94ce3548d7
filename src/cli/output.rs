pub use fleet_core::format::OutputFormat;

/// Parse `--format` through the core `FromStr`, keeping its error text
pub(crate) fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value
        .parse()
        .map_err(|e: fleet_core::error::FleetError| e.to_string())
}
