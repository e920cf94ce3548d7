//! Macros for command timing and logging

/// Trace command execution with optional verbose output
///
/// Usage:
/// ```ignore
/// trace_command!(cli, start, "load_config");
/// ```
macro_rules! trace_command {
    ($cli:expr, $start:expr, $label:expr) => {
        if $cli.verbose {
            ::tracing::debug!(elapsed = ?$start.elapsed(), $label);
        }
    };
}

pub(crate) use trace_command;
