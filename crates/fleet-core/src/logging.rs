use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", release_id = id);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

const LOG_ENV_VAR: &str = "FLEET_LOG";

/// Install the stderr subscriber for the CLI.
///
/// `RUST_LOG`, then `FLEET_LOG`, take precedence over the flags. Without
/// either, `--log-level` wins over `--verbose`, and the quiet default only
/// lets warnings through.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .or_else(|_| EnvFilter::try_new(flag_directive(verbose, log_level)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);

    if log_json {
        registry
            .with(
                layer
                    .json()
                    .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(layer.compact().with_target(false))
            .try_init()?;
    }

    Ok(())
}

/// Filter directive from the command-line flags. A bare level applies to
/// fleet's own crates; anything containing `=` is used as given.
fn flag_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (log_level, verbose) {
        (Some(directive), _) if directive.contains('=') => directive.to_string(),
        (Some(level), _) => format!("fleet={}", level),
        (None, true) => "fleet=debug".to_string(),
        (None, false) => "fleet=warn".to_string(),
    }
}
