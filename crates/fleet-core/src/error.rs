//! Error types and exit codes for fleet
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (remote, transport, authentication)
//! - 2: Usage error (bad flags/args, missing resource selector)
//! - 3: Data error (resource or release not found, ambiguous reference)

mod macros;

use thiserror::Error;

/// Message shown when `tag set` is invoked without a target resource.
pub const MISSING_RESOURCE_MESSAGE: &str = "\
To set a resource tag, you must provide exactly one of:

  * An application, with --application <appname>
  * A device, with --device <uuid>
  * A release, with --release <id or commit>

See the help page for examples:

  $ fleet help tag set";

/// Exit codes for the fleet binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing or ambiguous resource (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during fleet operations
#[derive(Error, Debug)]
pub enum FleetError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("{}", MISSING_RESOURCE_MESSAGE)]
    MissingResourceSelector,

    #[error("only one of --application, --device or --release may be given (got {})", .given.join(", "))]
    MultipleResourceSelectors { given: Vec<String> },

    // Data errors (exit code 3)
    #[error("release not found: {reference}")]
    ReleaseNotFound { reference: String },

    #[error(
        "release reference '{reference}' is ambiguous, it matches: {}",
        .candidates.join(", ")
    )]
    AmbiguousRelease {
        reference: String,
        candidates: Vec<String>,
    },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} '{value}' is ambiguous ({matches} matches)")]
    Ambiguous {
        context: String,
        value: String,
        matches: usize,
    },

    // Generic failures (exit code 1)
    #[error("not logged in: set FLEET_API_TOKEN or add `token` to {config_path}")]
    NotLoggedIn { config_path: String },

    #[error("request failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("{0}")]
    Other(String),
}

impl FleetError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        FleetError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a remote resource that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        FleetError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a reference matching more than one remote resource
    pub fn ambiguous(context: &str, value: impl std::fmt::Display, matches: usize) -> Self {
        FleetError::Ambiguous {
            context: context.to_string(),
            value: value.to_string(),
            matches,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FleetError::UnknownFormat(_)
            | FleetError::UsageError(_)
            | FleetError::MissingResourceSelector
            | FleetError::MultipleResourceSelectors { .. }
            | FleetError::InvalidValue { .. } => ExitCode::Usage,

            FleetError::ReleaseNotFound { .. }
            | FleetError::AmbiguousRelease { .. }
            | FleetError::NotFound { .. }
            | FleetError::Ambiguous { .. } => ExitCode::Data,

            FleetError::NotLoggedIn { .. }
            | FleetError::Remote { .. }
            | FleetError::Http(_)
            | FleetError::Io(_)
            | FleetError::Json(_)
            | FleetError::Toml(_)
            | FleetError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            FleetError::UnknownFormat(_) => "unknown_format",
            FleetError::UsageError(_) => "usage_error",
            FleetError::MissingResourceSelector => "missing_resource_selector",
            FleetError::MultipleResourceSelectors { .. } => "multiple_resource_selectors",
            FleetError::ReleaseNotFound { .. } => "release_not_found",
            FleetError::AmbiguousRelease { .. } => "ambiguous_release",
            FleetError::NotFound { .. } => "not_found",
            FleetError::Ambiguous { .. } => "ambiguous",
            FleetError::NotLoggedIn { .. } => "not_logged_in",
            FleetError::Remote { .. } => "remote_error",
            FleetError::Http(_) => "http_error",
            FleetError::Io(_) => "io_error",
            FleetError::Json(_) => "json_error",
            FleetError::Toml(_) => "toml_error",
            FleetError::InvalidValue { .. } => "invalid_value",
            FleetError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            FleetError::Remote { status, .. } => {
                error_obj["status"] = serde_json::json!(status);
            }
            FleetError::AmbiguousRelease { candidates, .. } => {
                error_obj["candidates"] = serde_json::json!(candidates);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;
