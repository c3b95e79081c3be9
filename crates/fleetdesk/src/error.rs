//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and form validation failures into user-facing errors with actionable
//! help text and a stable process exit code.

use miette::Diagnostic;
use thiserror::Error;

use fleetdesk_config::ConfigError;
use fleetdesk_core::{CoreError, FieldErrors};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to fleet backend at {url}")]
    #[diagnostic(
        code(fleetdesk::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Point at another backend with --api-url or `fleetdesk config init`."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to fleet backend timed out")]
    #[diagnostic(
        code(fleetdesk::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Backend rejected the request ({status}): {message}")]
    #[diagnostic(
        code(fleetdesk::auth_failed),
        help(
            "Verify the bearer token for this profile.\n\
             Store one with: fleetdesk config set-token"
        )
    )]
    AuthFailed { status: u16, message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fleetdesk::not_found),
        help("Run: fleetdesk {list_command} to see existing {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(fleetdesk::api_error))]
    ApiError { code: String, message: String },

    /// A controller operation failed; `message` is what the list or form
    /// reported, `source` the underlying cause.
    #[error("{message}")]
    #[diagnostic(code(fleetdesk::operation_failed))]
    OperationFailed {
        message: String,
        exit: i32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fleetdesk::validation))]
    Validation { field: String, reason: String },

    #[error("{entity} has {count} invalid field(s); nothing was sent")]
    #[diagnostic(code(fleetdesk::invalid_draft), help("{details}"))]
    InvalidDraft {
        entity: String,
        count: usize,
        details: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(fleetdesk::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: fleetdesk config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(fleetdesk::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(fleetdesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(fleetdesk::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(fleetdesk::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { status: 403, .. } => exit_code::PERMISSION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::OperationFailed { exit, .. } => *exit,
            Self::Validation { .. }
            | Self::InvalidDraft { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Wrap a core failure under the message the controller published,
    /// keeping the exit code of the underlying cause.
    pub fn operation(message: impl Into<String>, err: CoreError) -> Self {
        let cause = Self::from(err);
        Self::OperationFailed {
            message: message.into(),
            exit: cause.exit_code(),
            source: Box::new(cause),
        }
    }

    /// Local validation failure for `entity` (e.g. `"truck"`).
    pub fn invalid_draft(entity: &str, errors: &FieldErrors) -> Self {
        let details = errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self::InvalidDraft {
            entity: capitalize(entity),
            count: errors.len(),
            details,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let resource_type = entity_type.to_lowercase();
                CliError::NotFound {
                    list_command: format!("{resource_type}s list"),
                    resource_type,
                    identifier,
                }
            }

            CoreError::Api {
                message,
                status: Some(status @ (401 | 403)),
            } => CliError::AuthFailed { status, message },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}
