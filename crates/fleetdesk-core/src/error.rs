// ── Core error types ──
//
// User-facing errors from fleetdesk-core. Consumers match on these, not
// on HTTP status codes or JSON failures; the `From<fleetdesk_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::FieldErrors;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach fleet backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to fleet backend timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when the backend answered.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fleetdesk_api::Error> for CoreError {
    fn from(err: fleetdesk_api::Error) -> Self {
        match err {
            fleetdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fleetdesk_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            fleetdesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            fleetdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fleetdesk_api::Error::InvalidToken(msg) => CoreError::Config {
                message: format!("Invalid bearer token: {msg}"),
            },
            fleetdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            fleetdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

/// Why a form submission did not go through.
#[derive(Debug, Error)]
pub enum FormError {
    /// Local validation failed; nothing was sent.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    /// No form session is open, so there is no draft to save.
    #[error("no {0} form is open")]
    NotOpen(&'static str),

    /// The backend call failed; the draft is kept for a retry.
    #[error(transparent)]
    Remote(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_becomes_not_found() {
        let err: CoreError = fleetdesk_api::Error::Api {
            status: 404,
            message: "no such truck".into(),
        }
        .into();

        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn server_error_keeps_status_and_message() {
        let err: CoreError = fleetdesk_api::Error::Api {
            status: 503,
            message: "down".into(),
        }
        .into();

        match err {
            CoreError::Api { message, status } => {
                assert_eq!(message, "down");
                assert_eq!(status, Some(503));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn bad_body_is_internal() {
        let err: CoreError = fleetdesk_api::Error::Deserialization {
            message: "expected `[`".into(),
            body: "{}".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn invalid_form_counts_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required.".into());
        assert_eq!(
            FormError::Invalid(errors).to_string(),
            "1 field(s) failed validation"
        );
    }

    #[test]
    fn not_open_names_the_entity() {
        assert_eq!(FormError::NotOpen("truck").to_string(), "no truck form is open");
    }
}
