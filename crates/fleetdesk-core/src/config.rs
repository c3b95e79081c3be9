// ── Runtime connection configuration ──
//
// Describes *how* to reach the fleet backend. Carries the credential and
// transport tuning, but never touches disk: the CLI builds a
// `BackendConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use fleetdesk_api::{DEFAULT_BASE_URL, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging backends).
    DangerAcceptInvalid,
}

/// Configuration for one fleet backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the API prefix (e.g. `http://localhost:8080/api`).
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional bearer token. The backend may be open.
    pub token: Option<SecretString>,
}

impl BackendConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }

    /// The local development backend at `DEFAULT_BASE_URL`.
    pub fn local() -> Result<Self, CoreError> {
        Self::from_url(DEFAULT_BASE_URL)
    }

    /// Parse `raw` as the base URL.
    pub fn from_url(raw: &str) -> Result<Self, CoreError> {
        let url = Url::parse(raw).map_err(|e| CoreError::Config {
            message: format!("Invalid API URL '{raw}': {e}"),
        })?;
        Ok(Self::new(url))
    }

    /// Transport settings for `fleetdesk_api::FleetClient`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        let transport = TransportConfig {
            tls,
            timeout: self.timeout,
            ..TransportConfig::default()
        };
        match &self.token {
            Some(token) => transport.with_bearer_token(token.clone()),
            None => transport,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = BackendConfig::local().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }

    #[test]
    fn invalid_url_is_config_error() {
        let err = BackendConfig::from_url("not a url").unwrap_err();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn insecure_maps_to_accept_invalid() {
        let mut config = BackendConfig::local().unwrap();
        config.tls = TlsVerification::DangerAcceptInvalid;
        config.timeout = Duration::from_secs(5);

        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
