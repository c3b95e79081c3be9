//! CLI configuration: thin wrapper around `fleetdesk_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use fleetdesk_core::{BackendConfig, DEFAULT_BASE_URL, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use fleetdesk_config::{
    Config, Profile, config_path, load_config, load_config_or_default,
    profile_to_backend_config, save_config, store_token,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the backend connection from config file, profile, and flags.
///
/// Flags win over the profile. With no profile on disk the CLI still runs
/// against `--api-url` or the local default backend, unless a profile was
/// asked for by name.
pub fn resolve_backend(global: &GlobalOpts, cfg: &Config) -> Result<BackendConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let base = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile_to_backend_config(profile, &profile_name)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let mut base = BackendConfig::from_url(DEFAULT_BASE_URL)?;
            base.timeout = Duration::from_secs(cfg.defaults.timeout);
            if cfg.defaults.insecure {
                base.tls = TlsVerification::DangerAcceptInvalid;
            }
            base
        }
    };

    apply_overrides(base, global)
}

fn apply_overrides(
    mut backend: BackendConfig,
    global: &GlobalOpts,
) -> Result<BackendConfig, CliError> {
    if let Some(ref raw) = global.api_url {
        backend.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if let Some(ref token) = global.token {
        backend.token = Some(SecretString::from(token.clone()));
    }
    if global.insecure {
        backend.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        backend.timeout = Duration::from_secs(secs);
    }
    Ok(backend)
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
