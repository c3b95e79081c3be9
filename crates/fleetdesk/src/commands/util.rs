//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde::de::DeserializeOwned;

use fleetdesk_core::{CoreError, Entity, EntityService, Form, FormError, FormStatus, ListSync};

use crate::error::CliError;

/// Fetch the list and return its records, or the list's published error.
pub async fn fetch_all<E, S>(list: &ListSync<E, S>) -> Result<Vec<E>, CliError>
where
    E: Entity,
    S: EntityService<E>,
{
    match list.refresh().await {
        Ok(()) => Ok(list.state().items().map(<[E]>::to_vec).unwrap_or_default()),
        Err(err) => {
            let message = list
                .state()
                .error()
                .map_or_else(|| format!("Failed to fetch {}", E::PLURAL), str::to_owned);
            Err(CliError::operation(message, err))
        }
    }
}

/// Resolve an id against the freshly fetched list.
///
/// The backend exposes no single-record read, so lookups go through the
/// collection.
pub async fn find_by_id<E, S>(list: &ListSync<E, S>, id: &str) -> Result<E, CliError>
where
    E: Entity,
    S: EntityService<E>,
{
    fetch_all(list)
        .await?
        .into_iter()
        .find(|record| record.id().as_str() == id)
        .ok_or_else(|| {
            CliError::from(CoreError::NotFound {
                entity_type: E::NOUN.into(),
                identifier: id.into(),
            })
        })
}

/// Submit the open form, mapping validation failures to a usage error and
/// remote failures to the message the form published.
pub async fn submit<E, S>(form: &Form<E, S>) -> Result<E, CliError>
where
    E: Entity,
    S: EntityService<E>,
{
    form.submit().await.map_err(|err| match err {
        FormError::Invalid(errors) => CliError::invalid_draft(E::NOUN, &errors),
        err @ FormError::NotOpen(_) => CoreError::Internal(err.to_string()).into(),
        FormError::Remote(cause) => {
            let message = match form.state().status {
                FormStatus::Failed(message) => message,
                _ => format!("Failed to save {}.", E::NOUN),
            };
            CliError::operation(message, cause)
        }
    })
}

/// Delete through the list, reporting the list's published error.
pub async fn delete<E, S>(list: &ListSync<E, S>, id: &str) -> Result<(), CliError>
where
    E: Entity,
    S: EntityService<E>,
{
    list.delete(&id.into()).await.map_err(|err| {
        let message = list
            .state()
            .error()
            .map_or_else(|| format!("Failed to delete {}.", E::NOUN), str::to_owned);
        CliError::operation(message, err)
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON record for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use fleetdesk_core::Driver;

    use super::*;

    #[test]
    fn reads_record_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "Jane Roe", "licenseNumber": "L-1"}}"#).unwrap();

        let driver: Driver = read_json_file(file.path()).unwrap();

        assert_eq!(driver.name, "Jane Roe");
        assert_eq!(driver.license_number, "L-1");
    }

    #[test]
    fn malformed_json_is_usage_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = read_json_file::<Driver>(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("Delete?", "delete", true).unwrap());
    }
}
