use std::fmt;

use fleetdesk_api::Resource;

use super::entity_id::EntityId;
use super::validation::ValidationReport;

/// A record type managed through the list/form pattern.
///
/// Each entity supplies exactly one empty-record constructor, one
/// normalization pass (run before every submission), and its rule set.
/// The generic controllers never inline per-entity defaults.
pub trait Entity: Resource + Clone + PartialEq + fmt::Debug + 'static {
    /// Singular, lowercase: `"truck"`.
    const NOUN: &'static str;
    /// Plural, lowercase: `"trucks"`.
    const PLURAL: &'static str;

    /// The blank draft used when creating.
    fn empty() -> Self;

    /// Backend identifier; unsaved records carry an empty one.
    fn id(&self) -> &EntityId;

    /// Canonical form sent to the backend: trimmed text, blank optional
    /// fields collapsed to `None`, defaults filled in.
    fn normalize(self) -> Self;

    /// Run every field rule. Never short-circuits.
    fn validate(&self) -> ValidationReport;
}

/// Trim a required text field in place.
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_owned();
    }
}

/// Trim an optional text field; blank becomes `None`.
pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
