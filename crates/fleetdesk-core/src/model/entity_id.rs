// ── Core identity type ──
//
// Identifiers are opaque strings assigned by the backend. The empty
// string marks a record that has never been saved.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ── EntityId ────────────────────────────────────────────────────────

/// Backend-assigned identifier for a truck or driver.
///
/// Empty means "unsaved": create flows carry an empty id, update flows a
/// non-empty one. No format is assumed beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The id of a record that has not reached the backend yet.
    pub fn unsaved() -> Self {
        Self(String::new())
    }

    pub fn is_unsaved(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Serde helpers ───────────────────────────────────────────────────

/// Reference fields (`driverId`, `assignedTruckId`) arrive as `null`,
/// missing, or `""` when unassigned. All three become `None`.
pub(crate) fn deserialize_reference<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(EntityId::from).filter(|id| !id.is_unsaved()))
}

/// Collapse a blank reference to `None`.
pub(crate) fn normalize_reference(id: Option<EntityId>) -> Option<EntityId> {
    id.map(|id| EntityId::new(id.as_str().trim()))
        .filter(|id| !id.is_unsaved())
}
