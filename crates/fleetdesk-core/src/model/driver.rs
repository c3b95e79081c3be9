// ── Driver domain type ──

use serde::{Deserialize, Serialize};

use fleetdesk_api::Resource;

use super::entity::{Entity, trim_in_place, trim_optional};
use super::entity_id::{EntityId, deserialize_reference, normalize_reference};
use super::validation::{Rules, ValidationReport};

/// Status a driver must have to appear as an assignment candidate.
/// Also the status a new driver gets when none is given.
pub const DRIVER_AVAILABLE: &str = "Available";

/// A driver as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(default, skip_serializing_if = "EntityId::is_unsaved")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_truck_id: Option<EntityId>,
    #[serde(default)]
    pub status: String,
}

impl Driver {
    /// Exact, case-sensitive match on `"Available"`.
    pub fn is_available(&self) -> bool {
        self.status == DRIVER_AVAILABLE
    }
}

impl Resource for Driver {
    const COLLECTION: &'static str = "drivers";
}

impl Entity for Driver {
    const NOUN: &'static str = "driver";
    const PLURAL: &'static str = "drivers";

    fn empty() -> Self {
        Self {
            status: DRIVER_AVAILABLE.to_owned(),
            ..Self::default()
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.license_number);
        trim_in_place(&mut self.status);
        if self.status.is_empty() {
            DRIVER_AVAILABLE.clone_into(&mut self.status);
        }
        self.phone_number = trim_optional(self.phone_number);
        self.date_of_birth = trim_optional(self.date_of_birth);
        self.assigned_truck_id = normalize_reference(self.assigned_truck_id);
        self
    }

    fn validate(&self) -> ValidationReport {
        Rules::new()
            .required("name", &self.name, "Name is required.")
            .required(
                "licenseNumber",
                &self.license_number,
                "License number is required.",
            )
            .finish()
    }
}
