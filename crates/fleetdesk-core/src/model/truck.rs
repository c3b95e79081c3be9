// ── Truck domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use fleetdesk_api::Resource;

use super::entity::{Entity, trim_in_place, trim_optional};
use super::entity_id::{EntityId, deserialize_reference, normalize_reference};
use super::validation::{Rules, ValidationReport};

/// Closed vocabulary for `Truck::status`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
pub enum TruckStatus {
    #[strum(to_string = "Available")]
    #[serde(rename = "Available")]
    Available,
    #[strum(to_string = "In Use")]
    #[serde(rename = "In Use")]
    InUse,
    #[strum(to_string = "Maintenance")]
    #[serde(rename = "Maintenance")]
    Maintenance,
    #[strum(to_string = "Out of Service")]
    #[serde(rename = "Out of Service")]
    OutOfService,
}

/// Closed vocabulary for `Truck::truck_type`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
pub enum TruckType {
    Flatbed,
    Box,
    Refrigerated,
    Tanker,
    Dump,
    Tractor,
}

/// Cargo-space dimensions. Every axis is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Dimensions {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// A truck as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    /// Empty until the backend assigns one; omitted from request bodies then.
    #[serde(default, skip_serializing_if = "EntityId::is_unsaved")]
    pub id: EntityId,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub color: String,
    #[serde(
        default,
        deserialize_with = "deserialize_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub driver_id: Option<EntityId>,
    #[serde(default)]
    pub max_load_capacity: f64,
    #[serde(default)]
    pub current_load: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_fuel_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance_date: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odometer_reading: Option<f64>,
    #[serde(default)]
    pub location: String,
}

impl Truck {
    /// Parsed status, if it belongs to the known vocabulary.
    pub fn status_kind(&self) -> Option<TruckStatus> {
        self.status.trim().parse().ok()
    }

    /// Parsed truck type, if present and known.
    pub fn truck_type_kind(&self) -> Option<TruckType> {
        self.truck_type.as_deref()?.trim().parse().ok()
    }

    pub fn is_assigned(&self) -> bool {
        self.driver_id.is_some()
    }
}

impl Resource for Truck {
    const COLLECTION: &'static str = "trucks";
}

impl Entity for Truck {
    const NOUN: &'static str = "truck";
    const PLURAL: &'static str = "trucks";

    fn empty() -> Self {
        Self::default()
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(mut self) -> Self {
        trim_in_place(&mut self.license_plate);
        trim_in_place(&mut self.color);
        trim_in_place(&mut self.status);
        trim_in_place(&mut self.location);
        self.driver_id = normalize_reference(self.driver_id);
        self.truck_type = trim_optional(self.truck_type);
        self.fuel_type = trim_optional(self.fuel_type);
        self.registration_date = trim_optional(self.registration_date);
        self.next_maintenance_date = trim_optional(self.next_maintenance_date);
        self.dimensions = self.dimensions.filter(|d| !d.is_empty());
        self
    }

    fn validate(&self) -> ValidationReport {
        Rules::new()
            .required(
                "licensePlate",
                &self.license_plate,
                "License plate is required.",
            )
            .required("color", &self.color, "Color is required.")
            .positive(
                "maxLoadCapacity",
                self.max_load_capacity,
                "Max load capacity must be greater than 0.",
            )
            .required("status", &self.status, "Status is required.")
            .one_of(
                "status",
                Some(&self.status),
                TruckStatus::VARIANTS,
                "Status",
            )
            .one_of(
                "truckType",
                self.truck_type.as_deref(),
                TruckType::VARIANTS,
                "Truck type",
            )
            .required("location", &self.location, "Location is required.")
            .finish()
    }
}
