// ── Domain model ──
//
// Wire-shaped record types for the fleet backend, plus the validation
// rules the forms apply before anything leaves the process.

mod driver;
mod entity;
mod entity_id;
mod truck;
mod validation;

pub use driver::{DRIVER_AVAILABLE, Driver};
pub use entity::Entity;
pub use entity_id::EntityId;
pub use truck::{Dimensions, Truck, TruckStatus, TruckType};
pub use validation::{FieldErrors, ValidationReport};
