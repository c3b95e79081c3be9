//! Entity model and reactive controllers between `fleetdesk-api` and the
//! presentation shell.
//!
//! - **[`Fleet`]**: facade that wires one backend into every controller.
//!   [`Fleet::connect()`] builds the HTTP client; [`Fleet::mount()`] loads
//!   both lists.
//!
//! - **[`ListSync<E, S>`]**: keeps a local list in step with the backend.
//!   State is `Loading → Ready | Error`, published through a `watch`
//!   channel. Overlapping refreshes are sequence-stamped so only the newest
//!   one publishes.
//!
//! - **[`Form<E, S>`]**: draft editing with local validation. Valid drafts
//!   are saved (create or full update) and the owning list refetches.
//!
//! - **[`Assignment<S>`]**: picks an available driver for a truck and calls
//!   the relation endpoint.
//!
//! - **Domain model** ([`model`]): [`Truck`] and [`Driver`] with their
//!   [`Entity`] capabilities (empty record, normalization, validation).
//!
//! Controllers are generic over [`EntityService`] / [`AssignmentService`],
//! implemented for [`fleetdesk_api::FleetClient`].

pub mod assign;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod list;
pub mod model;
pub mod service;
pub mod stream;

#[cfg(test)]
mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use assign::{AssignOutcome, Assignment, AssignmentState, AssignmentStatus};
pub use config::{BackendConfig, TlsVerification};
pub use fleetdesk_api::DEFAULT_BASE_URL;
pub use controller::Fleet;
pub use error::{CoreError, FormError};
pub use form::{Form, FormMode, FormState, FormStatus};
pub use list::{ListState, ListSync};
pub use service::{AssignmentService, EntityService};
pub use stream::{ListSubscription, ListWatchStream};

pub use model::{
    DRIVER_AVAILABLE, Dimensions, Driver, Entity, EntityId, FieldErrors, Truck, TruckStatus,
    TruckType, ValidationReport,
};
