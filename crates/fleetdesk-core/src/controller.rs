// ── Fleet facade ──
//
// Wires one backend service into the two lists, the two forms, and the
// assignment flow, so consumers hold a single handle.

use fleetdesk_api::FleetClient;
use tracing::{debug, info};

use crate::assign::Assignment;
use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::form::Form;
use crate::list::ListSync;
use crate::model::{Driver, Truck};
use crate::service::AssignmentService;

/// The main entry point for consumers.
///
/// Cheaply cloneable: every controller inside is an `Arc` handle, and the
/// forms and assignment share the lists they refresh.
#[derive(Clone)]
pub struct Fleet<S = FleetClient> {
    trucks: ListSync<Truck, S>,
    drivers: ListSync<Driver, S>,
    truck_form: Form<Truck, S>,
    driver_form: Form<Driver, S>,
    assignment: Assignment<S>,
}

impl Fleet<FleetClient> {
    /// Build an HTTP client from `config`. Nothing is fetched until
    /// [`mount()`](Self::mount).
    pub fn connect(config: &BackendConfig) -> Result<Self, CoreError> {
        let client = FleetClient::new(config.base_url.as_str(), &config.transport())?;
        info!(url = %client.base_url(), "fleet backend configured");
        Ok(Self::with_service(client))
    }
}

impl<S: AssignmentService> Fleet<S> {
    pub fn with_service(service: S) -> Self {
        let trucks = ListSync::new(service.clone());
        let drivers = ListSync::new(service);
        Self {
            truck_form: Form::new(trucks.clone()),
            driver_form: Form::new(drivers.clone()),
            assignment: Assignment::new(trucks.clone()),
            trucks,
            drivers,
        }
    }

    pub fn service(&self) -> &S {
        self.trucks.service()
    }

    pub fn trucks(&self) -> &ListSync<Truck, S> {
        &self.trucks
    }

    pub fn drivers(&self) -> &ListSync<Driver, S> {
        &self.drivers
    }

    pub fn truck_form(&self) -> &Form<Truck, S> {
        &self.truck_form
    }

    pub fn driver_form(&self) -> &Form<Driver, S> {
        &self.driver_form
    }

    pub fn assignment(&self) -> &Assignment<S> {
        &self.assignment
    }

    /// Initial load of both lists, concurrently. Each list publishes its
    /// own outcome; the first failure (trucks before drivers) is returned.
    pub async fn mount(&self) -> Result<(), CoreError> {
        debug!("mounting fleet views");
        let (trucks, drivers) = tokio::join!(self.trucks.refresh(), self.drivers.refresh());
        trucks.and(drivers)
    }
}
