// ── Remote capabilities ──
//
// The controllers are written once against these traits. `FleetClient`
// implements them for real backends; tests substitute in-memory fakes.

use std::future::Future;

use fleetdesk_api::FleetClient;

use crate::error::CoreError;
use crate::model::{Driver, Entity, EntityId, Truck};

/// CRUD over one entity collection.
///
/// Every call is a single request with no retries. Results replace local
/// state wholesale; nothing is cached here.
pub trait EntityService<E: Entity>: Clone + Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<E>, CoreError>> + Send;

    /// Submit an unsaved record; the backend assigns its id.
    fn create(&self, draft: &E) -> impl Future<Output = Result<E, CoreError>> + Send;

    /// Replace the stored record with `draft` in full.
    fn update(&self, id: &EntityId, draft: &E)
    -> impl Future<Output = Result<E, CoreError>> + Send;

    fn delete(&self, id: &EntityId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// The truck/driver relation endpoint, plus the driver listing the
/// assignment flow draws candidates from.
pub trait AssignmentService: EntityService<Driver> + EntityService<Truck> {
    /// Link `driver_id` to `truck_id`. Returns the updated truck when the
    /// backend sends one back.
    fn assign_driver(
        &self,
        truck_id: &EntityId,
        driver_id: &EntityId,
    ) -> impl Future<Output = Result<Option<Truck>, CoreError>> + Send;
}

// ── FleetClient bindings ─────────────────────────────────────────────

impl<E: Entity> EntityService<E> for FleetClient {
    async fn list(&self) -> Result<Vec<E>, CoreError> {
        Ok(FleetClient::list::<E>(self).await?)
    }

    async fn create(&self, draft: &E) -> Result<E, CoreError> {
        Ok(FleetClient::create(self, draft).await?)
    }

    async fn update(&self, id: &EntityId, draft: &E) -> Result<E, CoreError> {
        FleetClient::update(self, id.as_str(), draft)
            .await
            .map_err(|e| not_found_as::<E>(e, id))
    }

    async fn delete(&self, id: &EntityId) -> Result<(), CoreError> {
        FleetClient::delete::<E>(self, id.as_str())
            .await
            .map_err(|e| not_found_as::<E>(e, id))
    }
}

impl AssignmentService for FleetClient {
    async fn assign_driver(
        &self,
        truck_id: &EntityId,
        driver_id: &EntityId,
    ) -> Result<Option<Truck>, CoreError> {
        Ok(FleetClient::assign_driver(self, truck_id.as_str(), driver_id.as_str()).await?)
    }
}

/// A 404 on an addressed record names the record, not the URL.
fn not_found_as<E: Entity>(err: fleetdesk_api::Error, id: &EntityId) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            entity_type: capitalize(E::NOUN),
            identifier: id.to_string(),
        }
    } else {
        err.into()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = not_found_as::<Truck>(
            fleetdesk_api::Error::Api {
                status: 404,
                message: "gone".into(),
            },
            &EntityId::from("t9"),
        );
        assert_eq!(err.to_string(), "Truck not found: t9");
    }

    #[test]
    fn other_statuses_pass_through() {
        let err = not_found_as::<Driver>(
            fleetdesk_api::Error::Api {
                status: 409,
                message: "conflict".into(),
            },
            &EntityId::from("d1"),
        );
        assert_eq!(err.status(), Some(409));
    }
}
