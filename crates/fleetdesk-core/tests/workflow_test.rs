#![allow(clippy::unwrap_used)]
// End-to-end controller workflows against a mocked fleet backend.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdesk_core::{
    AssignOutcome, BackendConfig, EntityId, Fleet, FormError, FormStatus, ListState,
};

async fn setup() -> (MockServer, Fleet) {
    let server = MockServer::start().await;
    let config = BackendConfig::from_url(&format!("{}/api", server.uri())).unwrap();
    let fleet = Fleet::connect(&config).unwrap();
    (server, fleet)
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_truck_posts_once_then_refetches() {
    let (server, fleet) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks"))
        .and(body_json(json!({
            "licensePlate": "ABC-123",
            "color": "Red",
            "maxLoadCapacity": 5000.0,
            "currentLoad": 0.0,
            "status": "Available",
            "location": "Depot A"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "t1",
            "licensePlate": "ABC-123",
            "color": "Red",
            "maxLoadCapacity": 5000,
            "status": "Available",
            "location": "Depot A"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "t1",
            "licensePlate": "ABC-123",
            "color": "Red",
            "maxLoadCapacity": 5000,
            "status": "Available",
            "location": "Depot A"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let form = fleet.truck_form();
    form.open_create();
    form.edit(|t| {
        t.license_plate = "ABC-123".into();
        t.color = "Red".into();
        t.max_load_capacity = 5000.0;
        t.status = "Available".into();
        t.location = "Depot A".into();
    });
    let created = form.submit().await.unwrap();

    assert_eq!(created.id.as_str(), "t1");
    let ListState::Ready(trucks) = fleet.trucks().state() else {
        panic!("truck list should be ready");
    };
    assert_eq!(trucks.len(), 1);
    assert_eq!(trucks[0].license_plate, "ABC-123");
}

#[tokio::test]
async fn invalid_truck_sends_nothing() {
    let (server, fleet) = setup().await;

    let form = fleet.truck_form();
    form.open_create();
    form.edit(|t| t.license_plate = "ABC-123".into());

    let err = form.submit().await.unwrap_err();

    let FormError::Invalid(errors) = err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(
        errors.keys().copied().collect::<Vec<_>>(),
        vec!["color", "location", "maxLoadCapacity", "status"]
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn editing_a_driver_puts_the_full_record() {
    let (server, fleet) = setup().await;
    let stored = json!({
        "id": "d1",
        "name": "Dana",
        "licenseNumber": "L-OLD",
        "phoneNumber": "555-0100",
        "status": "Available"
    });

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/drivers/d1"))
        .and(body_json(json!({
            "id": "d1",
            "name": "Dana",
            "licenseNumber": "L-NEW",
            "phoneNumber": "555-0100",
            "status": "Available"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1",
            "name": "Dana",
            "licenseNumber": "L-NEW",
            "phoneNumber": "555-0100",
            "status": "Available"
        })))
        .expect(1)
        .mount(&server)
        .await;

    fleet.drivers().refresh().await.unwrap();
    let record = fleet.drivers().state().items().unwrap()[0].clone();

    let form = fleet.driver_form();
    form.open_edit(&record);
    form.edit(|d| d.license_number = "L-NEW".into());
    let updated = form.submit().await.unwrap();

    assert_eq!(updated.license_number, "L-NEW");
    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 0, "edit must never create");
}

#[tokio::test]
async fn server_error_on_save_keeps_the_draft() {
    let (server, fleet) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/trucks/t1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500,
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;

    let form = fleet.truck_form();
    form.open_edit(&fleetdesk_core::Truck {
        id: "t1".into(),
        license_plate: "ABC-123".into(),
        color: "Red".into(),
        max_load_capacity: 5000.0,
        status: "In Use".into(),
        location: "Depot A".into(),
        ..Default::default()
    });

    assert!(matches!(form.submit().await, Err(FormError::Remote(_))));

    let state = form.state();
    assert_eq!(state.status, FormStatus::Failed("Failed to save truck.".into()));
    assert_eq!(state.draft.status, "In Use");
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_delete_reports_error_and_skips_refresh() {
    let (server, fleet) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/trucks/t1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = fleet.trucks().delete(&EntityId::from("t1")).await;

    assert!(result.is_err());
    assert_eq!(fleet.trucks().state().error(), Some("Failed to delete truck."));
}

#[tokio::test]
async fn delete_then_refetch() {
    let (server, fleet) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/drivers/d1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    fleet.drivers().delete(&EntityId::from("d1")).await.unwrap();

    assert_eq!(fleet.drivers().state().items().unwrap().len(), 0);
}

// ── Assignment ──────────────────────────────────────────────────────

#[tokio::test]
async fn assignment_offers_available_drivers_and_refreshes_trucks() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "d1", "name": "Dana", "licenseNumber": "L-1", "status": "Available" },
            { "id": "d2", "name": "Lee", "licenseNumber": "L-2", "status": "Maintenance" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/trucks/t1/assign-driver/d1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "t1", "licensePlate": "ABC-123", "driverId": "d1", "status": "Available" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let assignment = fleet.assignment();
    let candidates = assignment.open(&EntityId::from("t1")).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Dana");

    let outcome = assignment
        .assign(&EntityId::from("t1"), &candidates[0].id)
        .await
        .unwrap();

    assert_eq!(outcome, AssignOutcome::Assigned(None));
    let ListState::Ready(trucks) = fleet.trucks().state() else {
        panic!("truck list should be ready");
    };
    assert_eq!(trucks[0].driver_id, Some(EntityId::from("d1")));
}

#[tokio::test]
async fn assigning_nobody_sends_nothing() {
    let (server, fleet) = setup().await;

    let outcome = fleet
        .assignment()
        .assign(&EntityId::from("t1"), &EntityId::unsaved())
        .await
        .unwrap();

    assert_eq!(outcome, AssignOutcome::NothingSelected);
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Connection ──────────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_backend_shows_fetch_error() {
    let config = BackendConfig::from_url("http://127.0.0.1:1/api").unwrap();
    let fleet = Fleet::connect(&config).unwrap();

    let err = fleet.trucks().refresh().await.unwrap_err();

    assert!(matches!(err, fleetdesk_core::CoreError::ConnectionFailed { .. }));
    assert_eq!(fleet.trucks().state().error(), Some("Failed to fetch trucks"));
}
