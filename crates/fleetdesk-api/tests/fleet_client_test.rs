#![allow(clippy::unwrap_used)]
// Integration tests for `FleetClient` using wiremock.

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdesk_api::{Error, FleetClient, Resource, TransportConfig};

// ── Fixtures ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Truck {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    license_plate: String,
    color: String,
}

impl Resource for Truck {
    const COLLECTION: &'static str = "trucks";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Driver {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    name: String,
}

impl Resource for Driver {
    const COLLECTION: &'static str = "drivers";
}

async fn setup() -> (MockServer, FleetClient) {
    let server = MockServer::start().await;
    let client =
        FleetClient::from_reqwest(&format!("{}/api", server.uri()), reqwest::Client::new())
            .unwrap();
    (server, client)
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_trucks() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "t1", "licensePlate": "ABC-123", "color": "Red" },
            { "id": "t2", "licensePlate": "XYZ-987", "color": "Blue" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let trucks: Vec<Truck> = client.list().await.unwrap();

    assert_eq!(trucks.len(), 2);
    assert_eq!(trucks[0].id, "t1");
    assert_eq!(trucks[1].license_plate, "XYZ-987");
}

#[tokio::test]
async fn test_list_uses_collection_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let drivers: Vec<Driver> = client.list().await.unwrap();
    assert!(drivers.is_empty());
}

// ── Create / update / delete ────────────────────────────────────────

#[tokio::test]
async fn test_create_posts_record_without_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks"))
        .and(body_json(json!({ "licensePlate": "ABC-123", "color": "Red" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "t1", "licensePlate": "ABC-123", "color": "Red"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = Truck {
        id: String::new(),
        license_plate: "ABC-123".into(),
        color: "Red".into(),
    };
    let created = client.create(&draft).await.unwrap();

    assert_eq!(created.id, "t1");
}

#[tokio::test]
async fn test_update_puts_full_record() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/drivers/d1"))
        .and(body_json(json!({ "id": "d1", "name": "Dana" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "d1", "name": "Dana" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let driver = Driver {
        id: "d1".into(),
        name: "Dana".into(),
    };
    let updated = client.update("d1", &driver).await.unwrap();

    assert_eq!(updated, driver);
}

#[tokio::test]
async fn test_delete() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/trucks/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete::<Truck>("t1").await.unwrap();
}

// ── Assignment ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_assign_driver_empty_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks/t1/assign-driver/d7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let result: Option<Truck> = client.assign_driver("t1", "d7").await.unwrap();
    assert!(result.is_none());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty(), "assign must not send a body");
}

#[tokio::test]
async fn test_assign_driver_returns_updated_truck() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks/t1/assign-driver/d7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "licensePlate": "ABC-123", "color": "Red"
        })))
        .mount(&server)
        .await;

    let result: Option<Truck> = client.assign_driver("t1", "d7").await.unwrap();
    assert_eq!(result.unwrap().id, "t1");
}

// ── Transport settings ──────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_bearer_token("tok-123".to_string().into());
    let client = FleetClient::new(&format!("{}/api", server.uri()), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let trucks: Vec<Truck> = client.list().await.unwrap();
    assert!(trucks.is_empty());
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500,
            "error": "Internal Server Error",
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;

    let result = client.list::<Truck>().await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_with_plain_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/drivers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such driver"))
        .mount(&server)
        .await;

    let err = client.delete::<Driver>("missing").await.unwrap_err();

    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    assert!(err.to_string().contains("no such driver"));
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list::<Truck>().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Port 1 (tcpmux) is closed on any sane test host.
    let client =
        FleetClient::from_reqwest("http://127.0.0.1:1/api", reqwest::Client::new()).unwrap();

    let err = client.list::<Truck>().await.unwrap_err();

    assert!(err.is_connection(), "expected connection error, got: {err:?}");
}
