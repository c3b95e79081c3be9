// fleetdesk-api: Async Rust client for the fleet management REST backend
//
// Thin facade over the backend's `/api` surface. One request per call,
// no retries, no caching. Domain semantics (validation, list sync) live
// in `fleetdesk-core`.

pub mod client;
pub mod error;
pub mod resource;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, FleetClient};
pub use error::Error;
pub use resource::Resource;
pub use transport::{TlsMode, TransportConfig};
