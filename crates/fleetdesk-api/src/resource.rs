use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type persisted by the backend under its own collection path.
///
/// `COLLECTION` is the path segment below the base URL, e.g. `"trucks"`
/// for `GET /api/trucks`. Implemented by the domain types in
/// `fleetdesk-core`; the client stays agnostic of their fields.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
}
