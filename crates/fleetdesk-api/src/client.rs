// Async HTTP client for the fleet management backend.
//
// Base path: /api/
// Collections: trucks, drivers
// Relation:    POST trucks/{truckId}/assign-driver/{driverId}

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::resource::Resource;
use crate::transport::TransportConfig;

/// Base URL used when no profile or flag says otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

const TRUCKS: &str = "trucks";
const ASSIGN_DRIVER: &str = "assign-driver";

// ── Error response shape ─────────────────────────────────────────────

/// Spring-style error body: `{"status":404,"error":"Not Found","message":"..."}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the fleet backend's REST surface.
///
/// Every method issues exactly one request and returns the decoded body,
/// or the transport/status error unmodified. No retries.
#[derive(Debug, Clone)]
pub struct FleetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FleetClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL (e.g. `http://localhost:8080/api`)
    /// and transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and TLS).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL. Segments are percent-encoded,
    /// so identifiers containing `/` or spaces stay a single segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // normalize_base_url rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_without_body<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_optional(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete_resource(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            decode(body)
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    /// Like `handle_response`, but an empty 2xx body decodes to `None`.
    async fn handle_optional<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Option<T>, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() {
            Ok(None)
        } else {
            decode(body).map(Some)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => err
                .message
                .filter(|m| !m.is_empty())
                .or(err.error)
                .unwrap_or_else(|| status.to_string()),
            Err(_) if raw.is_empty() => status.to_string(),
            Err(_) => raw.chars().take(200).collect(),
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Collections ──────────────────────────────────────────────────

    /// `GET /{collection}`
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, Error> {
        self.get(self.url(&[R::COLLECTION])).await
    }

    /// `POST /{collection}` with the record as the body.
    pub async fn create<R: Resource>(&self, record: &R) -> Result<R, Error> {
        self.post(self.url(&[R::COLLECTION]), record).await
    }

    /// `PUT /{collection}/{id}` with the full record as the body.
    pub async fn update<R: Resource>(&self, id: &str, record: &R) -> Result<R, Error> {
        self.put(self.url(&[R::COLLECTION, id]), record).await
    }

    /// `DELETE /{collection}/{id}`
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<(), Error> {
        self.delete_resource(self.url(&[R::COLLECTION, id])).await
    }

    // ── Relations ────────────────────────────────────────────────────

    /// `POST /trucks/{truck_id}/assign-driver/{driver_id}` with no body.
    ///
    /// The backend answers either with an empty body or with the updated
    /// truck; `T` is the truck type to decode into. Driver availability is
    /// not checked here.
    pub async fn assign_driver<T: DeserializeOwned>(
        &self,
        truck_id: &str,
        driver_id: &str,
    ) -> Result<Option<T>, Error> {
        self.post_without_body(self.url(&[TRUCKS, truck_id, ASSIGN_DRIVER, driver_id]))
            .await
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FleetClient {
        FleetClient::from_reqwest(base, reqwest::Client::new()).expect("valid base url")
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        assert_eq!(
            client("http://localhost:8080/api").base_url().as_str(),
            "http://localhost:8080/api/"
        );
        assert_eq!(
            client("http://localhost:8080/api/").base_url().as_str(),
            "http://localhost:8080/api/"
        );
    }

    #[test]
    fn url_joins_segments_under_base_path() {
        let c = client("http://fleet.local/api");
        assert_eq!(
            c.url(&["trucks", "t1", "assign-driver", "d9"]).as_str(),
            "http://fleet.local/api/trucks/t1/assign-driver/d9"
        );
    }

    #[test]
    fn url_encodes_identifiers() {
        let c = client("http://fleet.local/api");
        assert_eq!(
            c.url(&["trucks", "a/b c"]).as_str(),
            "http://fleet.local/api/trucks/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(FleetClient::from_reqwest("mailto:ops@fleet.local", reqwest::Client::new()).is_err());
        assert!(FleetClient::from_reqwest("not a url", reqwest::Client::new()).is_err());
    }
}
