use serde_json::Value;

use crate::config::{Credentials, Endpoint};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RateLimitInfo};
use crate::products::ProductCatalog;
use crate::request::{Extractor, Request};

use super::usdm::UsdmClient;

/// Async client for the Phemex REST API (<https://phemex-docs.github.io/>).
///
/// Holds the signed HTTP transport and the product catalog handle that
/// drives scaled-field conversion. API-family clients borrow it:
///
/// ```ignore
/// let client = PhemexClient::new(Endpoint::Testnet, Credentials::new(key, secret));
/// let ticker = client.usdm().ticker("BTCUSDT").await?;
/// ```
pub struct PhemexClient {
    http: HttpClient,
    catalog: &'static ProductCatalog,
}

impl PhemexClient {
    /// Create a client using the bundled product catalog.
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Self {
        Self::with_catalog(endpoint, credentials, ProductCatalog::global())
    }

    /// Create a client with an explicit catalog handle. Useful when the
    /// caller maintains its own snapshot of the product metadata.
    pub fn with_catalog(
        endpoint: Endpoint,
        credentials: Credentials,
        catalog: &'static ProductCatalog,
    ) -> Self {
        Self {
            http: HttpClient::new(endpoint, credentials),
            catalog,
        }
    }

    /// Client for the USD-M perpetual API family.
    pub fn usdm(&self) -> UsdmClient<'_> {
        UsdmClient::new(self)
    }

    /// Rate-limit state reported by the most recent response.
    pub fn rate_limit(&self) -> RateLimitInfo {
        self.http.rate_limit()
    }

    pub(crate) fn catalog(&self) -> &ProductCatalog {
        self.catalog
    }

    /// Make an authenticated request and return the parsed envelope.
    pub(crate) async fn send(&self, req: &Request) -> Result<Value> {
        self.http.send(req).await
    }

    /// Fetch the current Phemex server time in milliseconds. For details,
    /// see <https://phemex-docs.github.io/#query-server-time-2>.
    pub async fn server_time(&self) -> Result<i64> {
        let resp = self.send(&Request::get("/public/time")).await?;
        Extractor::new(&resp)
            .data()
            .key("serverTime")
            .require("data.serverTime")?
            .as_i64()
            .ok_or_else(|| Error::MissingField("data.serverTime".to_string()))
    }
}
