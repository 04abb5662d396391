use std::sync::RwLock;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use crate::config::{Credentials, Endpoint};
use crate::error::{ApiError, Error, Result};
use crate::request::{Method, Request};
use crate::signing;

/// Most recent rate-limit state reported by the exchange, parsed from the
/// `x-ratelimit-*` and `retry-after` response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub retry_after: Option<u32>,
}

impl RateLimitInfo {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_u32(headers, "x-ratelimit-limit"),
            remaining: header_u32(headers, "x-ratelimit-remaining"),
            retry_after: header_u32(headers, "retry-after"),
        }
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

impl Method {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Internal transport: signs, sends, and decodes one [`Request`] at a time.
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    rate_limit: RwLock<RateLimitInfo>,
}

impl HttpClient {
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: endpoint.base_url().to_string(),
            credentials,
            rate_limit: RwLock::new(RateLimitInfo::default()),
        }
    }

    /// Rate-limit state from the most recent response.
    pub fn rate_limit(&self) -> RateLimitInfo {
        match self.rate_limit.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Sign and send a request, returning the parsed JSON envelope.
    ///
    /// Fails with [`Error::Status`] on a non-success HTTP status and with
    /// [`Error::Api`] when the envelope carries a non-zero business code.
    pub async fn send(&self, req: &Request) -> Result<Value> {
        let query = req.query_string();
        let body = req.body_json();
        let expiry = signing::expiry_timestamp();
        let signature = signing::sign(
            self.credentials.secret(),
            &req.path,
            &query,
            expiry,
            &body,
        );

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, req.path)
        } else {
            format!("{}{}?{}", self.base_url, req.path, query)
        };

        // The access token and signature never reach the logs.
        debug!(method = req.method.as_str(), %url, body = %body, "sending request");

        let mut builder = self
            .client
            .request(req.method.to_reqwest(), &url)
            .header("x-phemex-access-token", self.credentials.api_key.as_str())
            .header("x-phemex-request-expiry", expiry.to_string())
            .header("x-phemex-request-signature", signature);
        if !body.is_empty() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();

        let info = RateLimitInfo::from_headers(response.headers());
        match self.rate_limit.write() {
            Ok(mut guard) => *guard = info,
            Err(poisoned) => *poisoned.into_inner() = info,
        }

        let text = response.text().await?;
        debug!(status = status.as_u16(), body = %text, "received response");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value = serde_json::from_str(&text)?;
        if let Some(api_err) = ApiError::from_envelope(&value) {
            return Err(Error::Api(api_err));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn parses_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("100"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("95"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, Some(100));
        assert_eq!(info.remaining, Some(95));
        assert_eq!(info.retry_after, None);
    }

    #[test]
    fn missing_headers_leave_fields_unset() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());
        assert_eq!(info, RateLimitInfo::default());
    }

    #[test]
    fn parses_retry_after_when_exhausted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("100"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("retry-after", HeaderValue::from_static("30"));

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.remaining, Some(0));
        assert_eq!(info.retry_after, Some(30));
    }

    #[test]
    fn garbage_header_values_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("soon"));
        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, None);
    }
}
