//! Minimal HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response returned by a
//! [`Fetcher`](crate::net::Fetcher). It contains the final URL (after redirects),
//! status code + reason, response headers, and the raw body bytes.
//!
//! ## Notes
//! - A response is returned for every completed HTTP exchange, including `4xx` and
//!   `5xx` statuses. Use [`Response::ok`] to check for a `2xx` status.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
//! - `status_text` is derived from the status code's canonical reason phrase and
//!   is `"Unknown"` for non-standard codes.
//!
use http::HeaderMap;
use serde::de::DeserializeOwned;

/// Simple structure for HTTP responses.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL of the response (after redirects, if any).
    pub url: url::Url,

    /// True when one or more redirects were followed to reach `url`.
    pub redirected: bool,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Human-readable reason phrase (e.g., `"OK"`, `"Not Found"`).
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true for a `2xx` status.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
