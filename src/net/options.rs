use http::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::errors::FetchError;

/// Per-request options for [`Fetcher::fetch`](crate::net::Fetcher::fetch).
///
/// Headers are kept as raw strings and only validated when the request is built, so
/// an invalid header shows up as a fetch failure and not while assembling options.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Cancels the request (or the body read) when triggered.
    pub signal: Option<CancellationToken>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends a header. Repeated names are all sent.
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets `content-type` accordingly.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, FetchError> {
        let body = serde_json::to_vec(value)?;
        Ok(self.header("content-type", "application/json").body(body))
    }

    pub fn signal(mut self, token: CancellationToken) -> Self {
        self.signal = Some(token);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_plain_get() {
        let opts = FetchOptions::new();
        assert_eq!(opts.method, Method::GET);
        assert!(opts.headers.is_empty());
        assert!(opts.body.is_none());
        assert!(opts.signal.is_none());
    }

    #[test]
    fn builder_keeps_header_order_and_duplicates() {
        let opts = FetchOptions::new()
            .method(Method::POST)
            .header("x-a", "1")
            .header("x-a", "2")
            .body("payload");

        assert_eq!(opts.method, Method::POST);
        assert_eq!(
            opts.headers,
            vec![("x-a".to_string(), "1".to_string()), ("x-a".to_string(), "2".to_string())]
        );
        assert_eq!(opts.body.as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn json_sets_body_and_content_type() {
        let opts = FetchOptions::new()
            .method(Method::PUT)
            .json(&serde_json::json!({ "zone": "work" }))
            .unwrap();

        assert_eq!(opts.body.as_deref(), Some(&br#"{"zone":"work"}"#[..]));
        assert!(opts
            .headers
            .iter()
            .any(|(k, v)| k == "content-type" && v == "application/json"));
    }
}
