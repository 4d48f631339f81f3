use std::sync::Arc;

use futures::future::BoxFuture;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use url::Url;

use crate::config::FetchConfig;
use crate::errors::FetchError;
use crate::net::{FetchOptions, Response};

/// Positional arguments of a fetch: the target URL and optional request options.
pub type FetchArgs = (String, Option<FetchOptions>);

pub type FetchFuture = BoxFuture<'static, Result<Response, FetchError>>;

/// Type-erased fetch capability, as wrapped by the default guarded instance.
pub type FetchFn = Box<dyn Fn(FetchArgs) -> FetchFuture + Send + Sync>;

/// Fetches URLs with a shared reqwest client.
///
/// Only transport and construction problems are errors. Any completed HTTP exchange
/// is returned as a [`Response`], whatever its status.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: Arc<FetchConfig>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        // Zero redirects means 3xx responses are handed back as they are.
        let policy = match config.max_redirects {
            0 => reqwest::redirect::Policy::none(),
            n => reqwest::redirect::Policy::limited(n),
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(policy)
            .cookie_store(config.cookie_store);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Loads `input` and returns the fully buffered response.
    pub async fn fetch(&self, input: &str, options: Option<FetchOptions>) -> Result<Response, FetchError> {
        let FetchOptions { method, headers, body, signal } = options.unwrap_or_default();
        let request = self.build_request(input, method, headers, body)?;

        log::debug!("fetch: {} {}", request.method(), request.url());

        match signal {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    log::debug!("fetch: {input} canceled");
                    Err(FetchError::Canceled)
                }
                r = self.execute(request) => r,
            },
            None => self.execute(request).await,
        }
    }

    /// Type-erases this fetcher into a [`FetchFn`].
    pub fn into_fn(self) -> FetchFn {
        Box::new(move |(input, options): FetchArgs| -> FetchFuture {
            let fetcher = self.clone();
            Box::pin(async move { fetcher.fetch(&input, options).await })
        })
    }

    fn build_request(
        &self,
        input: &str,
        method: Method,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Request, FetchError> {
        let url = Url::parse(input)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }

        if body.is_some() && (method == Method::GET || method == Method::HEAD) {
            return Err(FetchError::BodyNotAllowed(method));
        }

        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader(format!("invalid name {name:?}")))?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| FetchError::InvalidHeader(format!("invalid value for {name}")))?;
            map.append(header_name, header_value);
        }

        let mut builder = self.client.request(method, url).headers(map);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder.build()?)
    }

    async fn execute(&self, request: reqwest::Request) -> Result<Response, FetchError> {
        let requested = request.url().clone();
        let res = self.client.execute(request).await?;

        // Fetch results
        let final_url = res.url().clone();
        let status = res.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let headers = res.headers().clone();

        // Fetch body. We don't do streaming yet
        let body = res.bytes().await?.to_vec();

        log::debug!("fetch: {} -> {} ({} bytes)", final_url, status.as_u16(), body.len());

        Ok(Response {
            redirected: final_url != requested,
            url: final_url,
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

/// Loads an URL with a one-off fetcher using the default configuration.
pub async fn fetch(input: &str, options: Option<FetchOptions>) -> Result<Response, FetchError> {
    Fetcher::new(FetchConfig::default())?.fetch(input, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    fn fetcher() -> Fetcher {
        let cfg = FetchConfig::builder().use_system_proxy(false).build().unwrap();
        Fetcher::new(cfg).unwrap()
    }

    #[tokio::test]
    async fn unparsable_url_is_a_construction_error() {
        let res = fetcher().fetch("not a url", None).await;
        assert!(matches!(res, Err(FetchError::InvalidUrl(_))), "got {res:?}");
    }

    #[tokio::test]
    async fn non_http_scheme_is_rejected() {
        let res = fetcher().fetch("ftp://example.com/file", None).await;
        match res {
            Err(FetchError::UnsupportedScheme(s)) => assert_eq!(s, "ftp"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn body_on_get_is_rejected() {
        let opts = FetchOptions::new().body("x");
        let res = fetcher().fetch("http://127.0.0.1:9/", Some(opts)).await;
        assert!(matches!(res, Err(FetchError::BodyNotAllowed(m)) if m == Method::GET));
    }

    #[tokio::test]
    async fn invalid_headers_are_rejected() {
        let bad_name = FetchOptions::new().header("bad header", "v");
        let res = fetcher().fetch("http://127.0.0.1:9/", Some(bad_name)).await;
        assert!(matches!(res, Err(FetchError::InvalidHeader(_))));

        let bad_value = FetchOptions::new().header("x-ok", "line\nbreak");
        let res = fetcher().fetch("http://127.0.0.1:9/", Some(bad_value)).await;
        assert!(matches!(res, Err(FetchError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn cancelled_signal_aborts_before_sending() {
        let token = CancellationToken::new();
        token.cancel();

        let opts = FetchOptions::new().signal(token);
        let res = fetcher().fetch("http://127.0.0.1:9/", Some(opts)).await;
        assert!(matches!(res, Err(FetchError::Canceled)));
    }

    #[tokio::test]
    async fn erased_fn_forwards_to_fetch() {
        let f = fetcher().into_fn();
        let res = f(("mailto:someone@example.com".to_string(), None)).await;
        assert!(matches!(res, Err(FetchError::UnsupportedScheme(_))));
    }

    #[tokio::test]
    async fn one_shot_fetch_reports_construction_errors() {
        let res = fetch("not a url", None).await;
        assert!(matches!(res, Err(FetchError::InvalidUrl(_))), "got {res:?}");

        let res = fetch("file:///etc/hosts", Some(FetchOptions::new())).await;
        assert!(matches!(res, Err(FetchError::UnsupportedScheme(s)) if s == "file"));
    }

    #[test]
    fn zero_redirects_is_a_valid_config() {
        let cfg = FetchConfig::builder().max_redirects(0).use_system_proxy(false).build().unwrap();
        let fetcher = Fetcher::new(cfg).unwrap();
        assert_eq!(fetcher.config().max_redirects, 0);
    }
}
