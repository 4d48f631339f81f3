//! Fetch configuration.
//!
//! `FetchConfig` controls how the reqwest client behind a
//! [`Fetcher`](crate::net::Fetcher) is built: the user agent it sends, how many
//! redirects it follows, whether it honours the system proxy settings and whether
//! it keeps a cookie store between requests.
//!
//! `FetchConfig` provides defaults via [`Default`], a fluent
//! [`FetchConfig::builder()`] with validation, and [`FetchConfig::from_env()`]
//! which is what the ambient fetch capability is built from.
//!
//! # Examples
//!
//! ```rust
//! use guarded_fetch::config::FetchConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = FetchConfig::builder()
//!     .user_agent("my-agent/1.0")
//!     .max_redirects(5)
//!     .use_system_proxy(false)
//!     .build()?;
//! assert_eq!(cfg.max_redirects, 5);
//! # Ok(()) }
//! ```
//!
//! # Environment
//! - `GUARDED_FETCH_USER_AGENT`: user agent string.
//! - `GUARDED_FETCH_MAX_REDIRECTS`: number of redirects to follow (`0..=64`).
//! - `GUARDED_FETCH_SYSTEM_PROXY`: `true`/`false`, honour `HTTP(S)_PROXY`.
//! - `GUARDED_FETCH_COOKIES`: `true`/`false`, keep a cookie store.

use crate::errors::FetchConfigError;

const DEFAULT_USER_AGENT: &str = concat!("GuardedFetch/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS_LIMIT: usize = 64;

pub const ENV_USER_AGENT: &str = "GUARDED_FETCH_USER_AGENT";
pub const ENV_MAX_REDIRECTS: &str = "GUARDED_FETCH_MAX_REDIRECTS";
pub const ENV_SYSTEM_PROXY: &str = "GUARDED_FETCH_SYSTEM_PROXY";
pub const ENV_COOKIES: &str = "GUARDED_FETCH_COOKIES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Maximum number of redirects followed before the fetch fails
    pub max_redirects: usize,
    /// Honour proxy settings from the environment
    pub use_system_proxy: bool,
    /// Keep cookies between requests made by the same fetcher
    pub cookie_store: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            use_system_proxy: true,
            cookie_store: false,
        }
    }
}

impl FetchConfig {
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Reads the configuration from the process environment. Unset variables keep
    /// their default value.
    pub fn from_env() -> Result<FetchConfig, FetchConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FetchConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<L>(lookup: L) -> Result<FetchConfig, FetchConfigError>
    where
        L: Fn(&'static str) -> Option<String>,
    {
        let mut builder = FetchConfig::builder();

        if let Some(ua) = lookup(ENV_USER_AGENT) {
            builder = builder.user_agent(ua);
        }
        if let Some(raw) = lookup(ENV_MAX_REDIRECTS) {
            let n = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| FetchConfigError::InvalidEnv { key: ENV_MAX_REDIRECTS, value: raw.clone() })?;
            builder = builder.max_redirects(n);
        }
        if let Some(raw) = lookup(ENV_SYSTEM_PROXY) {
            builder = builder.use_system_proxy(parse_bool(ENV_SYSTEM_PROXY, &raw)?);
        }
        if let Some(raw) = lookup(ENV_COOKIES) {
            builder = builder.cookie_store(parse_bool(ENV_COOKIES, &raw)?);
        }

        builder.build()
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, FetchConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FetchConfigError::InvalidEnv { key, value: raw.to_string() }),
    }
}

/// Builder for [`FetchConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetchConfigBuilder {
    inner: FetchConfig,
}

impl FetchConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut FetchConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = ua.into()) }
    pub fn max_redirects(self, n: usize) -> Self { self.map(|c| c.max_redirects = n) }
    pub fn use_system_proxy(self, on: bool) -> Self { self.map(|c| c.use_system_proxy = on) }
    pub fn cookie_store(self, on: bool) -> Self { self.map(|c| c.cookie_store = on) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<FetchConfig, FetchConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

fn validate(c: &FetchConfig) -> Result<(), FetchConfigError> {
    if c.user_agent.trim().is_empty() {
        return Err(FetchConfigError::EmptyUserAgent);
    }
    if c.max_redirects > MAX_REDIRECTS_LIMIT {
        return Err(FetchConfigError::TooManyRedirects(c.max_redirects));
    }
    Ok(())
}
