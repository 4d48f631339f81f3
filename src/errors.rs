use http::Method;

/// Errors reported by the ambient fetch capability.
///
/// Everything up to `BodyNotAllowed`/`InvalidHeader` is a construction failure and is
/// reported before any I/O takes place. HTTP error statuses are never an error here.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Request with {0} method cannot have a body")]
    BodyNotAllowed(Method),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Cannot encode request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("fetch canceled")]
    Canceled,

    #[error("Fetch capability unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Net(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchConfigError {
    #[error("user_agent must not be empty")]
    EmptyUserAgent,

    #[error("max_redirects {0} is out of range (expected 0..=64)")]
    TooManyRedirects(usize),

    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}
