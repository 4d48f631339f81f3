//! The default guarded fetch.
//!
//! [`AMBIENT_FETCH`] is the process-wide fetch capability. It is resolved once, on
//! first access, from [`FetchConfig::from_env`]. Environment changes made after
//! that point are not picked up, and neither is any capability installed later.
//! [`GUARDED_FETCH`] is that capability wrapped in a [`Guard`].
use lazy_static::lazy_static;

use crate::config::FetchConfig;
use crate::errors::FetchError;
use crate::guard::{guard, Failure, Guard, GuardedResult};
use crate::net::{FetchArgs, FetchFn, FetchFuture, FetchOptions, Fetcher, Response};

/// Outcome of a guarded fetch.
pub type GuardedFetchResult = GuardedResult<Response, Failure<FetchError>>;

lazy_static! {
    pub static ref AMBIENT_FETCH: FetchFn = resolve_ambient();
    pub static ref GUARDED_FETCH: Guard<&'static FetchFn> = guard(&*AMBIENT_FETCH);
}

/// Fetches `input` through [`GUARDED_FETCH`].
pub async fn guarded_fetch<S: Into<String>>(input: S, options: Option<FetchOptions>) -> GuardedFetchResult {
    GUARDED_FETCH.call((input.into(), options)).await
}

fn resolve_ambient() -> FetchFn {
    let config = FetchConfig::from_env().unwrap_or_else(|e| {
        log::warn!("ambient fetch: ignoring environment ({e}), using defaults");
        FetchConfig::default()
    });

    match Fetcher::new(config) {
        Ok(fetcher) => {
            log::debug!("ambient fetch: resolved with {:?}", fetcher.config());
            fetcher.into_fn()
        }
        Err(e) => {
            log::error!("ambient fetch: cannot build client: {e}");
            unavailable(e.to_string())
        }
    }
}

/// A capability that fails every call with [`FetchError::Unavailable`].
fn unavailable(reason: String) -> FetchFn {
    Box::new(move |_: FetchArgs| -> FetchFuture {
        let reason = reason.clone();
        Box::pin(async move { Err(FetchError::Unavailable(reason)) })
    })
}
