//! Ambient fetch capability.
//!
//! A reqwest-backed fetch ([`Fetcher`]) plus the process-wide guarded instance built
//! on top of it ([`GUARDED_FETCH`]).

mod ambient;
mod fetch;
mod options;
mod response;

pub use ambient::{guarded_fetch, GuardedFetchResult, AMBIENT_FETCH, GUARDED_FETCH};
pub use fetch::{fetch, FetchArgs, FetchFn, FetchFuture, Fetcher};
pub use options::FetchOptions;
pub use response::Response;
