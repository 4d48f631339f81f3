//! Fetch that reports failure through its return value.
//!
//! [`guard`] wraps any fallible async callable so that it always completes with a
//! [`GuardedResult`] instead of failing or panicking. [`net::GUARDED_FETCH`] is that
//! guard applied to the process-wide HTTP fetch capability.

pub mod config;
pub mod errors;
pub mod guard;
pub mod net;

pub use config::FetchConfig;
pub use errors::{FetchConfigError, FetchError};
pub use guard::{guard, Failure, Guard, GuardedResult};
pub use net::{guarded_fetch, FetchOptions, Fetcher, Response, GUARDED_FETCH};
