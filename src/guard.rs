//! Guard combinator.
//!
//! A [`Guard`] wraps a fallible asynchronous callable (conventionally a fetch
//! function) and turns its failures into data. Calling the guard forwards the
//! arguments untouched to the underlying callable, awaits it, and always completes
//! with a [`GuardedResult`]:
//!
//! - `Ok(v)` from the underlying callable becomes [`GuardedResult::Success`] with `v`;
//! - `Err(e)` becomes [`GuardedResult::Failure`] with [`Failure::Error`]`(e)`;
//! - a panic, raised either while the callable builds its future or while that
//!   future is polled, becomes [`GuardedResult::Failure`] with [`Failure::Panic`].
//!
//! The guard adds nothing else: no logging, retries, timeouts or buffering, and it
//! does not look at the success value. A fetch that completed with a `404` response
//! is a success; checking the status is up to the caller.
//!
//! Several positional arguments are passed as one tuple:
//!
//! ```rust
//! use guarded_fetch::guard::guard;
//! # futures::executor::block_on(async {
//! let divide = guard(|(a, b): (u32, u32)| async move {
//!     a.checked_div(b).ok_or("division by zero")
//! });
//!
//! assert_eq!(divide.call((6, 3)).await.result(), Some(&2));
//! assert!(divide.call((1, 0)).await.is_failure());
//! # });
//! ```
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;

mod failure;
mod result;

pub use failure::{panic_message, Failure, PanicPayload};
pub use result::GuardedResult;

/// A fallible async callable whose failures are reported through its return value.
#[derive(Clone, Copy)]
pub struct Guard<F> {
    inner: F,
}

/// Wraps `f` into a [`Guard`]. Same as [`Guard::new`].
pub fn guard<F>(f: F) -> Guard<F> {
    Guard::new(f)
}

impl<F> Guard<F> {
    /// Wraps `inner`. The callable is not validated or invoked. Pass a reference
    /// (`&f`) to keep ownership of the callable outside of the guard.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Returns the wrapped callable.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Invokes the wrapped callable with `args` and captures its outcome.
    ///
    /// This future never panics and never fails: whatever the callable produces or
    /// raises is delivered through the returned [`GuardedResult`].
    pub async fn call<A, Fut, T, E>(&self, args: A) -> GuardedResult<T, Failure<E>>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        // A panic before the future exists is the synchronous throw case.
        let fut = match panic::catch_unwind(AssertUnwindSafe(|| (self.inner)(args))) {
            Ok(fut) => fut,
            Err(payload) => return GuardedResult::Failure(Failure::Panic(payload)),
        };

        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(value)) => GuardedResult::Success(value),
            Ok(Err(e)) => GuardedResult::Failure(Failure::Error(e)),
            Err(payload) => GuardedResult::Failure(Failure::Panic(payload)),
        }
    }
}

impl<F> fmt::Debug for Guard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("inner", &std::any::type_name::<F>())
            .finish()
    }
}
