use std::any::Any;
use std::panic;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Payload of a panic captured by a guard.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// Failure captured from an underlying operation.
///
/// The underlying operation can fail in two ways: by completing with `Err(e)`, or by
/// panicking, either while it is called or while its future is polled. Both end up
/// here unchanged: `e` is moved into [`Failure::Error`], and the panic payload (whatever
/// was passed to `panic!` or `panic_any`) into [`Failure::Panic`].
#[derive(Debug, thiserror::Error)]
pub enum Failure<E> {
    #[error("{0}")]
    Error(E),

    #[error("underlying operation panicked: {}", panic_message(.0).unwrap_or("<non-string payload>"))]
    Panic(PanicPayload),
}

impl<E> Failure<E> {
    pub fn is_panic(&self) -> bool {
        matches!(self, Failure::Panic(_))
    }

    pub fn as_error(&self) -> Option<&E> {
        match self {
            Failure::Error(e) => Some(e),
            Failure::Panic(_) => None,
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Failure::Error(e) => Some(e),
            Failure::Panic(_) => None,
        }
    }

    pub fn into_panic(self) -> Option<PanicPayload> {
        match self {
            Failure::Error(_) => None,
            Failure::Panic(payload) => Some(payload),
        }
    }

    /// Message of a captured panic, when it was raised with a string.
    pub fn panic_message(&self) -> Option<&str> {
        match self {
            Failure::Error(_) => None,
            Failure::Panic(payload) => panic_message(payload),
        }
    }

    /// Returns the error, or continues unwinding with the captured panic payload.
    pub fn resume(self) -> E {
        match self {
            Failure::Error(e) => e,
            Failure::Panic(payload) => panic::resume_unwind(payload),
        }
    }
}

/// An error serializes as itself. A panic serializes as `{ "panic": <message> }`, with
/// a `null` message when the payload is not a string.
impl<E: Serialize> Serialize for Failure<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Failure::Error(e) => e.serialize(serializer),
            Failure::Panic(payload) => {
                let mut record = serializer.serialize_struct("Panic", 1)?;
                record.serialize_field("panic", &panic_message(payload))?;
                record.end()
            }
        }
    }
}

/// Extracts the message from a panic payload raised with `&'static str` or `String`.
pub fn panic_message(payload: &PanicPayload) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some(*s)
    } else {
        payload.downcast_ref::<String>().map(String::as_str)
    }
}
