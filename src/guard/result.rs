//! The outcome record produced by a guarded call.
//!
//! A [`GuardedResult`] holds either the value the underlying operation completed
//! with or the failure it produced, never both and never neither. Which variant is
//! present is the only discriminant: an empty body, a zero or an empty string is
//! still a success.
//!
//! Serialized, a guarded result is a record with exactly one of the `result` and
//! `failure` fields:
//!
//! ```text
//! { "result": <value> }
//! { "failure": <value> }
//! ```
//!
//! Presence of the field is what counts, so `{ "result": null }` is a success
//! holding `()`, `None` or `Value::Null`. The output of a guard,
//! `GuardedResult<T, Failure<E>>`, serializes the same way when `T` and `E` do; a
//! captured panic is written as `{ "panic": <message or null> }`. Results whose
//! values are not serializable, such as a fetched
//! [`Response`](crate::net::Response), have to be mapped first with
//! [`GuardedResult::map`] and [`GuardedResult::map_failure`].
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[must_use = "a guarded result carries the failure of the call, check it"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardedResult<T, E> {
    /// The underlying operation completed normally with this value.
    Success(T),
    /// The underlying operation failed with this value.
    Failure(E),
}

impl<T, E> GuardedResult<T, E> {
    /// Returns the success value, if any.
    pub fn result(&self) -> Option<&T> {
        match self {
            GuardedResult::Success(v) => Some(v),
            GuardedResult::Failure(_) => None,
        }
    }

    /// Returns the captured failure, if any.
    pub fn failure(&self) -> Option<&E> {
        match self {
            GuardedResult::Success(_) => None,
            GuardedResult::Failure(e) => Some(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GuardedResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GuardedResult::Failure(_))
    }

    /// Splits the record into its two optional fields. Exactly one of them is `Some`.
    pub fn into_parts(self) -> (Option<T>, Option<E>) {
        match self {
            GuardedResult::Success(v) => (Some(v), None),
            GuardedResult::Failure(e) => (None, Some(e)),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GuardedResult<U, E> {
        match self {
            GuardedResult::Success(v) => GuardedResult::Success(f(v)),
            GuardedResult::Failure(e) => GuardedResult::Failure(e),
        }
    }

    pub fn map_failure<F>(self, f: impl FnOnce(E) -> F) -> GuardedResult<T, F> {
        match self {
            GuardedResult::Success(v) => GuardedResult::Success(v),
            GuardedResult::Failure(e) => GuardedResult::Failure(f(e)),
        }
    }
}

impl<T, E> From<Result<T, E>> for GuardedResult<T, E> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => GuardedResult::Success(v),
            Err(e) => GuardedResult::Failure(e),
        }
    }
}

impl<T, E> From<GuardedResult<T, E>> for Result<T, E> {
    fn from(r: GuardedResult<T, E>) -> Self {
        match r {
            GuardedResult::Success(v) => Ok(v),
            GuardedResult::Failure(e) => Err(e),
        }
    }
}

impl<T: Serialize, E: Serialize> Serialize for GuardedResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("GuardedResult", 1)?;
        match self {
            GuardedResult::Success(v) => record.serialize_field("result", v)?,
            GuardedResult::Failure(e) => record.serialize_field("failure", e)?,
        }
        record.end()
    }
}

/// Wire form of a guarded result. A field that is present is `Some` even when its
/// value is `null`, so `Success(())` and `Success(None)` read back as successes.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, bound = "T: Deserialize<'de>, E: Deserialize<'de>")]
struct Record<T, E> {
    #[serde(default, deserialize_with = "present")]
    result: Option<T>,
    #[serde(default, deserialize_with = "present")]
    failure: Option<E>,
}

fn present<'de, D, V>(deserializer: D) -> Result<Option<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    V::deserialize(deserializer).map(Some)
}

impl<'de, T, E> Deserialize<'de> for GuardedResult<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Record::<T, E>::deserialize(deserializer)?;
        match (record.result, record.failure) {
            (Some(v), None) => Ok(GuardedResult::Success(v)),
            (None, Some(e)) => Ok(GuardedResult::Failure(e)),
            (Some(_), Some(_)) => Err(D::Error::custom("guarded result has both `result` and `failure`")),
            (None, None) => Err(D::Error::custom("guarded result has neither `result` nor `failure`")),
        }
    }
}
