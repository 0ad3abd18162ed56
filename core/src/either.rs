//! Two-variant outcome returned by every client operation.
//!
//! # Design
//! The error sits on the left (`Failure`) and the payload on the right
//! (`Success`), so a call reads as `Either<ApiError, Task>`. Callers branch
//! with `match` or with the `error()` / `value()` accessors; nothing here
//! panics.

/// Either a typed failure or a successful value. Exactly one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<E, T> {
    Failure(E),
    Success(T),
}

impl<E, T> Either<E, T> {
    pub fn success(value: T) -> Self {
        Either::Success(value)
    }

    pub fn failure(error: E) -> Self {
        Either::Failure(error)
    }

    /// The wrapped error, or `None` for a success.
    pub fn error(&self) -> Option<&E> {
        match self {
            Either::Failure(e) => Some(e),
            Either::Success(_) => None,
        }
    }

    /// The wrapped value, or `None` for a failure.
    pub fn value(&self) -> Option<&T> {
        match self {
            Either::Failure(_) => None,
            Either::Success(v) => Some(v),
        }
    }

    pub fn into_error(self) -> Option<E> {
        match self {
            Either::Failure(e) => Some(e),
            Either::Success(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Either::Failure(_) => None,
            Either::Success(v) => Some(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Either<E, U> {
        match self {
            Either::Failure(e) => Either::Failure(e),
            Either::Success(v) => Either::Success(f(v)),
        }
    }
}
