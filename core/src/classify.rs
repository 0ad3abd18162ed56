//! Response classification.
//!
//! # Design
//! `classify` turns a received status code and an optionally decoded body
//! into exactly one `Either<ApiError, T>`. The checks run in a fixed order
//! and the first match wins:
//!
//! 1. `404` is `NotFound`, whatever the body.
//! 2. Any other status `>= 400` is `Unknown(status)`.
//! 3. A success status without a usable body is `Unknown(status)`, using the
//!    code actually received.
//! 4. Otherwise the body is the success value.
//!
//! Transport failures never reach this module; the façade short-circuits
//! them to `ApiError::Network` before a status exists.

use serde::de::DeserializeOwned;

use crate::either::Either;
use crate::error::ApiError;

pub const NOT_FOUND: u16 = 404;
pub const FIRST_ERROR_STATUS: u16 = 400;

/// Classify a completed exchange.
pub fn classify<T>(status: u16, body: Option<T>) -> Either<ApiError, T> {
    if status == NOT_FOUND {
        return Either::failure(ApiError::NotFound);
    }
    if status >= FIRST_ERROR_STATUS {
        return Either::failure(ApiError::Unknown(status));
    }
    match body {
        Some(value) => Either::success(value),
        None => Either::failure(ApiError::Unknown(status)),
    }
}

/// Decode a JSON body. Empty bodies and bodies that do not match `T`,
/// including ones that are not UTF-8, are absent.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(body).ok()
}
