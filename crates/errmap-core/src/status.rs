// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors carrying an application status code.

use std::fmt;

use http::StatusCode;

use crate::error::Error;

/// Status attached to unresolved errors when no other status is known.
pub const DEFAULT_INTERNAL_STATUS: u16 = 500;

/// An error annotated with a status code and the error that caused it.
///
/// The status is application data (usually an HTTP status) and is never
/// range-checked here. [`std::error::Error::source`] returns the cause.
#[derive(Debug, Clone)]
pub struct StatusError {
    err: Box<Error>,
    status: u16,
    cause: Option<Box<Error>>,
}

impl StatusError {
    /// Wrap `err` with `status` and no cause.
    pub fn new(err: impl Into<Error>, status: u16) -> Self {
        Self {
            err: Box::new(err.into()),
            status,
            cause: None,
        }
    }

    /// A status error whose message is the canonical reason phrase of `code`.
    pub fn from_status(code: StatusCode) -> Self {
        let reason = code.canonical_reason().unwrap_or_else(|| code.as_str());
        Self::new(Error::new(reason), code.as_u16())
    }

    /// `400 Bad Request`.
    pub fn bad_request() -> Self {
        Self::from_status(StatusCode::BAD_REQUEST)
    }

    /// `500 Internal Server Error`.
    pub fn internal_server_error() -> Self {
        Self::from_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Replace the cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<Error>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// The status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The status as an [`http::StatusCode`], when it is a valid one.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    /// The error that triggered this status, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// The wrapped, status-bearing error.
    #[must_use]
    pub fn inner(&self) -> &Error {
        &self.err
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl std::error::Error for StatusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_is_wrapped_message() {
        let err = StatusError::new(Error::new("MISSING_FIELD"), 400)
            .with_cause(Error::new("could not fill struct"));
        assert_eq!(err.to_string(), "MISSING_FIELD");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn source_is_cause() {
        let err = StatusError::new(Error::new("outer"), 502).with_cause(Error::new("inner"));
        let src = err.source().unwrap();
        assert_eq!(src.to_string(), "inner");
        assert_eq!(err.cause().map(ToString::to_string).as_deref(), Some("inner"));
    }

    #[test]
    fn no_cause_by_default() {
        let err = StatusError::new(Error::new("x"), 418);
        assert!(err.source().is_none());
        assert!(err.cause().is_none());
    }

    #[test]
    fn predefined_statuses_use_reason_phrase() {
        let bad = StatusError::bad_request();
        assert_eq!(bad.status(), 400);
        assert_eq!(bad.to_string(), "Bad Request");

        let internal = StatusError::internal_server_error();
        assert_eq!(internal.status(), DEFAULT_INTERNAL_STATUS);
        assert_eq!(internal.to_string(), "Internal Server Error");
    }

    #[test]
    fn status_is_not_range_checked() {
        let err = StatusError::new(Error::new("odd"), 42);
        assert_eq!(err.status(), 42);
        assert!(err.status_code().is_none());
    }

    #[test]
    fn status_code_for_valid_status() {
        let err = StatusError::new(Error::new("gone"), 410);
        assert_eq!(err.status_code(), Some(StatusCode::GONE));
    }
}
