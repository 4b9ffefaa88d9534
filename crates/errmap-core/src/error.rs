// SPDX-License-Identifier: MIT OR Apache-2.0
//! The classified [`Error`] type and its equivalence rules.

use crate::chain::Chain;
use crate::status::StatusError;

// ---------------------------------------------------------------------------
// Leaf errors
// ---------------------------------------------------------------------------

/// An error identified only by its message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct PlainError {
    message: String,
}

impl PlainError {
    /// Create a plain error from its message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An error rendered from a template.
///
/// The template is the identity: two formatted errors built from the same
/// template are equivalent whatever arguments were substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct FormattedError {
    template: String,
    message: String,
}

impl FormattedError {
    /// Create a formatted error from its template and rendered message.
    pub fn new(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            message: message.into(),
        }
    }

    /// The template the message was rendered from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// HashKey
// ---------------------------------------------------------------------------

/// Exact lookup key for hash-based mapping tables.
///
/// Template-based errors key by template, everything else by message. A
/// `Template` key never equals a `Message` key, even for identical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    /// Rendered message of a non-template error.
    Message(String),
    /// Template of a template-based error.
    Template(String),
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A classified error.
///
/// Every error handled by `errmap` is one of four shapes. Foreign errors are
/// brought in with [`Error::cast`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Message-only error.
    #[error(transparent)]
    Plain(#[from] PlainError),
    /// Error rendered from a template.
    #[error(transparent)]
    Formatted(#[from] FormattedError),
    /// Error carrying an application status code.
    #[error(transparent)]
    WithStatus(#[from] StatusError),
    /// Ordered aggregate of two or more errors.
    #[error(transparent)]
    Aggregate(#[from] Chain),
}

impl Error {
    /// Create a message-only error.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Plain(PlainError::new(message))
    }

    /// Create a template-based error from its template and rendered message.
    ///
    /// Prefer [`errorf!`](crate::errorf) when the template is a literal.
    pub fn formatted(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Formatted(FormattedError::new(template, message))
    }

    /// Create a template-only error, used as a key matching every error
    /// rendered from `template`.
    pub fn template(template: impl Into<String>) -> Self {
        let template = template.into();
        Self::Formatted(FormattedError {
            message: template.clone(),
            template,
        })
    }

    /// Create a message-only error carrying `status`.
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self::WithStatus(StatusError::new(Self::new(message), status))
    }

    /// Convert any error into an [`Error`].
    ///
    /// Errors that already belong to this crate keep their shape; anything
    /// else becomes a [`PlainError`] with the same message.
    pub fn cast(err: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(e) = err.downcast_ref::<Error>() {
            return e.clone();
        }
        if let Some(e) = err.downcast_ref::<StatusError>() {
            return Self::WithStatus(e.clone());
        }
        if let Some(e) = err.downcast_ref::<FormattedError>() {
            return Self::Formatted(e.clone());
        }
        if let Some(e) = err.downcast_ref::<PlainError>() {
            return Self::Plain(e.clone());
        }
        if let Some(e) = err.downcast_ref::<Chain>() {
            return Self::Aggregate(e.clone());
        }
        Self::new(err.to_string())
    }

    /// The template this error was rendered from, if any.
    ///
    /// Status errors report the template of the error they wrap.
    #[must_use]
    pub fn format_template(&self) -> Option<&str> {
        match self {
            Self::Formatted(e) => Some(e.template()),
            Self::WithStatus(e) => e.inner().format_template(),
            Self::Plain(_) | Self::Aggregate(_) => None,
        }
    }

    /// Returns `true` when `self` and `other` denote the same error.
    ///
    /// Two template-based errors are equivalent when their templates are
    /// identical and two plain errors when their messages are. For a mixed
    /// pair the template is compared with the other side's rendered message,
    /// so `Error::template("t")` matches `Error::new("t")` while a formatted
    /// error never matches a plain error that merely renders the same text.
    #[must_use]
    pub fn equivalent(&self, other: &Error) -> bool {
        match (self.format_template(), other.format_template()) {
            (Some(a), Some(b)) => a == b,
            (Some(t), None) => t == other.to_string(),
            (None, Some(t)) => self.to_string() == t,
            (None, None) => self.to_string() == other.to_string(),
        }
    }

    /// Exact lookup key for hash-based tables.
    #[must_use]
    pub fn hash_key(&self) -> HashKey {
        match self.format_template() {
            Some(template) => HashKey::Template(template.to_owned()),
            None => HashKey::Message(self.to_string()),
        }
    }

    /// The status error carried by this error.
    ///
    /// Aggregates report their first status-bearing constituent.
    #[must_use]
    pub fn as_status(&self) -> Option<&StatusError> {
        match self {
            Self::WithStatus(e) => Some(e),
            Self::Aggregate(chain) => chain.iter().find_map(Error::as_status),
            Self::Plain(_) | Self::Formatted(_) => None,
        }
    }

    /// Returns `true` for [`Error::Aggregate`].
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    /// The errors this error is made of, in append order.
    ///
    /// A non-aggregate error is made of itself alone.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Aggregate(chain) => chain.errors(),
            other => std::slice::from_ref(other),
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Equivalence over optional errors.
///
/// `None` is equal to `None` and to nothing else.
#[must_use]
pub fn equal(a: Option<&Error>, b: Option<&Error>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equivalent(b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chain, errorf};
    use std::io;

    #[test]
    fn templates_ignore_arguments() {
        assert!(errorf!("foo {}", 1).equivalent(&errorf!("foo {}", 2)));
        assert!(!errorf!("foo {}", 1).equivalent(&errorf!("bar {}", 1)));
    }

    #[test]
    fn template_key_matches_rendered_instances() {
        let key = Error::template("bar {}");
        assert!(key.equivalent(&errorf!("bar {}", "foo")));
    }

    #[test]
    fn plain_errors_compare_by_message() {
        assert!(Error::new("some error").equivalent(&Error::new("some error")));
        assert!(!Error::new("some error").equivalent(&Error::new("other error")));
    }

    #[test]
    fn mixed_kinds_compare_template_with_message() {
        let formatted = errorf!("code {}", 7);
        let rendered = Error::new("code 7");
        assert!(!formatted.equivalent(&rendered));
        assert!(!rendered.equivalent(&formatted));

        let literal = Error::new("code {}");
        assert!(formatted.equivalent(&literal));
        assert!(literal.equivalent(&formatted));
    }

    #[test]
    fn template_key_matches_plain_error_with_same_text() {
        let key = Error::template("connection reset");
        let plain = Error::new("connection reset");
        assert!(key.equivalent(&plain));
        assert!(plain.equivalent(&key));
        assert!(!key.equivalent(&Error::new("connection refused")));
    }

    #[test]
    fn status_wrapping_formatted_does_not_match_rendered_plain() {
        let status = Error::from(StatusError::new(errorf!("row {}", 3), 404));
        assert!(!status.equivalent(&Error::new("row 3")));
        assert!(status.equivalent(&Error::new("row {}")));
    }

    #[test]
    fn equivalence_is_reflexive_and_symmetric() {
        let samples = [
            Error::new("a"),
            errorf!("b {}", 1),
            Error::with_status("c", 400),
            chain::combine([Error::new("x"), Error::new("y")]).unwrap(),
        ];
        for a in &samples {
            assert!(a.equivalent(a), "not reflexive: {a:?}");
            for b in &samples {
                assert_eq!(a.equivalent(b), b.equivalent(a));
            }
        }
    }

    #[test]
    fn status_errors_compare_wrapped_errors() {
        let left = StatusError::new(Error::new("MISSING_FIELD"), 400)
            .with_cause(Error::new("could not fill struct"));
        let right = StatusError::new(Error::new("MISSING_FIELD"), 404);
        assert!(Error::from(left.clone()).equivalent(&Error::from(right)));

        let other = StatusError::new(Error::new("MISSING_FIELD_TWO"), 400);
        assert!(!Error::from(left).equivalent(&Error::from(other)));
    }

    #[test]
    fn status_error_wrapping_template_uses_template() {
        let a = Error::from(StatusError::new(errorf!("quota {}", 1), 429));
        let b = errorf!("quota {}", 99);
        assert!(a.equivalent(&b));
    }

    #[test]
    fn equal_handles_none() {
        let e = Error::new("x");
        assert!(equal(None, None));
        assert!(!equal(Some(&e), None));
        assert!(!equal(None, Some(&e)));
        assert!(equal(Some(&e), Some(&Error::new("x"))));
    }

    #[test]
    fn hash_key_distinguishes_templates_from_messages() {
        assert_eq!(
            errorf!("foo {}", 1).hash_key(),
            HashKey::Template("foo {}".into())
        );
        assert_eq!(Error::new("foo").hash_key(), HashKey::Message("foo".into()));
        assert_ne!(Error::template("foo").hash_key(), Error::new("foo").hash_key());
    }

    #[test]
    fn cast_keeps_own_errors() {
        let original = Error::with_status("BAD-REQUEST", 400);
        let casted = Error::cast(&original);
        assert_eq!(casted.as_status().map(StatusError::status), Some(400));

        let status = StatusError::bad_request();
        let casted = Error::cast(&status);
        assert!(matches!(casted, Error::WithStatus(_)));
    }

    #[test]
    fn cast_foreign_error_to_plain() {
        let io = io::Error::other("disk on fire");
        let casted = Error::cast(&io);
        assert!(matches!(casted, Error::Plain(_)));
        assert_eq!(casted.to_string(), "disk on fire");
    }

    #[test]
    fn as_status_finds_first_status_in_aggregate() {
        let agg = chain::combine([
            Error::new("a"),
            Error::with_status("b", 409),
            Error::with_status("c", 410),
        ])
        .unwrap();
        assert_eq!(agg.as_status().map(StatusError::status), Some(409));
        assert!(Error::new("a").as_status().is_none());
    }

    #[test]
    fn errors_of_single_error_is_itself() {
        let e = Error::new("solo");
        assert_eq!(e.errors().len(), 1);
        assert!(e.errors()[0].equivalent(&e));
        assert!(!e.is_aggregate());
    }
}
