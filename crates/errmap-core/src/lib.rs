// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # errmap-core
//!
//! Classified error model, equivalence rules, and error chains.

pub mod chain;
mod dto;
mod error;
mod status;

pub use chain::Chain;
pub use dto::ErrorDto;
pub use error::{Error, FormattedError, HashKey, PlainError, equal};
pub use status::{DEFAULT_INTERNAL_STATUS, StatusError};

/// Build a template-based [`Error`].
///
/// The template literal is kept next to the rendered message, so every error
/// produced from the same literal is equivalent regardless of its arguments.
///
/// ```
/// use errmap_core::errorf;
///
/// let a = errorf!("order {} rejected", 7);
/// let b = errorf!("order {} rejected", 8);
/// assert_eq!(a.to_string(), "order 7 rejected");
/// assert!(a.equivalent(&b));
/// ```
#[macro_export]
macro_rules! errorf {
    ($template:literal $(,)?) => {
        $crate::Error::formatted($template, ::std::format!($template))
    };
    ($template:literal, $($arg:tt)*) => {
        $crate::Error::formatted($template, ::std::format!($template, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errorf_renders_arguments() {
        let err = errorf!("some err with foo {}", 123);
        assert_eq!(err.to_string(), "some err with foo 123");
        assert_eq!(err.format_template(), Some("some err with foo {}"));
    }

    #[test]
    fn errorf_without_arguments_renders_escapes() {
        let err = errorf!("{{braces}}");
        assert_eq!(err.to_string(), "{braces}");
        assert_eq!(err.format_template(), Some("{{braces}}"));
    }

    #[test]
    fn errorf_captures_identifiers() {
        let id = 42;
        let err = errorf!("missing id {id}");
        assert_eq!(err.to_string(), "missing id 42");
        assert!(err.equivalent(&errorf!("missing id {id}")));
    }
}
