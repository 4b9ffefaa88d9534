// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered error aggregation.
//!
//! An aggregate keeps its constituents in append order and never nests:
//! appending an aggregate splices its constituents in place. Combining zero
//! errors yields `None` and combining one yields that error unchanged.

use std::fmt;

use crate::error::Error;

/// Separator used when rendering an aggregate.
pub const SEPARATOR: &str = "; ";

/// An ordered aggregate of two or more errors.
#[derive(Debug, Clone)]
pub struct Chain {
    errors: Vec<Error>,
}

impl Chain {
    /// The constituents in append order.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Number of constituents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false` for chains built through this module.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the constituents in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Consume the chain, returning its constituents.
    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Chain {}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

fn push_flattened(out: &mut Vec<Error>, err: Error) {
    match err {
        Error::Aggregate(chain) => out.extend(chain.errors),
        other => out.push(other),
    }
}

fn from_vec(mut errors: Vec<Error>) -> Option<Error> {
    match errors.len() {
        0 => None,
        1 => errors.pop(),
        _ => Some(Error::Aggregate(Chain { errors })),
    }
}

/// Combine errors into one, skipping `None`s.
///
/// ```
/// use errmap_core::{chain, Error};
///
/// let err = chain::combine([Some(Error::new("a")), None, Some(Error::new("b"))]);
/// assert_eq!(err.unwrap().to_string(), "a; b");
/// assert!(chain::combine(Vec::<Option<Error>>::new()).is_none());
/// ```
pub fn combine<I>(errors: I) -> Option<Error>
where
    I: IntoIterator,
    I::Item: Into<Option<Error>>,
{
    let mut out = Vec::new();
    for err in errors.into_iter().filter_map(Into::into) {
        push_flattened(&mut out, err);
    }
    from_vec(out)
}

/// Append `right` to `left`. Either side may be `None`.
pub fn append(left: Option<Error>, right: Option<Error>) -> Option<Error> {
    combine([left, right])
}

/// The constituents of an aggregate; empty when `err` is not an aggregate.
#[must_use]
pub fn constituents(err: &Error) -> &[Error] {
    match err {
        Error::Aggregate(chain) => chain.errors(),
        _ => &[],
    }
}

/// The most recently appended error of `err`.
///
/// A non-aggregate error is its own last appended error.
#[must_use]
pub fn last_appended(err: Option<&Error>) -> Option<&Error> {
    err.and_then(|e| e.errors().last())
}

/// Returns `true` when some error of `err` renders exactly as `text`.
#[must_use]
pub fn has_error(err: &Error, text: &str) -> bool {
    err.errors().iter().any(|e| e.to_string() == text)
}

/// The first error of `chain`, in append order, equivalent to `err`.
#[must_use]
pub fn has_equal<'a>(chain: &'a Error, err: &Error) -> Option<&'a Error> {
    chain.errors().iter().find(|e| e.equivalent(err))
}
