// SPDX-License-Identifier: MIT OR Apache-2.0
//! The result of a successful match.

use std::borrow::Cow;

use errmap_core::{Error, chain};

/// What a [`Mapper`](crate::Mapper) resolved an error chain to.
///
/// The outcome borrows the chain it was computed from. The target is borrowed
/// from the mapper's table for built-in strategies and may be owned for
/// custom mappers that build targets on the fly.
#[derive(Debug, Clone)]
pub enum MapOutcome<'a> {
    /// Append `last` to the chain.
    Append {
        /// The chain as handed to the mapper.
        previous: &'a Error,
        /// The error the chain resolves to.
        last: Cow<'a, Error>,
    },
    /// Drop the chain entirely.
    Ignore {
        /// The chain as handed to the mapper.
        previous: &'a Error,
    },
}

impl<'a> MapOutcome<'a> {
    /// An outcome appending a borrowed target.
    #[must_use]
    pub fn append(previous: &'a Error, last: &'a Error) -> Self {
        Self::Append {
            previous,
            last: Cow::Borrowed(last),
        }
    }

    /// An outcome appending an owned target.
    #[must_use]
    pub fn append_owned(previous: &'a Error, last: Error) -> Self {
        Self::Append {
            previous,
            last: Cow::Owned(last),
        }
    }

    /// An outcome suppressing `previous`.
    #[must_use]
    pub fn ignore(previous: &'a Error) -> Self {
        Self::Ignore { previous }
    }

    /// The chain as handed to the mapper.
    #[must_use]
    pub fn previous(&self) -> &'a Error {
        match self {
            Self::Append { previous, .. } | Self::Ignore { previous } => *previous,
        }
    }

    /// The resolved target; `None` for an ignore outcome.
    #[must_use]
    pub fn last(&self) -> Option<&Error> {
        match self {
            Self::Append { last, .. } => Some(last.as_ref()),
            Self::Ignore { .. } => None,
        }
    }

    /// Returns `true` for [`MapOutcome::Ignore`].
    #[must_use]
    pub fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore { .. })
    }

    /// The error to surface.
    ///
    /// `None` for an ignore outcome; otherwise the original chain with the
    /// target appended at its tail.
    #[must_use]
    pub fn apply(&self) -> Option<Error> {
        match self {
            Self::Append { previous, last } => {
                chain::append(Some((*previous).clone()), Some(last.as_ref().clone()))
            }
            Self::Ignore { .. } => None,
        }
    }

    /// Consume the outcome, returning an owned target.
    #[must_use]
    pub fn into_last(self) -> Option<Error> {
        match self {
            Self::Append { last, .. } => Some(last.into_owned()),
            Self::Ignore { .. } => None,
        }
    }
}
