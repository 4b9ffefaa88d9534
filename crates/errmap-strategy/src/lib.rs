// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # errmap-strategy
//!
//! Error matching strategies and the [`Mapper`] capability they share.

mod hashable;
mod ignore;
mod list;
mod outcome;

use std::sync::Arc;

use errmap_core::Error;

pub use hashable::{HashableMapper, HashableMapperBuilder};
pub use ignore::{IgnoreListMapper, IgnoreListMapperBuilder};
pub use list::{ListMapper, ListMapperBuilder};
pub use outcome::MapOutcome;

// ── Mapper ──────────────────────────────────────────────────────────────

/// Matches an error chain against known errors.
///
/// This is the extension point of `errmap`: any type implementing it can be
/// added to a combinator next to the built-in strategies.
pub trait Mapper: Send + Sync {
    /// Try to match `err`, returning `None` when nothing matches.
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>>;

    /// Short name used in diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<M: Mapper + ?Sized> Mapper for Box<M> {
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        (**self).map(err)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: Mapper + ?Sized> Mapper for Arc<M> {
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        (**self).map(err)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// The errors of `err` from the most recently appended back to the first.
pub fn newest_first(err: &Error) -> impl Iterator<Item = &Error> {
    err.errors().iter().rev()
}

// ── MappingEntry ────────────────────────────────────────────────────────

/// A key to match and the error it resolves to.
///
/// Entries of an ignore list have no target.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    key: Error,
    target: Option<Error>,
}

impl MappingEntry {
    /// An entry resolving `key` to `target`.
    pub fn new(key: impl Into<Error>, target: impl Into<Error>) -> Self {
        Self {
            key: key.into(),
            target: Some(target.into()),
        }
    }

    /// An entry that resolves `key` to nothing.
    pub fn ignore(key: impl Into<Error>) -> Self {
        Self {
            key: key.into(),
            target: None,
        }
    }

    /// The error this entry matches.
    #[must_use]
    pub fn key(&self) -> &Error {
        &self.key
    }

    /// The error this entry resolves to.
    #[must_use]
    pub fn target(&self) -> Option<&Error> {
        self.target.as_ref()
    }

    /// Returns `true` when `err` is equivalent to the key.
    #[must_use]
    pub fn matches(&self, err: &Error) -> bool {
        self.key.equivalent(err)
    }
}
