// SPDX-License-Identifier: MIT OR Apache-2.0
//! Suppression strategy.

use errmap_core::Error;

use crate::{MapOutcome, MappingEntry, Mapper, newest_first};

/// Accumulates the errors an [`IgnoreListMapper`] suppresses.
#[derive(Debug, Clone, Default)]
pub struct IgnoreListMapperBuilder {
    entries: Vec<MappingEntry>,
}

impl IgnoreListMapperBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress every error equivalent to `err`.
    #[must_use]
    pub fn append(mut self, err: impl Into<Error>) -> Self {
        self.entries.push(MappingEntry::ignore(err));
        self
    }

    /// Suppress every error rendered from `template`.
    #[must_use]
    pub fn append_template(self, template: impl Into<String>) -> Self {
        self.append(Error::template(template))
    }

    /// Freeze the list.
    #[must_use]
    pub fn build(self) -> IgnoreListMapper {
        IgnoreListMapper {
            entries: self.entries,
        }
    }
}

/// Suppresses chains containing a listed error.
#[derive(Debug, Clone, Default)]
pub struct IgnoreListMapper {
    entries: Vec<MappingEntry>,
}

impl IgnoreListMapper {
    /// Start building a mapper.
    #[must_use]
    pub fn builder() -> IgnoreListMapperBuilder {
        IgnoreListMapperBuilder::new()
    }

    /// The suppressed errors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.entries.iter().map(MappingEntry::key)
    }

    /// Number of suppressed errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is suppressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Mapper for IgnoreListMapper {
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        newest_first(err)
            .any(|candidate| self.entries.iter().any(|entry| entry.matches(candidate)))
            .then(|| MapOutcome::ignore(err))
    }

    fn name(&self) -> &str {
        "ignore"
    }
}
