// SPDX-License-Identifier: MIT OR Apache-2.0
//! Equivalence-based strategy for template errors and anything else that is
//! not usable as an exact key.

use errmap_core::Error;

use crate::{MapOutcome, MappingEntry, Mapper, newest_first};

/// Accumulates ordered key → target entries for a [`ListMapper`].
#[derive(Debug, Clone, Default)]
pub struct ListMapperBuilder {
    entries: Vec<MappingEntry>,
}

impl ListMapperBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every error equivalent to `key` to `target`.
    #[must_use]
    pub fn append(mut self, key: impl Into<Error>, target: impl Into<Error>) -> Self {
        self.entries.push(MappingEntry::new(key, target));
        self
    }

    /// Map every error rendered from `template` to `target`.
    #[must_use]
    pub fn append_template(self, template: impl Into<String>, target: impl Into<Error>) -> Self {
        self.append(Error::template(template), target)
    }

    /// Freeze the entries.
    #[must_use]
    pub fn build(self) -> ListMapper {
        ListMapper {
            entries: self.entries,
        }
    }
}

/// Maps errors by equivalence, trying entries in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ListMapper {
    entries: Vec<MappingEntry>,
}

impl ListMapper {
    /// Start building a mapper.
    #[must_use]
    pub fn builder() -> ListMapperBuilder {
        ListMapperBuilder::new()
    }

    /// The entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Mapper for ListMapper {
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        newest_first(err).find_map(|candidate| {
            self.entries
                .iter()
                .filter(|entry| entry.matches(candidate))
                .find_map(MappingEntry::target)
                .map(|target| MapOutcome::append(err, target))
        })
    }

    fn name(&self) -> &str {
        "list"
    }
}
