// SPDX-License-Identifier: MIT OR Apache-2.0
//! Exact-key strategy.

use std::collections::HashMap;

use errmap_core::{Error, HashKey};

use crate::{MapOutcome, Mapper, newest_first};

/// Accumulates key → target associations for a [`HashableMapper`].
#[derive(Debug, Clone, Default)]
pub struct HashableMapperBuilder {
    table: HashMap<HashKey, Error>,
}

impl HashableMapperBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `key` to `target`, replacing any target already registered for
    /// the same key.
    #[must_use]
    pub fn append(mut self, key: impl Into<Error>, target: impl Into<Error>) -> Self {
        self.table.insert(key.into().hash_key(), target.into());
        self
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> HashableMapper {
        HashableMapper { table: self.table }
    }
}

/// Maps errors by exact key.
///
/// Template-based errors match on their template, every other error on its
/// message; the two never match each other.
#[derive(Debug, Clone, Default)]
pub struct HashableMapper {
    table: HashMap<HashKey, Error>,
}

impl HashableMapper {
    /// Start building a mapper.
    #[must_use]
    pub fn builder() -> HashableMapperBuilder {
        HashableMapperBuilder::new()
    }

    /// The target registered for `key`.
    #[must_use]
    pub fn get(&self, key: &Error) -> Option<&Error> {
        self.table.get(&key.hash_key())
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no key is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over all associations, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&HashKey, &Error)> {
        self.table.iter()
    }
}

impl Mapper for HashableMapper {
    fn map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        newest_first(err)
            .find_map(|candidate| self.table.get(&candidate.hash_key()))
            .map(|target| MapOutcome::append(err, target))
    }

    fn name(&self) -> &str {
        "hashable"
    }
}
