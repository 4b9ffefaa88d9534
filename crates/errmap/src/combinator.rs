// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered strategy combinator and status propagation.

use std::fmt;
use std::sync::Arc;

use errmap_core::{DEFAULT_INTERNAL_STATUS, Error, StatusError, chain};
use errmap_strategy::{MapOutcome, Mapper};
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// MultiErrConfig
// ---------------------------------------------------------------------------

/// Settings of a [`MultiErr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiErrConfig {
    /// Status attached to an unmatched error whose default carries none.
    pub internal_status: u16,
}

impl Default for MultiErrConfig {
    fn default() -> Self {
        Self {
            internal_status: DEFAULT_INTERNAL_STATUS,
        }
    }
}

// ---------------------------------------------------------------------------
// MultiErr
// ---------------------------------------------------------------------------

/// Where a chain landed after trying every mapper.
enum Resolution {
    Ignored,
    Matched(Option<StatusError>),
    Unmatched,
}

/// Tries an ordered list of [`Mapper`]s and applies the first match.
///
/// The order is the priority: list an ignore mapper first for suppression to
/// win over translation. The list is fixed at construction and shared between
/// clones.
#[derive(Clone)]
pub struct MultiErr {
    mappers: Arc<[Box<dyn Mapper>]>,
    config: MultiErrConfig,
}

impl MultiErr {
    /// A combinator over `mappers` with the default configuration.
    pub fn new<I>(mappers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Mapper>>,
    {
        Self::with_config(mappers, MultiErrConfig::default())
    }

    /// A combinator over `mappers` with `config`.
    pub fn with_config<I>(mappers: I, config: MultiErrConfig) -> Self
    where
        I: IntoIterator<Item = Box<dyn Mapper>>,
    {
        Self {
            mappers: mappers.into_iter().collect(),
            config,
        }
    }

    /// Start building a combinator.
    #[must_use]
    pub fn builder() -> MultiErrBuilder {
        MultiErrBuilder::default()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MultiErrConfig {
        &self.config
    }

    /// Number of mappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Returns `true` if there are no mappers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Mapper names in priority order.
    pub fn mapper_names(&self) -> impl Iterator<Item = &str> {
        self.mappers.iter().map(|m| m.name())
    }

    /// The outcome of the first mapper, in list order, that matches `err`.
    pub fn try_map<'a>(&'a self, err: &'a Error) -> Option<MapOutcome<'a>> {
        self.mappers.iter().enumerate().find_map(|(index, mapper)| {
            trace!(target: "errmap.combinator", index, mapper = mapper.name(), "trying mapper");
            let outcome = mapper.map(err)?;
            debug!(
                target: "errmap.combinator",
                index,
                mapper = mapper.name(),
                ignore = outcome.is_ignore(),
                "error matched"
            );
            Some(outcome)
        })
    }

    /// Map `err` through the mappers.
    ///
    /// * `None` in, `None` out.
    /// * On a match, the outcome is applied: `None` when ignored, otherwise
    ///   `err` with the target appended.
    /// * Without a match, `default` is appended to `err` when given;
    ///   otherwise `err` comes back unchanged.
    #[must_use]
    pub fn mapped(&self, err: Option<Error>, default: Option<Error>) -> Option<Error> {
        let err = err?;
        if let Some(outcome) = self.try_map(&err) {
            return outcome.apply();
        }
        match default {
            Some(default) => {
                debug!(
                    target: "errmap.combinator",
                    %default,
                    "no mapper matched, appending default"
                );
                chain::append(Some(err), Some(default))
            }
            None => {
                trace!(target: "errmap.combinator", "no mapper matched");
                Some(err)
            }
        }
    }

    /// The target `err` resolves to, without the original chain.
    ///
    /// `None` when nothing matches or when the match is an ignore.
    #[must_use]
    pub fn last_mapped(&self, err: &Error) -> Option<Error> {
        self.try_map(err).and_then(MapOutcome::into_last)
    }

    /// Map `err` to a status-bearing error.
    ///
    /// * `None` in, or an ignore match: `None`.
    /// * No match: a status-bearing `default` keeps its own status, a plain
    ///   one gets [`MultiErrConfig::internal_status`], no default gives `None`.
    /// * A match: the target's status error, or `None` when the target carries
    ///   no status.
    ///
    /// The returned error's cause is always `err`.
    #[must_use]
    pub fn mapped_with_status(
        &self,
        err: Option<Error>,
        default: Option<Error>,
    ) -> Option<StatusError> {
        let err = err?;
        let resolution = match self.try_map(&err) {
            Some(outcome) if outcome.is_ignore() => Resolution::Ignored,
            Some(outcome) => {
                Resolution::Matched(outcome.last().and_then(Error::as_status).cloned())
            }
            None => Resolution::Unmatched,
        };

        let status = match resolution {
            Resolution::Ignored => None,
            Resolution::Matched(status) => status,
            Resolution::Unmatched => default.map(|default| match default.as_status() {
                Some(status) => status.clone(),
                None => StatusError::new(default, self.config.internal_status),
            }),
        }?;

        debug!(target: "errmap.status", code = status.status(), error = %status, "status resolved");
        Some(status.with_cause(err))
    }

    /// Alias for `mapped_with_status(err, None)`.
    #[deprecated(note = "use `mapped_with_status` with an explicit default")]
    #[must_use]
    pub fn last_mapped_with_status(&self, err: Option<Error>) -> Option<StatusError> {
        self.mapped_with_status(err, None)
    }
}

impl fmt::Debug for MultiErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiErr")
            .field("mappers", &self.mapper_names().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// MultiErrBuilder
// ---------------------------------------------------------------------------

/// Builder for [`MultiErr`].
#[derive(Default)]
pub struct MultiErrBuilder {
    mappers: Vec<Box<dyn Mapper>>,
    config: MultiErrConfig,
}

impl MultiErrBuilder {
    /// Append a mapper; earlier mappers take priority.
    #[must_use]
    pub fn mapper(self, mapper: impl Mapper + 'static) -> Self {
        self.boxed(Box::new(mapper))
    }

    /// Append an already boxed mapper.
    #[must_use]
    pub fn boxed(mut self, mapper: Box<dyn Mapper>) -> Self {
        self.mappers.push(mapper);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: MultiErrConfig) -> Self {
        self.config = config;
        self
    }

    /// Set [`MultiErrConfig::internal_status`].
    #[must_use]
    pub fn internal_status(mut self, status: u16) -> Self {
        self.config.internal_status = status;
        self
    }

    /// Freeze the mapper list.
    #[must_use]
    pub fn build(self) -> MultiErr {
        MultiErr::with_config(self.mappers, self.config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
