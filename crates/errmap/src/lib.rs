// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # errmap
//!
//! Ordered strategy combinator and status propagation, plus re-exports of the
//! error model and the built-in strategies.

mod combinator;

pub use combinator::{MultiErr, MultiErrBuilder, MultiErrConfig};

pub use errmap_core::{
    Chain, DEFAULT_INTERNAL_STATUS, Error, ErrorDto, FormattedError, HashKey, PlainError,
    StatusError, chain, equal, errorf,
};
pub use errmap_strategy::{
    HashableMapper, HashableMapperBuilder, IgnoreListMapper, IgnoreListMapperBuilder, ListMapper,
    ListMapperBuilder, MapOutcome, Mapper, MappingEntry, newest_first,
};
