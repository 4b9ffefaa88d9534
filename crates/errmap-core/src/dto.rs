// SPDX-License-Identifier: MIT OR Apache-2.0
//! Serialisable snapshot of a classified error.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::status::StatusError;

/// Serialisable view of an [`Error`] for responders and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    /// Rendered message.
    pub message: String,
    /// Template the message was rendered from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Status code, when the error carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Rendered cause of the status error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Rendered constituents of an aggregate, in append order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constituents: Vec<String>,
}

impl From<&Error> for ErrorDto {
    fn from(err: &Error) -> Self {
        let status = err.as_status();
        Self {
            message: err.to_string(),
            template: err.format_template().map(str::to_owned),
            status: status.map(StatusError::status),
            cause: status.and_then(StatusError::cause).map(ToString::to_string),
            constituents: crate::chain::constituents(err)
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl From<&StatusError> for ErrorDto {
    fn from(err: &StatusError) -> Self {
        Self {
            message: err.to_string(),
            template: err.inner().format_template().map(str::to_owned),
            status: Some(err.status()),
            cause: err.cause().map(ToString::to_string),
            constituents: Vec::new(),
        }
    }
}
