// SPDX-License-Identifier: MIT OR Apache-2.0
//! Declarative configuration for errmap strategy combinators.
//!
//! [`ErrmapConfig`] lists strategies in priority order. [`build_multi_err`]
//! validates it and produces a ready [`MultiErr`]; soft problems come back as
//! [`ConfigWarning`]s from [`validate_config`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashSet;
use std::path::Path;

use errmap::{
    DEFAULT_INTERNAL_STATUS, Error, HashableMapper, IgnoreListMapper, ListMapper, Mapper,
    MultiErr, StatusError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Parser detail.
        reason: String,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Raw value.
        value: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Issues that do not prevent building a combinator but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No strategies are configured; every error passes through.
    NoStrategies,
    /// A strategy has no errors or rules.
    EmptyStrategy {
        /// Position in `strategies`.
        index: usize,
        /// Strategy type.
        kind: &'static str,
    },
    /// A status code outside the registered HTTP codes.
    NonStandardStatus {
        /// Where the status appears.
        location: String,
        /// The code.
        status: u16,
    },
    /// A status on a key; keys only match and their status is never used.
    StatusOnKey {
        /// Where the key appears.
        location: String,
    },
    /// A hashable key declared more than once; the last rule wins.
    DuplicateKey {
        /// Position in `strategies`.
        index: usize,
        /// The repeated key text.
        key: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::NoStrategies => {
                write!(f, "no strategies configured, errors pass through unchanged")
            }
            ConfigWarning::EmptyStrategy { index, kind } => {
                write!(f, "strategy {index} ({kind}) is empty")
            }
            ConfigWarning::NonStandardStatus { location, status } => {
                write!(f, "{location}: non-standard status {status}")
            }
            ConfigWarning::StatusOnKey { location } => {
                write!(f, "{location}: status on a key is ignored")
            }
            ConfigWarning::DuplicateKey { index, key } => {
                write!(f, "strategy {index}: key '{key}' declared more than once")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ErrmapConfig {
    /// Status for unmatched errors whose default carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_status: Option<u16>,

    /// Verbosity the host installs for the `errmap.*` targets
    /// (`"error"` .. `"trace"`). Read it through
    /// [`ErrmapConfig::level_filter`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Strategies in priority order.
    #[serde(default)]
    pub strategies: Vec<StrategyEntry>,
}

impl Default for ErrmapConfig {
    fn default() -> Self {
        Self {
            internal_status: None,
            log_level: Some("info".into()),
            strategies: Vec::new(),
        }
    }
}

impl ErrmapConfig {
    /// The effective internal status.
    #[must_use]
    pub fn effective_internal_status(&self) -> u16 {
        self.internal_status.unwrap_or(DEFAULT_INTERNAL_STATUS)
    }

    /// The configured log level as a [`LevelFilter`], or `None` when unset
    /// or not a recognised level.
    #[must_use]
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.as_deref()?.parse().ok()
    }
}

/// One strategy.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StrategyEntry {
    /// Suppress the listed errors.
    #[serde(rename = "ignore")]
    Ignore {
        /// Errors to suppress.
        #[serde(default)]
        errors: Vec<ErrorSpec>,
    },
    /// Ordered translation rules.
    #[serde(rename = "list")]
    List {
        /// Rules in priority order.
        #[serde(default)]
        rules: Vec<RuleSpec>,
    },
    /// Exact-key translation table.
    #[serde(rename = "hashable")]
    Hashable {
        /// Rules; a repeated key keeps the last target.
        #[serde(default)]
        rules: Vec<RuleSpec>,
    },
}

impl StrategyEntry {
    /// The `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            StrategyEntry::Ignore { .. } => "ignore",
            StrategyEntry::List { .. } => "list",
            StrategyEntry::Hashable { .. } => "hashable",
        }
    }

    /// Returns `true` if the strategy has nothing to match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            StrategyEntry::Ignore { errors } => errors.is_empty(),
            StrategyEntry::List { rules } | StrategyEntry::Hashable { rules } => rules.is_empty(),
        }
    }
}

/// An error written as either a literal message or a format template.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorSpec {
    /// Literal message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Format template; matches every error rendered from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Status to carry when used as a target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorSpec {
    /// A literal message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// A template.
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Self::default()
        }
    }

    /// Attach a status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Build the error, wrapping it in a [`StatusError`] when a status is set.
    pub fn to_error(&self) -> Result<Error, ConfigError> {
        let base = match (&self.message, &self.template) {
            (Some(message), None) => Error::new(message.as_str()),
            (None, Some(template)) => Error::template(template.as_str()),
            _ => {
                return Err(ConfigError::ValidationError {
                    reasons: vec!["exactly one of message or template is required".into()],
                });
            }
        };
        Ok(match self.status {
            Some(status) => StatusError::new(base, status).into(),
            None => base,
        })
    }

    /// Like [`to_error`](Self::to_error) but never attaches a status.
    pub fn to_key(&self) -> Result<Error, ConfigError> {
        Self {
            status: None,
            ..self.clone()
        }
        .to_error()
    }

    fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.template.as_deref())
            .unwrap_or_default()
    }
}

/// A key and the error it translates to.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct RuleSpec {
    /// Error to match.
    pub key: ErrorSpec,
    /// Error to append on a match.
    pub target: ErrorSpec,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

const ENV_INTERNAL_STATUS: &str = "ERRMAP_INTERNAL_STATUS";
const ENV_LOG_LEVEL: &str = "ERRMAP_LOG_LEVEL";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`ErrmapConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`ErrmapConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<ErrmapConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            let config = parse_toml(&content)?;
            debug!(
                target: "errmap.config",
                path = %p.display(),
                strategies = config.strategies.len(),
                "loaded config"
            );
            config
        }
        None => ErrmapConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a TOML string into an [`ErrmapConfig`].
pub fn parse_toml(content: &str) -> Result<ErrmapConfig, ConfigError> {
    toml::from_str::<ErrmapConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

/// JSON schema of [`ErrmapConfig`].
#[must_use]
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(ErrmapConfig)
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `ERRMAP_INTERNAL_STATUS`
/// - `ERRMAP_LOG_LEVEL`
pub fn apply_env_overrides(config: &mut ErrmapConfig) -> Result<(), ConfigError> {
    apply_overrides_from(config, |var| std::env::var(var).ok())
}

/// Apply overrides read through `lookup` instead of the process environment.
pub fn apply_overrides_from<F>(config: &mut ErrmapConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_INTERNAL_STATUS) {
        let status = val.trim().parse::<u16>().map_err(|_| ConfigError::InvalidEnv {
            var: ENV_INTERNAL_STATUS.into(),
            value: val.clone(),
        })?;
        config.internal_status = Some(status);
    }
    if let Some(val) = lookup(ENV_LOG_LEVEL) {
        config.log_level = Some(val);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_status(location: &str, status: u16, warnings: &mut Vec<ConfigWarning>) {
    let registered = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .is_some();
    if !registered {
        warnings.push(ConfigWarning::NonStandardStatus {
            location: location.to_string(),
            status,
        });
    }
}

fn check_spec(location: &str, spec: &ErrorSpec, errors: &mut Vec<String>) {
    match (&spec.message, &spec.template) {
        (Some(_), Some(_)) => errors.push(format!(
            "{location}: message and template are mutually exclusive"
        )),
        (None, None) => errors.push(format!("{location}: message or template is required")),
        (Some(text), None) | (None, Some(text)) if text.is_empty() => {
            errors.push(format!("{location}: must not be empty"));
        }
        _ => {}
    }
}

fn check_key(
    location: &str,
    key: &ErrorSpec,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ConfigWarning>,
) {
    check_spec(location, key, errors);
    if key.status.is_some() {
        warnings.push(ConfigWarning::StatusOnKey {
            location: location.to_string(),
        });
    }
}

fn check_target(
    location: &str,
    target: &ErrorSpec,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ConfigWarning>,
) {
    check_spec(location, target, errors);
    if let Some(status) = target.status {
        check_status(location, status, warnings);
    }
}

/// Validate a parsed configuration, returning advisory warnings.
///
/// Malformed error specs and unknown log levels are returned as a
/// [`ConfigError::ValidationError`]; soft issues come back as warnings.
pub fn validate_config(config: &ErrmapConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if let Some(status) = config.internal_status {
        check_status("internal_status", status, &mut warnings);
    }

    if config.strategies.is_empty() {
        warnings.push(ConfigWarning::NoStrategies);
    }

    for (index, strategy) in config.strategies.iter().enumerate() {
        if strategy.is_empty() {
            warnings.push(ConfigWarning::EmptyStrategy {
                index,
                kind: strategy.kind(),
            });
        }

        match strategy {
            StrategyEntry::Ignore { errors: listed } => {
                for (i, spec) in listed.iter().enumerate() {
                    let location = format!("strategies[{index}].errors[{i}]");
                    check_key(&location, spec, &mut errors, &mut warnings);
                }
            }
            StrategyEntry::List { rules } => {
                for (i, rule) in rules.iter().enumerate() {
                    let location = format!("strategies[{index}].rules[{i}]");
                    check_key(&format!("{location}.key"), &rule.key, &mut errors, &mut warnings);
                    check_target(
                        &format!("{location}.target"),
                        &rule.target,
                        &mut errors,
                        &mut warnings,
                    );
                }
            }
            StrategyEntry::Hashable { rules } => {
                let mut seen = HashSet::new();
                for (i, rule) in rules.iter().enumerate() {
                    let location = format!("strategies[{index}].rules[{i}]");
                    check_key(&format!("{location}.key"), &rule.key, &mut errors, &mut warnings);
                    check_target(
                        &format!("{location}.target"),
                        &rule.target,
                        &mut errors,
                        &mut warnings,
                    );
                    let key = (rule.key.template.is_some(), rule.key.text());
                    if !seen.insert(key) {
                        warnings.push(ConfigWarning::DuplicateKey {
                            index,
                            key: rule.key.text().to_string(),
                        });
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Scalars in `overlay` take precedence over `base`.
///
/// Strategies are concatenated, base first, so the overlay's strategies run
/// after the base's.
pub fn merge_configs(base: ErrmapConfig, overlay: ErrmapConfig) -> ErrmapConfig {
    let mut strategies = base.strategies;
    strategies.extend(overlay.strategies);
    ErrmapConfig {
        internal_status: overlay.internal_status.or(base.internal_status),
        log_level: overlay.log_level.or(base.log_level),
        strategies,
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

fn build_strategy(strategy: &StrategyEntry) -> Result<Box<dyn Mapper>, ConfigError> {
    let mapper: Box<dyn Mapper> = match strategy {
        StrategyEntry::Ignore { errors } => {
            let builder = errors
                .iter()
                .try_fold(IgnoreListMapper::builder(), |b, spec| {
                    Ok::<_, ConfigError>(b.append(spec.to_key()?))
                })?;
            Box::new(builder.build())
        }
        StrategyEntry::List { rules } => {
            let builder = rules.iter().try_fold(ListMapper::builder(), |b, rule| {
                Ok::<_, ConfigError>(b.append(rule.key.to_key()?, rule.target.to_error()?))
            })?;
            Box::new(builder.build())
        }
        StrategyEntry::Hashable { rules } => {
            let builder = rules
                .iter()
                .try_fold(HashableMapper::builder(), |b, rule| {
                    Ok::<_, ConfigError>(b.append(rule.key.to_key()?, rule.target.to_error()?))
                })?;
            Box::new(builder.build())
        }
    };
    Ok(mapper)
}

/// Validate `config` and build the combinator it describes.
///
/// Each warning is logged at `warn` level.
pub fn build_multi_err(config: &ErrmapConfig) -> Result<MultiErr, ConfigError> {
    for warning in validate_config(config)? {
        warn!(target: "errmap.config", %warning, "config warning");
    }

    let builder = config
        .strategies
        .iter()
        .try_fold(MultiErr::builder(), |b, strategy| {
            Ok::<_, ConfigError>(b.boxed(build_strategy(strategy)?))
        })?;
    let mappers = builder
        .internal_status(config.effective_internal_status())
        .build();
    debug!(target: "errmap.config", ?mappers, "built combinator");
    Ok(mappers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
