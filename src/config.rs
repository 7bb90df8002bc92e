//! Task queue configuration
//!
//! Limits enforced by [`TaskQueue`](crate::task::TaskQueue). Every field has a
//! default, so a partial TOML/JSON document or no document at all is valid.
//! Environment overrides are read by [`TaskQueueConfig::load`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TASKS: usize = 100;
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 50;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value is invalid
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "Invalid configuration for {}: '{}' ({})", key, value, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Limits and diagnostics for a task queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskQueueConfig {
    /// Most tasks the queue holds at once.
    pub max_tasks: usize,
    /// Longest accepted description, in characters.
    pub max_description_len: usize,
    /// Emit a `debug!` dump of the heap after every mutation.
    pub verbose: bool,
}

impl Default for TaskQueueConfig {
    fn default() -> Self {
        Self {
            max_tasks: DEFAULT_MAX_TASKS,
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            verbose: false,
        }
    }
}

impl TaskQueueConfig {
    /// Defaults overridden by `FIBQUEUE_MAX_TASKS`,
    /// `FIBQUEUE_MAX_DESCRIPTION_LEN` and `FIBQUEUE_VERBOSE`, then validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`load`](Self::load) with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            max_tasks: parse_var(&lookup, "FIBQUEUE_MAX_TASKS")?.unwrap_or(defaults.max_tasks),
            max_description_len: parse_var(&lookup, "FIBQUEUE_MAX_DESCRIPTION_LEN")?
                .unwrap_or(defaults.max_description_len),
            verbose: parse_var(&lookup, "FIBQUEUE_VERBOSE")?.unwrap_or(defaults.verbose),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tasks == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_tasks".into(),
                value: self.max_tasks.to_string(),
                reason: "must be at least 1".into(),
            });
        }
        if self.max_description_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_description_len".into(),
                value: self.max_description_len.to_string(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: name.to_string(),
                value: raw.clone(),
                reason: "not parseable".into(),
            }),
    }
}
