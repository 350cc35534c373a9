//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{map}.{line} uses bit {bit}, but the bus is only {width} bits wide")]
    BitOutOfRange {
        map: &'static str,
        line: &'static str,
        bit: u8,
        width: u8,
    },

    #[error("{map}.{first} and {map}.{second} both use bit {bit}")]
    DuplicateBit {
        map: &'static str,
        first: &'static str,
        second: &'static str,
        bit: u8,
    },

    #[error("history_limit must be at least 1")]
    ZeroHistoryLimit,
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration has {} violation(s): {}", .0.len(), join_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

impl ConfigError {
    /// The violations behind an `Invalid` error, empty for the other variants.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
