//! Controller configuration.
//!
//! The configuration describes how the controller is wired rather than how it
//! behaves: which bit of the switch bus carries each input, which bit of the
//! LED register lights each lamp, and how much transition history to keep.
//!
//! Validation uses Stillwater's `Validation` so that every violation is
//! reported in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use traffic_phase::config::ControllerConfig;
//!
//! let config = ControllerConfig::from_json_str(r#"{ "history_limit": 16 }"#).unwrap();
//! assert_eq!(config.history_limit, 16);
//! assert_eq!(config.switches.power, 0);
//!
//! let broken = r#"{ "switches": { "power": 12, "emergency": 2 } }"#;
//! let err = ControllerConfig::from_json_str(broken).unwrap_err();
//! assert_eq!(err.violations().len(), 2);
//! ```

pub mod error;

pub use error::{ConfigError, ConfigViolation};

use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Width of both the switch bus and the LED register.
pub const BUS_WIDTH: u8 = 10;

/// Default number of committed transitions kept in memory.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Bit positions of the controller inputs on the switch bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchMap {
    pub power: u8,
    pub emergency: u8,
    pub red: u8,
    pub yellow: u8,
    pub green: u8,
}

impl Default for SwitchMap {
    fn default() -> Self {
        Self {
            power: 0,
            emergency: 1,
            red: 2,
            yellow: 3,
            green: 4,
        }
    }
}

impl SwitchMap {
    fn lines(&self) -> [(&'static str, u8); 5] {
        [
            ("power", self.power),
            ("emergency", self.emergency),
            ("red", self.red),
            ("yellow", self.yellow),
            ("green", self.green),
        ]
    }
}

/// Bit positions of the lamps in the LED register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampMap {
    pub power: u8,
    pub emergency: u8,
    pub red: u8,
    pub yellow: u8,
    pub green: u8,
}

impl Default for LampMap {
    fn default() -> Self {
        Self {
            power: 0,
            emergency: 1,
            red: 2,
            yellow: 3,
            green: 4,
        }
    }
}

impl LampMap {
    fn lines(&self) -> [(&'static str, u8); 5] {
        [
            ("power", self.power),
            ("emergency", self.emergency),
            ("red", self.red),
            ("yellow", self.yellow),
            ("green", self.green),
        ]
    }
}

/// Complete controller configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub switches: SwitchMap,
    pub lamps: LampMap,
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            switches: SwitchMap::default(),
            lamps: LampMap::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate, reporting every violation at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.validation() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Run all checks, accumulating ALL violations.
    pub fn validation(&self) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        checks.extend(check_map("switches", &self.switches.lines()));
        checks.extend(check_map("lamps", &self.lamps.lines()));

        checks.push(if self.history_limit == 0 {
            Validation::fail(ConfigViolation::ZeroHistoryLimit)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }
}

fn check_map(map: &'static str, lines: &[(&'static str, u8)]) -> Vec<Check> {
    let mut checks = Vec::new();

    for &(line, bit) in lines {
        checks.push(if bit >= BUS_WIDTH {
            Validation::fail(ConfigViolation::BitOutOfRange {
                map,
                line,
                bit,
                width: BUS_WIDTH,
            })
        } else {
            Validation::success(())
        });
    }

    for (i, &(first, bit)) in lines.iter().enumerate() {
        for &(second, other) in &lines[i + 1..] {
            if bit == other {
                checks.push(Validation::fail(ConfigViolation::DuplicateBit {
                    map,
                    first,
                    second,
                    bit,
                }));
            }
        }
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.validation().is_success());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = ControllerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());

        let config = ControllerConfig::from_json_str(r#"{ "lamps": { "green": 9 } }"#).unwrap();
        assert_eq!(config.lamps.green, 9);
        assert_eq!(config.lamps.red, 2);
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = ControllerConfig {
            switches: SwitchMap {
                power: 10,
                emergency: 3,
                ..SwitchMap::default()
            },
            lamps: LampMap::default(),
            history_limit: 0,
        };

        let err = config.validate().unwrap_err();
        let violations = err.violations();

        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&ConfigViolation::BitOutOfRange {
            map: "switches",
            line: "power",
            bit: 10,
            width: BUS_WIDTH,
        }));
        assert!(violations.contains(&ConfigViolation::DuplicateBit {
            map: "switches",
            first: "emergency",
            second: "yellow",
            bit: 3,
        }));
        assert!(violations.contains(&ConfigViolation::ZeroHistoryLimit));
    }

    #[test]
    fn lamp_map_is_checked_independently() {
        let config = ControllerConfig {
            lamps: LampMap {
                red: 4,
                ..LampMap::default()
            },
            ..ControllerConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.violations(),
            &[ConfigViolation::DuplicateBit {
                map: "lamps",
                first: "red",
                second: "green",
                bit: 4,
            }]
        );
    }

    #[test]
    fn invalid_error_lists_violations() {
        let err = ConfigError::Invalid(vec![ConfigViolation::ZeroHistoryLimit]);
        assert_eq!(
            err.to_string(),
            "Configuration has 1 violation(s): history_limit must be at least 1"
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ControllerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.violations().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("controller.json");
        std::fs::write(&path, r#"{ "history_limit": 4 }"#).unwrap();

        let config = ControllerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.history_limit, 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControllerConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = ControllerConfig {
            history_limit: 32,
            ..ControllerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ControllerConfig::from_json_str(&json).unwrap(), config);
    }
}
