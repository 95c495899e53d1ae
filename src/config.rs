//! Conventions that change how charts are derived and scored.
//!
//! The defaults reproduce the established behaviour. Every field is optional
//! when deserializing, so a config file only needs the switches it changes:
//!
//! ```
//! use bazi::config::{Config, PairCounting};
//!
//! let config = Config::from_json(r#"{"scoring": {"pair_counting": "distinct"}}"#).unwrap();
//! assert_eq!(PairCounting::Distinct, config.scoring.pair_counting);
//! ```

use serde::{Deserialize, Serialize};

/// How the day pillar counts a leap month that lies before the target month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapCounting {
    /// Only regular months are summed before the target month. A date inside
    /// the leap month adds the regular month it follows.
    #[default]
    Regular,
    /// Every elapsed month is summed, leap months included. Agrees with the
    /// civil sexagenary day.
    Elapsed,
}

/// How branch pairs between two charts are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairCounting {
    /// Every branch position of one chart against every branch position of
    /// the other. A branch repeated within a chart counts once per position.
    #[default]
    CrossProduct,
    /// Repeated branches within a chart are collapsed first.
    Distinct,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub leap_counting: LeapCounting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub pair_counting: PairCounting,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub scoring: ScoringConfig,
}

impl Config {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
