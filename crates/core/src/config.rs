//! Rules configuration
//!
//! Every tunable constant of the ruleset lives in [`RulesConfig`]. The defaults
//! are the canonical values from `cheza_types`; a JSON document may override any
//! subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    COMBO_BASE, DEFAULT_ARE_MS, DEFAULT_ARR_MS, DEFAULT_DAS_MS, DEFAULT_LINE_CLEAR_MS,
    DEFAULT_PREVIEW_COUNT, DEFAULT_SOFT_DROP_INTERVAL_MS, FALL_SPEEDS_MS, HARD_DROP_POINTS,
    LINES_PER_LEVEL, LINE_SCORES, MAX_PREVIEW_COUNT, SOFT_DROP_POINTS, TSPIN_SCORES,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rules json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fall speed table is empty")]
    EmptySpeedTable,
    #[error("fall speed table increases at level {level}")]
    SpeedTableIncreasing { level: usize },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{0} table is empty")]
    EmptyScoreTable(&'static str),
    #[error("preview count {0} is outside 1..=7")]
    PreviewCount(usize),
}

/// Timing, scoring and leveling parameters for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub preview_count: usize,
    pub are_ms: u32,
    pub line_clear_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub soft_drop_interval_ms: u32,
    /// Fall threshold per level, index 0 = level 1
    pub fall_speeds_ms: Vec<u32>,
    /// Base points by simultaneous lines (index = lines)
    pub line_scores: Vec<u32>,
    /// T-spin points by lines (index = lines)
    pub tspin_scores: Vec<u32>,
    pub combo_base: u32,
    pub soft_drop_points: u32,
    pub hard_drop_points: u32,
    pub lines_per_level: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            preview_count: DEFAULT_PREVIEW_COUNT,
            are_ms: DEFAULT_ARE_MS,
            line_clear_ms: DEFAULT_LINE_CLEAR_MS,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_interval_ms: DEFAULT_SOFT_DROP_INTERVAL_MS,
            fall_speeds_ms: FALL_SPEEDS_MS.to_vec(),
            line_scores: LINE_SCORES.to_vec(),
            tspin_scores: TSPIN_SCORES.to_vec(),
            combo_base: COMBO_BASE,
            soft_drop_points: SOFT_DROP_POINTS,
            hard_drop_points: HARD_DROP_POINTS,
            lines_per_level: LINES_PER_LEVEL,
        }
    }
}

impl RulesConfig {
    /// Parse and validate a JSON document
    ///
    /// ```
    /// use cheza_core::RulesConfig;
    ///
    /// let config = RulesConfig::from_json_str(r#"{ "are_ms": 0, "preview_count": 3 }"#).unwrap();
    /// assert_eq!(config.are_ms, 0);
    /// assert_eq!(config.preview_count, 3);
    /// assert_eq!(config.das_ms, 150);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PREVIEW_COUNT).contains(&self.preview_count) {
            return Err(ConfigError::PreviewCount(self.preview_count));
        }
        if self.fall_speeds_ms.is_empty() {
            return Err(ConfigError::EmptySpeedTable);
        }
        if let Some(i) = self.fall_speeds_ms.windows(2).position(|w| w[1] > w[0]) {
            return Err(ConfigError::SpeedTableIncreasing { level: i + 2 });
        }
        if self.fall_speeds_ms.contains(&0) {
            return Err(ConfigError::Zero("fall_speeds_ms"));
        }
        if self.arr_ms == 0 {
            return Err(ConfigError::Zero("arr_ms"));
        }
        if self.soft_drop_interval_ms == 0 {
            return Err(ConfigError::Zero("soft_drop_interval_ms"));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::Zero("lines_per_level"));
        }
        if self.line_scores.is_empty() {
            return Err(ConfigError::EmptyScoreTable("line_scores"));
        }
        if self.tspin_scores.is_empty() {
            return Err(ConfigError::EmptyScoreTable("tspin_scores"));
        }
        Ok(())
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u32 {
        self.fall_speeds_ms.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RulesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_level(), 10);
        assert_eq!(config.preview_count, 5);
    }

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(
            RulesConfig::from_json_str("{}").unwrap(),
            RulesConfig::default()
        );
    }

    #[test]
    fn rejects_bad_tables() {
        let err = RulesConfig::from_json_str(r#"{ "fall_speeds_ms": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySpeedTable));

        let err = RulesConfig::from_json_str(r#"{ "fall_speeds_ms": [500, 600] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::SpeedTableIncreasing { level: 2 }));

        let err = RulesConfig::from_json_str(r#"{ "line_scores": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyScoreTable("line_scores")));
    }

    #[test]
    fn rejects_zero_intervals_and_preview() {
        let err = RulesConfig::from_json_str(r#"{ "arr_ms": 0 }"#).unwrap_err();
        assert_eq!(err.to_string(), "arr_ms must be greater than zero");

        let err = RulesConfig::from_json_str(r#"{ "preview_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PreviewCount(0)));

        let err = RulesConfig::from_json_str(r#"{ "preview_count": 8 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PreviewCount(8)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = RulesConfig::from_json_str("{ are_ms: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RulesConfig::from_json_file("/nonexistent/cheza-rules.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
