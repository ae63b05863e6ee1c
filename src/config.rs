//! Analysis configuration.
//!
//! Defaults can be overridden from a JSON file and then from command-line flags:
//!
//! ```json
//! {
//!   "allowed_gap_for_fragmented_recovery": 100,
//!   "overlap_threshold": 0.9,
//!   "min_region_length": 0,
//!   "completeness_margin": 0,
//!   "product_mapping": { "NRP": ["NRPS", "NRPS-like"] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::analysis::products::ProductMapping;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Default gap (bp) bridged between fragments of a recovered reference region
pub const DEFAULT_ALLOWED_GAP: i64 = 100;

/// Default fraction of a region that must be covered for it to count as overlapped
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.9;

/// Configuration for the analysis engines and input processing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Largest gap (bp) between fragments that still counts as contiguous
    pub allowed_gap_for_fragmented_recovery: i64,

    /// Minimum directional coverage for two regions to be considered overlapping
    pub overlap_threshold: f64,

    /// Regions shorter than this are dropped after parsing
    pub min_region_length: i64,

    /// Distance (bp) from a sequence edge under which a region is incomplete
    pub completeness_margin: i64,

    /// Main product class -> product labels it groups
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub product_mapping: BTreeMap<String, Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            allowed_gap_for_fragmented_recovery: DEFAULT_ALLOWED_GAP,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            min_region_length: 0,
            completeness_margin: 0,
            product_mapping: BTreeMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::ParseError` if it is not valid JSON, or
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for invalid JSON or
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(ConfigError::Invalid(format!(
                "overlap_threshold must be in [0, 1], got {}",
                self.overlap_threshold
            )));
        }
        for (name, value) in [
            (
                "allowed_gap_for_fragmented_recovery",
                self.allowed_gap_for_fragmented_recovery,
            ),
            ("min_region_length", self.min_region_length),
            ("completeness_margin", self.completeness_margin),
        ] {
            if value < 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn product_mapping(&self) -> ProductMapping {
        ProductMapping::from_classes(&self.product_mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.allowed_gap_for_fragmented_recovery, 100);
        assert!((config.overlap_threshold - 0.9).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{"min_region_length": 500}"#).unwrap();
        assert_eq!(config.min_region_length, 500);
        assert_eq!(config.allowed_gap_for_fragmented_recovery, 100);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = AnalysisConfig::from_json(r#"{"overlap_threshold": 1.2}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_gap_rejected() {
        let err = AnalysisConfig::from_json(r#"{"allowed_gap_for_fragmented_recovery": -1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("allowed_gap_for_fragmented_recovery"));
    }

    #[test]
    fn test_load_from_file_with_mapping() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"{{"overlap_threshold": 0.5, "product_mapping": {{"NRP": ["NRPS"]}}}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = AnalysisConfig::load_from_file(file.path()).unwrap();
        assert!((config.overlap_threshold - 0.5).abs() < 1e-9);
        let mapping = config.product_mapping();
        assert_eq!(mapping.map_products(&["NRPS".to_string()]), vec!["NRP"]);
    }
}
