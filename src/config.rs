//! Comparison settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::loader::COMMENT_MARKER;
use crate::error::{Error, Result};

/// Largest accepted RMS error for the standard accuracy level.
pub const LEGO_ACCURACY_THRESHOLD: f64 = 1e-3;
/// Largest accepted RMS error for the strict accuracy level.
pub const SWITCH_ACCURACY_THRESHOLD: f64 = 1e-4;
/// Default pass/fail threshold.
pub const THRESHOLD: f64 = LEGO_ACCURACY_THRESHOLD;

/// Named threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyProfile {
    #[default]
    Lego,
    Switch,
}

impl AccuracyProfile {
    pub fn threshold(self) -> f64 {
        match self {
            Self::Lego => LEGO_ACCURACY_THRESHOLD,
            Self::Switch => SWITCH_ACCURACY_THRESHOLD,
        }
    }
}

/// Complete comparison configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Pass/fail threshold on the absolute RMS error of each channel.
    pub threshold: f64,
    /// Round key coordinates to this many decimals before matching samples
    /// (None = exact match).
    pub key_decimals: Option<u32>,
    /// Lines containing this character are comments.
    pub comment_marker: char,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            key_decimals: None,
            comment_marker: COMMENT_MARKER,
        }
    }
}

impl ComparisonConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Use the threshold of a named profile.
    pub fn with_profile(mut self, profile: AccuracyProfile) -> Self {
        self.threshold = profile.threshold();
        self
    }

    /// Use a custom threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Match keys after rounding to `decimals` places.
    pub fn with_key_decimals(mut self, decimals: u32) -> Self {
        self.key_decimals = Some(decimals);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::Config(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        if let Some(d) = self.key_decimals {
            if d > 15 {
                return Err(Error::Config(format!(
                    "key_decimals must be at most 15, got {d}"
                )));
            }
        }
        // Letters are out as well: `e`, `nan` and `inf` are valid in numbers.
        if self.comment_marker.is_whitespace()
            || self.comment_marker.is_alphanumeric()
            || matches!(self.comment_marker, '.' | '-' | '+')
        {
            return Err(Error::Config(format!(
                "comment marker {:?} would clash with numeric data",
                self.comment_marker
            )));
        }
        Ok(())
    }
}
