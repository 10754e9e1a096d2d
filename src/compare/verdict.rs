//! Threshold and NaN checks turning per-frequency errors into a verdict.

use std::fmt;

use serde::Serialize;

use super::rmse::FrequencyErrors;

/// Outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }

    pub fn is_passed(self) -> bool {
        self == Self::Passed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one frequency fared against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyStatus {
    /// Both channels below the threshold.
    Passed,
    /// At least one channel at or above the threshold.
    AboveThreshold,
    /// An absolute error is NaN.
    NanEncountered,
    /// None of the comparisons above held.
    Unexpected,
    /// Only the test file has samples at this frequency.
    NotCompared,
}

impl FrequencyStatus {
    /// Whether this frequency fails the comparison. Frequencies that were
    /// not compared are reported but do not count either way.
    pub fn is_failure(self) -> bool {
        !matches!(self, Self::Passed | Self::NotCompared)
    }
}

/// Classify one frequency's errors.
///
/// Checks run in order: NaN, then `>= threshold` on either channel, then
/// `< threshold`. Anything that slips through all three is `Unexpected`.
pub fn classify(errors: &FrequencyErrors, threshold: f64) -> FrequencyStatus {
    let pp = errors.rmse_pp.norm();
    let tt = errors.rmse_tt.norm();

    if errors.has_nan() {
        FrequencyStatus::NanEncountered
    } else if pp >= threshold || tt >= threshold {
        FrequencyStatus::AboveThreshold
    } else if pp < threshold || tt < threshold {
        FrequencyStatus::Passed
    } else {
        FrequencyStatus::Unexpected
    }
}

/// Overall verdict from the status of every frequency.
///
/// Only compared frequencies count. If none was compared the comparison fails.
pub fn overall<I>(statuses: I) -> Verdict
where
    I: IntoIterator<Item = FrequencyStatus>,
{
    let mut seen = false;
    for status in statuses {
        if status == FrequencyStatus::NotCompared {
            continue;
        }
        seen = true;
        if status.is_failure() {
            return Verdict::Failed;
        }
    }
    if seen {
        Verdict::Passed
    } else {
        Verdict::Failed
    }
}
