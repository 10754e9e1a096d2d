//! Comparison report: per-frequency diagnostics plus summary, exportable as
//! JSON or CSV.

use std::io::Write;

use serde::Serialize;

use super::rmse::FrequencyErrors;
use super::verdict::{FrequencyStatus, Verdict};
use crate::error::Result;

/// Result of one frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyDiagnostic {
    /// Frequency in GHz.
    pub frequency: f64,
    pub status: FrequencyStatus,
    /// Samples compared at this frequency.
    pub compared: usize,
    /// Share of the test samples at this frequency that had a reference
    /// partner, in percent.
    pub coverage_percent: f64,
    #[serde(flatten)]
    pub errors: FrequencyErrors,
}

/// Summary statistics for a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    /// Distinct samples in the test file.
    pub test_samples: usize,
    /// Distinct samples in the reference file.
    pub reference_samples: usize,
    /// Samples present in both.
    pub compared_samples: usize,
    pub frequency_count: usize,
    pub failed_frequencies: usize,
    /// Test frequencies with no reference partner at all.
    pub not_compared_frequencies: usize,
    /// Largest absolute RMS error over both channels and all frequencies.
    pub worst_rmse: f64,
}

/// Complete comparison report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub test_name: String,
    pub reference_name: String,
    pub threshold: f64,
    pub verdict: Verdict,
    pub frequencies: Vec<FrequencyDiagnostic>,
    pub summary: ComparisonSummary,
}

/// Flat CSV row, one per frequency.
#[derive(Serialize)]
struct CsvRow<'a> {
    frequency: f64,
    status: &'a FrequencyStatus,
    compared: usize,
    coverage_percent: f64,
    rmse_pp: f64,
    rmse_tt: f64,
    rmse_pp_rel: f64,
    rmse_tt_rel: f64,
}

impl ComparisonReport {
    pub fn passed(&self) -> bool {
        self.verdict.is_passed()
    }

    /// Diagnostics of the frequencies that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FrequencyDiagnostic> {
        self.frequencies.iter().filter(|d| d.status.is_failure())
    }

    /// Pretty-printed JSON. Non-finite errors are written as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One CSV row per frequency with the magnitudes of the four errors.
    /// Uncompared frequencies carry `NaN` errors.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for d in &self.frequencies {
            csv.serialize(CsvRow {
                frequency: d.frequency,
                status: &d.status,
                compared: d.compared,
                coverage_percent: d.coverage_percent,
                rmse_pp: d.errors.rmse_pp.norm(),
                rmse_tt: d.errors.rmse_tt.norm(),
                rmse_pp_rel: d.errors.rmse_pp_rel.norm(),
                rmse_tt_rel: d.errors.rmse_tt_rel.norm(),
            })?;
        }
        csv.flush()?;
        Ok(())
    }
}
