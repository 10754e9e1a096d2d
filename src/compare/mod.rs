//! Comparison logic: group aligned samples by frequency, compute the RMS
//! errors of each group and judge them against the threshold.

pub mod grouping;
pub mod report;
pub mod rmse;
pub mod verdict;

use std::cmp::Ordering;

use log::debug;

pub use grouping::{FrequencyGroup, group_by_frequency};
pub use report::{ComparisonReport, ComparisonSummary, FrequencyDiagnostic};
pub use rmse::{FrequencyErrors, rms_error, rms_error_relative};
pub use verdict::{FrequencyStatus, Verdict, classify, overall};

use crate::data::align::{align, coverage};
use crate::data::model::Dataset;

/// Compare a test dataset against a reference dataset.
///
/// Every test frequency is reported, even after one has failed, so the report
/// is complete. Frequencies without any reference partner are listed as
/// [`FrequencyStatus::NotCompared`] and do not take part in the verdict.
pub fn compare_datasets(test: &Dataset, reference: &Dataset, threshold: f64) -> ComparisonReport {
    let pair = align(test, reference);
    let groups = group_by_frequency(&pair);
    let mut groups = groups.iter().peekable();

    // Aligned frequencies are a subset of the test frequencies, both ascending.
    let frequencies: Vec<FrequencyDiagnostic> = coverage(test, reference)
        .iter()
        .map(|cov| {
            let group =
                groups.next_if(|g| g.frequency.total_cmp(&cov.frequency) == Ordering::Equal);
            match group {
                Some(group) => {
                    let errors = FrequencyErrors::compute(group);
                    let status = classify(&errors, threshold);
                    debug!(
                        "{} GHz: {} samples, |pp|={:.4e} |tt|={:.4e} -> {:?}",
                        group.frequency,
                        group.len(),
                        errors.rmse_pp.norm(),
                        errors.rmse_tt.norm(),
                        status
                    );
                    FrequencyDiagnostic {
                        frequency: group.frequency,
                        status,
                        compared: group.len(),
                        coverage_percent: cov.percent(),
                        errors,
                    }
                }
                None => {
                    debug!(
                        "{} GHz: no reference partner for {} samples",
                        cov.frequency, cov.not_compared
                    );
                    FrequencyDiagnostic {
                        frequency: cov.frequency,
                        status: FrequencyStatus::NotCompared,
                        compared: 0,
                        coverage_percent: 0.0,
                        errors: FrequencyErrors::not_available(),
                    }
                }
            }
        })
        .collect();

    let verdict = overall(frequencies.iter().map(|d| d.status));
    let worst_rmse = frequencies
        .iter()
        .filter(|d| d.status != FrequencyStatus::NotCompared)
        .flat_map(|d| [d.errors.rmse_pp.norm(), d.errors.rmse_tt.norm()])
        .fold(0.0_f64, f64::max);

    ComparisonReport {
        test_name: test.name.clone(),
        reference_name: reference.name.clone(),
        threshold,
        verdict,
        summary: ComparisonSummary {
            test_samples: test.len(),
            reference_samples: reference.len(),
            compared_samples: pair.len(),
            frequency_count: frequencies.len(),
            failed_frequencies: frequencies.iter().filter(|d| d.status.is_failure()).count(),
            not_compared_frequencies: frequencies
                .iter()
                .filter(|d| d.status == FrequencyStatus::NotCompared)
                .count(),
            worst_rmse,
        },
        frequencies,
    }
}
