//! Complex RMS error metrics.
//!
//! Both metrics sum `|test − ref|²`, the squared magnitude of the complex
//! difference, never the complex square of the difference.

use num_complex::Complex64;
use serde::Serialize;

use super::grouping::FrequencyGroup;

/// Absolute RMS error `sqrt(mean |test[i] − ref[i]|²)`.
///
/// Zero when either sequence is empty.
pub fn rms_error(test: &[Complex64], reference: &[Complex64]) -> Complex64 {
    if test.is_empty() || reference.is_empty() {
        return Complex64::new(0.0, 0.0);
    }
    let (sum, count) = test
        .iter()
        .zip(reference)
        .fold((0.0, 0usize), |(sum, n), (t, r)| (sum + (t - r).norm_sqr(), n + 1));
    Complex64::new(sum / count as f64, 0.0).sqrt()
}

/// Relative RMS error `sqrt(Σ|test[i] − ref[i]|² / Σ|ref[i]|²)`.
///
/// `+∞` when either sequence is empty, so an empty comparison can never pass.
pub fn rms_error_relative(test: &[Complex64], reference: &[Complex64]) -> Complex64 {
    if test.is_empty() || reference.is_empty() {
        return Complex64::new(f64::INFINITY, 0.0);
    }
    let (diff, norm) = test
        .iter()
        .zip(reference)
        .fold((0.0, 0.0), |(diff, norm), (t, r)| {
            (diff + (t - r).norm_sqr(), norm + r.norm_sqr())
        });
    Complex64::new(diff / norm, 0.0).sqrt()
}

// ---------------------------------------------------------------------------
// FrequencyErrors – all four metrics for one frequency
// ---------------------------------------------------------------------------

/// Absolute and relative errors of both channels at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyErrors {
    pub rmse_pp: Complex64,
    pub rmse_tt: Complex64,
    pub rmse_pp_rel: Complex64,
    pub rmse_tt_rel: Complex64,
}

impl FrequencyErrors {
    pub fn compute(group: &FrequencyGroup) -> Self {
        Self {
            rmse_pp: rms_error(&group.pp_test, &group.pp_ref),
            rmse_tt: rms_error(&group.tt_test, &group.tt_ref),
            rmse_pp_rel: rms_error_relative(&group.pp_test, &group.pp_ref),
            rmse_tt_rel: rms_error_relative(&group.tt_test, &group.tt_ref),
        }
    }

    /// Placeholder for a frequency with no reference partner: all four
    /// errors are NaN, which exports as `null`.
    pub fn not_available() -> Self {
        let nan = Complex64::new(f64::NAN, 0.0);
        Self {
            rmse_pp: nan,
            rmse_tt: nan,
            rmse_pp_rel: nan,
            rmse_tt_rel: nan,
        }
    }

    /// Whether either absolute error is NaN.
    pub fn has_nan(&self) -> bool {
        self.rmse_pp.is_nan() || self.rmse_tt.is_nan()
    }
}
