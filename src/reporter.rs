//! Presentation of comparison results.
//!
//! The comparison itself never prints; a [`Reporter`] receives the finished
//! [`ComparisonReport`] one frequency at a time.

use std::io::{self, Write};

use log::{info, warn};

use crate::compare::report::{ComparisonReport, FrequencyDiagnostic};
use crate::compare::verdict::FrequencyStatus;

/// Separator printed between frequency blocks.
pub const BOUNDARY: &str =
    "                                                         +------------------------------";
pub const NAN_MESSAGE: &str = "NaN Encountered.";
pub const UNEXPECTED_MESSAGE: &str = "Unexpected Error. Review Log Files.";
pub const HIGH_ERROR_MESSAGE: &str = "At least one of the RMSE values is unexpectedly high";

/// Receives comparison diagnostics.
pub trait Reporter {
    /// One frequency's result, in ascending frequency order.
    fn frequency(&mut self, diagnostic: &FrequencyDiagnostic) -> io::Result<()>;

    /// The two files shared no sample at all. Called before the frequencies.
    fn no_comparable_samples(&mut self, report: &ComparisonReport) -> io::Result<()>;

    /// Called once after all frequencies.
    fn finish(&mut self, _report: &ComparisonReport) -> io::Result<()> {
        Ok(())
    }

    /// Stream a whole report.
    fn emit(&mut self, report: &ComparisonReport) -> io::Result<()> {
        if report.summary.compared_samples == 0 {
            self.no_comparable_samples(report)?;
        }
        for diagnostic in &report.frequencies {
            self.frequency(diagnostic)?;
        }
        self.finish(report)
    }
}

/// Scientific notation with a signed exponent of at least two digits,
/// e.g. `1.5000e-04`.
fn sci(x: f64) -> String {
    let s = format!("{x:.4e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s.to_ascii_lowercase(),
    }
}

/// The two error lines of one frequency block.
fn error_lines(d: &FrequencyDiagnostic) -> (String, String) {
    let e = &d.errors;
    let (pp, pp_rel, tt, tt_rel) = if d.status == FrequencyStatus::NotCompared {
        let na = || "N/A".to_string();
        (na(), na(), na(), na())
    } else {
        (
            sci(e.rmse_pp.re),
            sci(e.rmse_pp_rel.re),
            sci(e.rmse_tt.re),
            sci(e.rmse_tt_rel.re),
        )
    };
    (
        format!(
            "    Phi-Phi Error (Rel. Error) = {pp} ( {pp_rel} ) | RMS Error at {} GHz",
            d.frequency
        ),
        format!(
            "Theta-Theta Error (Rel. Error) = {tt} ( {tt_rel} ) | {:.1}% inc/scatter coverage",
            d.coverage_percent
        ),
    )
}

// ---------------------------------------------------------------------------
// TextReporter – human-readable block format
// ---------------------------------------------------------------------------

/// Writes the classic text layout:
///
/// ```text
///                                                          +------------------------------
///     Phi-Phi Error (Rel. Error) = 1.2000e-04 ( 3.1000e-04 ) | RMS Error at 1 GHz
/// Theta-Theta Error (Rel. Error) = 9.0000e-05 ( 2.0000e-04 ) | 100.0% inc/scatter coverage
///                                                          +------------------------------
///     Phi-Phi Error (Rel. Error) = N/A ( N/A ) | RMS Error at 2 GHz
/// Theta-Theta Error (Rel. Error) = N/A ( N/A ) | 0.0% inc/scatter coverage
///                                                          +------------------------------
/// ```
pub struct TextReporter<W: Write> {
    out: W,
    blocks: usize,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, blocks: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn block(&mut self, d: &FrequencyDiagnostic) -> io::Result<()> {
        let (pp, tt) = error_lines(d);
        writeln!(self.out, "{BOUNDARY}")?;
        writeln!(self.out, "{pp}")?;
        writeln!(self.out, "{tt}")?;
        self.blocks += 1;
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn frequency(&mut self, d: &FrequencyDiagnostic) -> io::Result<()> {
        match d.status {
            FrequencyStatus::NanEncountered => writeln!(self.out, "{NAN_MESSAGE}"),
            FrequencyStatus::Unexpected => writeln!(self.out, "{UNEXPECTED_MESSAGE}"),
            FrequencyStatus::AboveThreshold => {
                writeln!(self.out, "{HIGH_ERROR_MESSAGE}")?;
                self.block(d)
            }
            FrequencyStatus::Passed | FrequencyStatus::NotCompared => self.block(d),
        }
    }

    fn no_comparable_samples(&mut self, report: &ComparisonReport) -> io::Result<()> {
        writeln!(
            self.out,
            "No comparable samples: {} and {} share no sample coordinates.",
            report.test_name, report.reference_name
        )
    }

    fn finish(&mut self, _report: &ComparisonReport) -> io::Result<()> {
        if self.blocks > 0 {
            writeln!(self.out, "{BOUNDARY}")?;
        }
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// LogReporter – diagnostics through the `log` facade
// ---------------------------------------------------------------------------

/// Sends every diagnostic to the `log` facade; failures at `warn` level.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn frequency(&mut self, d: &FrequencyDiagnostic) -> io::Result<()> {
        match d.status {
            FrequencyStatus::NanEncountered => warn!("{} GHz: {NAN_MESSAGE}", d.frequency),
            FrequencyStatus::Unexpected => warn!("{} GHz: {UNEXPECTED_MESSAGE}", d.frequency),
            FrequencyStatus::AboveThreshold => {
                let (pp, tt) = error_lines(d);
                warn!("{HIGH_ERROR_MESSAGE}");
                warn!("{pp}");
                warn!("{tt}");
            }
            FrequencyStatus::NotCompared => {
                let (pp, tt) = error_lines(d);
                warn!("{pp}");
                warn!("{tt}");
            }
            FrequencyStatus::Passed => {
                let (pp, tt) = error_lines(d);
                info!("{pp}");
                info!("{tt}");
            }
        }
        Ok(())
    }

    fn no_comparable_samples(&mut self, report: &ComparisonReport) -> io::Result<()> {
        warn!(
            "no comparable samples between {} and {}",
            report.test_name, report.reference_name
        );
        Ok(())
    }

    fn finish(&mut self, report: &ComparisonReport) -> io::Result<()> {
        info!(
            "{} vs {}: {} ({}/{} frequencies failed)",
            report.test_name,
            report.reference_name,
            report.verdict,
            report.summary.failed_frequencies,
            report.summary.frequency_count
        );
        Ok(())
    }
}
