//! Pass/fail validation of radar cross-section (RCS) simulation output.
//!
//! A test plot file is compared against a trusted reference plot file:
//! - both files are parsed into samples keyed by frequency and angles,
//! - dB/phase pairs become complex scattering amplitudes,
//! - the two sample sets are reduced to their shared coordinates,
//! - complex RMS errors are computed per frequency for the phi-phi and
//!   theta-theta channels,
//! - the errors are checked against a threshold to give a [`Verdict`].

pub mod compare;
pub mod config;
pub mod data;
pub mod error;
pub mod reporter;

use std::path::Path;

use log::debug;

pub use compare::{ComparisonReport, FrequencyDiagnostic, FrequencyStatus, Verdict, compare_datasets};
pub use config::{AccuracyProfile, ComparisonConfig, THRESHOLD};
pub use error::{Error, Result};
pub use reporter::{LogReporter, Reporter, TextReporter};

use data::loader::{load_file, parse_records};
use data::transform::build_dataset;

/// Compare two plot files already read into memory.
///
/// `*_name` label the sources in errors and in the report.
pub fn compare_sources(
    test_text: &str,
    test_name: &str,
    reference_text: &str,
    reference_name: &str,
    config: &ComparisonConfig,
    reporter: &mut dyn Reporter,
) -> Result<ComparisonReport> {
    config.validate()?;

    let reference_rows = parse_records(reference_text, reference_name, config.comment_marker)?;
    let reference = build_dataset(&reference_rows, reference_name, config.key_decimals)?;
    let test_rows = parse_records(test_text, test_name, config.comment_marker)?;
    let test = build_dataset(&test_rows, test_name, config.key_decimals)?;

    finish(&test, &reference, config, reporter)
}

/// Compare a test plot file against a reference plot file.
pub fn compare_files(
    test: &Path,
    reference: &Path,
    config: &ComparisonConfig,
    reporter: &mut dyn Reporter,
) -> Result<ComparisonReport> {
    config.validate()?;

    let reference_name = reference.display().to_string();
    let reference_rows = load_file(reference, config.comment_marker)?;
    let reference = build_dataset(&reference_rows, &reference_name, config.key_decimals)?;

    let test_name = test.display().to_string();
    let test_rows = load_file(test, config.comment_marker)?;
    let test = build_dataset(&test_rows, &test_name, config.key_decimals)?;

    finish(&test, &reference, config, reporter)
}

/// Compare two plot files with the default settings, logging diagnostics.
///
/// `Verdict::as_str` gives the `"Passed"` / `"Failed"` string.
pub fn calculate_rms_error(test: &Path, reference: &Path) -> Result<Verdict> {
    let report = compare_files(test, reference, &ComparisonConfig::default(), &mut LogReporter)?;
    Ok(report.verdict)
}

fn finish(
    test: &data::model::Dataset,
    reference: &data::model::Dataset,
    config: &ComparisonConfig,
    reporter: &mut dyn Reporter,
) -> Result<ComparisonReport> {
    debug!("finished parsing {} and {}", test.name, reference.name);
    let report = compare_datasets(test, reference, config.threshold);
    reporter.emit(&report)?;
    Ok(report)
}
