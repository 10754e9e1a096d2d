//! File-level comparisons through the public entry points.

use std::io::Write;
use std::path::Path;

use rcs_rmse::{
    ComparisonConfig, Error, FrequencyStatus, LogReporter, TextReporter, Verdict,
    calculate_rms_error, compare_files, compare_sources,
};
use tempfile::{NamedTempFile, TempDir};

fn plot_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write plot file");
    file
}

fn verdict(test: &Path, reference: &Path) -> Verdict {
    calculate_rms_error(test, reference).expect("comparison should run")
}

#[test]
fn identical_single_row_passes() {
    let test = plot_file("1.0 0 0 0 0 0 0\n");
    let reference = plot_file("1.0 0 0 0 0 0 0\n");

    assert_eq!(verdict(test.path(), reference.path()).as_str(), "Passed");

    let report = compare_files(
        test.path(),
        reference.path(),
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(report.frequencies.len(), 1);
    assert_eq!(report.frequencies[0].frequency, 1.0);
    assert_eq!(report.frequencies[0].errors.rmse_pp.norm(), 0.0);
    assert_eq!(report.frequencies[0].errors.rmse_tt.norm(), 0.0);
}

#[test]
fn large_db_offset_fails() {
    let test = plot_file("1.0 0 0 100 0 100 0\n");
    let reference = plot_file("1.0 0 0 0 0 0 0\n");

    let report = compare_files(
        test.path(),
        reference.path(),
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(report.verdict, Verdict::Failed);
    assert_eq!(report.frequencies[0].status, FrequencyStatus::AboveThreshold);
    assert!(report.frequencies[0].errors.rmse_pp_rel.norm() > 1.0);
}

#[test]
fn eight_token_line_is_a_format_error() {
    let test = plot_file("# header\n1.0 0 0 0 0 0 0\n1.0 5 0 0 0 0 0 0\n");
    let reference = plot_file("1.0 0 0 0 0 0 0\n");

    let err = calculate_rms_error(test.path(), reference.path())
        .expect_err("8 tokens must abort the comparison");
    match err {
        Error::Format {
            source_name,
            line_no,
            line,
            ..
        } => {
            assert_eq!(source_name, test.path().display().to_string());
            assert_eq!(line_no, 3);
            assert_eq!(line, "1.0 5 0 0 0 0 0 0");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn single_overlapping_key_is_compared_alone() {
    let mut test = String::new();
    let mut reference = String::new();
    for i in 0..10 {
        test.push_str(&format!("1.0 {} 0 -10 0 -10 0\n", i));
        reference.push_str(&format!("1.0 {} 90 -10 0 -10 0\n", i));
    }
    // The one shared coordinate.
    reference = reference.replacen("1.0 0 90", "1.0 0 0", 1);

    let report = compare_sources(
        &test,
        "test",
        &reference,
        "reference",
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(report.summary.test_samples, 10);
    assert_eq!(report.summary.reference_samples, 10);
    assert_eq!(report.summary.compared_samples, 1);
    assert_eq!(report.frequencies.len(), 1);
    assert_eq!(report.frequencies[0].compared, 1);
    assert_eq!(report.frequencies[0].coverage_percent, 10.0);
    assert_eq!(report.verdict, Verdict::Passed);
}

#[test]
fn disjoint_files_fail() {
    let test = plot_file("1.0 0 0 0 0 0 0\n");
    let reference = plot_file("2.0 0 0 0 0 0 0\n");
    assert_eq!(verdict(test.path(), reference.path()), Verdict::Failed);
}

#[test]
fn nan_at_one_frequency_fails_regardless_of_others() {
    let test = plot_file("1.0 0 0 nan 0 0 0\n2.0 0 0 0 0 0 0\n");
    let reference = plot_file("1.0 0 0 0 0 0 0\n2.0 0 0 0 0 0 0\n");

    let mut reporter = TextReporter::new(Vec::new());
    let report = compare_files(
        test.path(),
        reference.path(),
        &ComparisonConfig::default(),
        &mut reporter,
    )
    .expect("comparison should run");
    assert_eq!(report.verdict, Verdict::Failed);
    assert_eq!(report.frequencies[0].status, FrequencyStatus::NanEncountered);
    assert_eq!(report.frequencies[1].status, FrequencyStatus::Passed);

    let text = String::from_utf8(reporter.into_inner()).expect("utf8");
    assert!(text.starts_with("NaN Encountered.\n"));
    assert!(text.contains("| RMS Error at 2 GHz"));
}

#[test]
fn bistatic_files_compare_per_incidence() {
    let reference = "# bistatic\n\
        1.0 0 0 0 0 -5 10 -6 20\n\
        1.0 0 0 30 0 -5 10 -6 20\n\
        2.0 0 0 0 0 -5 10 -6 20\n";
    let test = "1.0 0 0 0 0 -5 10 -6 20\n\
        1.0 0 0 30 0 -5 10.00001 -6 20\n\
        2.0 0 0 0 0 -5 10 -6 20\n";

    let report = compare_sources(
        test,
        "test",
        reference,
        "reference",
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(report.summary.compared_samples, 3);
    assert_eq!(report.frequencies.len(), 2);
    assert_eq!(report.frequencies[0].compared, 2);
    assert_eq!(report.verdict, Verdict::Passed);
}

#[test]
fn key_decimals_bridge_formatting_differences() {
    let test = "1.0 0.333333333 0 0 0 0 0\n";
    let reference = "1.0 0.3333333334 0 0 0 0 0\n";

    let exact = compare_sources(
        test,
        "test",
        reference,
        "reference",
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(exact.summary.compared_samples, 0);
    assert_eq!(exact.verdict, Verdict::Failed);

    let rounded = compare_sources(
        test,
        "test",
        reference,
        "reference",
        &ComparisonConfig::default().with_key_decimals(6),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(rounded.summary.compared_samples, 1);
    assert_eq!(rounded.verdict, Verdict::Passed);
}

#[test]
fn rerunning_gives_the_same_report() {
    let test = plot_file("1.0 0 0 -3 20 -4 30\n1.0 10 0 -3 20 -4 32\n2.0 0 0 1 1 1 1\n");
    let reference = plot_file("1.0 0 0 -3 20 -4 30\n1.0 10 0 -3 20 -4 30\n2.0 0 0 1 1 1 1\n");
    let config = ComparisonConfig::default();

    let first = compare_files(test.path(), reference.path(), &config, &mut LogReporter)
        .expect("first run");
    let second = compare_files(test.path(), reference.path(), &config, &mut LogReporter)
        .expect("second run");
    assert_eq!(first, second);
    assert_eq!(first.verdict, Verdict::Failed);
}

#[test]
fn exports_json_and_csv() {
    let dir = TempDir::new().expect("temp dir");
    let test = dir.path().join("test.plt");
    let reference = dir.path().join("reference.plt");
    std::fs::write(&test, "1.0 0 0 0 0 0 0\n2.0 0 0 0 0 0 0\n").expect("write test");
    std::fs::write(&reference, "1.0 0 0 0 0 0 0\n2.0 0 0 0 0 0 0\n").expect("write reference");

    let report = compare_files(&test, &reference, &ComparisonConfig::default(), &mut LogReporter)
        .expect("comparison should run");

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("json")).expect("valid JSON");
    assert_eq!(json["verdict"], "Passed");
    assert_eq!(json["frequencies"].as_array().map(Vec::len), Some(2));

    let mut csv = Vec::new();
    report.write_csv(&mut csv).expect("csv");
    assert_eq!(String::from_utf8(csv).expect("utf8").lines().count(), 3);
}

#[test]
fn missing_file_is_reported_as_input_error() {
    let reference = plot_file("1.0 0 0 0 0 0 0\n");
    let err = calculate_rms_error(Path::new("/no/such/test.plt"), reference.path())
        .expect_err("missing file");
    assert!(err.is_input_error());
    assert!(err.to_string().contains("/no/such/test.plt"));
}

#[test]
fn frequency_missing_from_reference_is_reported_as_not_compared() {
    let test = plot_file("1.0 0 0 0 0 0 0\n2.0 0 0 0 0 0 0\n");
    let reference = plot_file("1.0 0 0 0 0 0 0\n");

    let mut reporter = TextReporter::new(Vec::new());
    let report = compare_files(
        test.path(),
        reference.path(),
        &ComparisonConfig::default(),
        &mut reporter,
    )
    .expect("comparison should run");
    assert_eq!(report.verdict, Verdict::Passed);
    assert_eq!(report.frequencies.len(), 2);
    assert_eq!(report.frequencies[1].frequency, 2.0);
    assert_eq!(report.frequencies[1].status, FrequencyStatus::NotCompared);
    assert_eq!(report.frequencies[1].coverage_percent, 0.0);

    let text = String::from_utf8(reporter.into_inner()).expect("utf8");
    assert!(text.contains("N/A ( N/A ) | RMS Error at 2 GHz"));
    assert!(text.contains("| 0.0% inc/scatter coverage"));

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("json")).expect("valid JSON");
    assert_eq!(json["frequencies"][1]["status"], "not_compared");
    assert!(json["frequencies"][1]["rmse_pp"][0].is_null());

    let mut csv = Vec::new();
    report.write_csv(&mut csv).expect("csv");
    let csv = String::from_utf8(csv).expect("utf8");
    assert!(csv.lines().any(|l| l.starts_with("2.0,not_compared,0,0.0,")));
}

#[test]
fn letter_comment_marker_is_refused() {
    let rows = "1.0 0 0 1e-3 0 0 0\n1.0 5 0 0 0 0 0\n";
    let config = ComparisonConfig {
        comment_marker: 'e',
        ..ComparisonConfig::default()
    };

    let err = compare_sources(rows, "test", rows, "reference", &config, &mut LogReporter)
        .expect_err("a marker found inside numbers must be refused");
    assert!(matches!(err, Error::Config(_)));

    let report = compare_sources(
        rows,
        "test",
        rows,
        "reference",
        &ComparisonConfig::default(),
        &mut LogReporter,
    )
    .expect("comparison should run");
    assert_eq!(report.summary.compared_samples, 2);
}
