//! rcs-rmse command-line interface.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};

use rcs_rmse::{
    AccuracyProfile, ComparisonConfig, ComparisonReport, Error, LogReporter, Reporter,
    TextReporter, compare_files,
};

const PASSED: u8 = 0;
/// Exit status when the files differ beyond the threshold.
const ACCURACY_ERROR: u8 = 123;
/// Exit status when a plot file cannot be read or parsed.
const FILE_ERROR: u8 = 125;
/// Exit status for anything else, e.g. bad settings or failed exports.
const OTHER_ERROR: u8 = 1;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    /// Threshold 1e-3
    Lego,
    /// Threshold 1e-4
    Switch,
}

impl From<Profile> for AccuracyProfile {
    fn from(p: Profile) -> Self {
        match p {
            Profile::Lego => AccuracyProfile::Lego,
            Profile::Switch => AccuracyProfile::Switch,
        }
    }
}

#[derive(Parser)]
#[command(name = "rcs-rmse")]
#[command(about = "Compare an RCS plot file against a reference by complex RMS error", long_about = None)]
#[command(version)]
struct Cli {
    /// Plot file under test
    #[arg(value_name = "TEST")]
    test: PathBuf,

    /// Trusted reference plot file
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,

    /// Accuracy preset
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Pass/fail threshold (overrides the profile)
    #[arg(long)]
    threshold: Option<f64>,

    /// Round sample coordinates to N decimals before matching
    #[arg(long, value_name = "N")]
    key_decimals: Option<u32>,

    /// JSON file with comparison settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write the per-frequency table as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Only print the verdict
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli);
    match &result {
        Ok(report) => println!("{}", report.verdict),
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
        }
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when passed, 123 on an accuracy failure, 125 when a plot file could not
/// be read or parsed, 1 otherwise.
fn exit_status(result: &Result<ComparisonReport>) -> u8 {
    match result {
        Ok(report) if report.passed() => PASSED,
        Ok(_) => ACCURACY_ERROR,
        Err(err) => {
            let input_error = err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_input_error);
            if input_error {
                FILE_ERROR
            } else {
                OTHER_ERROR
            }
        }
    }
}

fn run(cli: &Cli) -> Result<ComparisonReport> {
    let config = build_config(cli)?;
    info!(
        "comparing {} against {} (threshold {:e})",
        cli.test.display(),
        cli.reference.display(),
        config.threshold
    );

    let mut reporter: Box<dyn Reporter> = if cli.quiet {
        Box::new(LogReporter)
    } else {
        Box::new(TextReporter::new(io::stdout().lock()))
    };
    let report = compare_files(&cli.test, &cli.reference, &config, reporter.as_mut())?;

    if let Some(path) = &cli.json {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON report to {}", path.display()))?;
    }
    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("creating CSV report {}", path.display()))?;
        report.write_csv(BufWriter::new(file))?;
    }

    Ok(report)
}

/// Defaults, then the config file, then command-line flags.
fn build_config(cli: &Cli) -> Result<ComparisonConfig> {
    let mut config = match &cli.config {
        Some(path) => ComparisonConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ComparisonConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config = config.with_profile(profile.into());
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(decimals) = cli.key_decimals {
        config = config.with_key_decimals(decimals);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rcs-rmse").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn requires_both_files() {
        assert!(Cli::try_parse_from(["rcs-rmse", "test.plt"]).is_err());
    }

    #[test]
    fn defaults_to_standard_threshold() {
        let config = build_config(&cli(&["t.plt", "r.plt"])).expect("config");
        assert_eq!(config.threshold, 1e-3);
    }

    #[test]
    fn threshold_flag_beats_profile() {
        let config = build_config(&cli(&["t.plt", "r.plt", "--profile", "switch"])).expect("config");
        assert_eq!(config.threshold, 1e-4);

        let config = build_config(&cli(&[
            "t.plt",
            "r.plt",
            "--profile",
            "switch",
            "--threshold",
            "0.05",
        ]))
        .expect("config");
        assert_eq!(config.threshold, 0.05);
    }

    #[test]
    fn rejects_invalid_threshold() {
        assert!(build_config(&cli(&["t.plt", "r.plt", "--threshold=-1"])).is_err());
    }

    fn comparison(test: &str, reference: &str) -> Result<ComparisonReport> {
        Ok(rcs_rmse::compare_sources(
            test,
            "test",
            reference,
            "reference",
            &ComparisonConfig::default(),
            &mut LogReporter,
        )?)
    }

    #[test]
    fn exit_status_of_verdicts() {
        let row = "1.0 0 0 0 0 0 0\n";
        assert_eq!(exit_status(&comparison(row, row)), 0);
        assert_eq!(exit_status(&comparison("1.0 0 0 100 0 0 0\n", row)), 123);
        assert_eq!(exit_status(&comparison(row, "2.0 0 0 0 0 0 0\n")), 123);
    }

    #[test]
    fn exit_status_of_plot_file_errors() {
        let format = comparison("1.0 0 0 0 0 0\n", "1.0 0 0 0 0 0 0\n");
        assert!(format.is_err());
        assert_eq!(exit_status(&format), 125);

        let unreadable = Err(anyhow::Error::from(Error::Io {
            path: "missing.plt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }));
        assert_eq!(exit_status(&unreadable), 125);

        let no_data = Err(anyhow::Error::from(Error::NoData {
            source_name: "empty.plt".to_string(),
        })
        .context("comparing"));
        assert_eq!(exit_status(&no_data), 125);
    }

    #[test]
    fn exit_status_of_other_errors() {
        let config = Err(anyhow::Error::from(Error::Config("bad".to_string())));
        assert_eq!(exit_status(&config), 1);

        let config_file = Err(anyhow::Error::from(Error::ConfigFile {
            path: "settings.json".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        })
        .context("loading config settings.json"));
        assert_eq!(exit_status(&config_file), 1);

        assert_eq!(exit_status(&Err(anyhow::anyhow!("export failed"))), 1);
    }

    #[test]
    fn missing_config_file_is_not_a_plot_file_error() {
        let err = build_config(&cli(&["t.plt", "r.plt", "--config", "/no/such/config.json"]))
            .map(|_| ())
            .expect_err("missing config");
        assert_eq!(exit_status(&Err(err)), 1);
    }

    fn write(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write file");
        path.display().to_string()
    }

    #[test]
    fn run_writes_requested_exports() {
        let dir = TempDir::new().expect("temp dir");
        let rows = "1.0 0 0 0 0 0 0\n2.0 0 0 0 0 0 0\n";
        let test = write(dir.path(), "test.plt", rows);
        let reference = write(dir.path(), "reference.plt", rows);
        let json = dir.path().join("report.json").display().to_string();
        let csv = dir.path().join("report.csv").display().to_string();

        let result = run(&cli(&[
            test.as_str(),
            reference.as_str(),
            "-q",
            "--json",
            json.as_str(),
            "--csv",
            csv.as_str(),
        ]));
        assert_eq!(exit_status(&result), 0);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).expect("json written"))
                .expect("valid JSON");
        assert_eq!(report["verdict"], "Passed");
        let table = std::fs::read_to_string(&csv).expect("csv written");
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn run_reports_unreadable_plot_file() {
        let dir = TempDir::new().expect("temp dir");
        let reference = write(dir.path(), "reference.plt", "1.0 0 0 0 0 0 0\n");
        let missing = dir.path().join("test.plt").display().to_string();

        let result = run(&cli(&[missing.as_str(), reference.as_str(), "-q"]));
        assert_eq!(exit_status(&result), 125);
    }
}
