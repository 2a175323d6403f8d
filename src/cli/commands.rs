//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use crate::check::verify_suite;
use crate::config::FixturegenConfig;
use crate::generate::{WriteOutcome, plan_suite, regenerate_all};

use super::{CliError, CliResult, ExitCode};

/// Load and validate the configuration file.
pub fn load_config(path: &Path) -> CliResult<FixturegenConfig> {
    FixturegenConfig::load(path).map_err(CliError::diagnostic)
}

/// `fixturegen regenerate`
pub fn regenerate(config: &FixturegenConfig, only: Option<&str>) -> CliResult<ExitCode> {
    let suites = config.select(only).map_err(CliError::diagnostic)?;
    let results = regenerate_all(&suites, config.base_dir()).map_err(CliError::diagnostic)?;

    let mut written = 0;
    for (artifact, outcome) in &results {
        match outcome {
            WriteOutcome::Written => {
                println!(
                    "Generated: {} ({} fixture(s))",
                    artifact.output.display(),
                    artifact.fixture_count
                );
                written += 1;
            }
            WriteOutcome::Unchanged => println!("Unchanged: {}", artifact.output.display()),
        }
    }

    println!("\n✓ {} suite(s), {} module(s) written", results.len(), written);
    Ok(ExitCode::SUCCESS)
}

/// `fixturegen verify`
///
/// Every selected suite is checked and reported before the exit status is decided.
pub fn verify(config: &FixturegenConfig, only: Option<&str>) -> CliResult<ExitCode> {
    let suites = config.select(only).map_err(CliError::diagnostic)?;

    let mut failing = 0;
    for suite in &suites {
        let verification = verify_suite(suite, config.base_dir());
        if verification.is_clean() {
            println!("ok: {}", verification.suite);
            continue;
        }
        failing += 1;
        eprintln!("FAILED: {}", verification.suite);
        for finding in &verification.findings {
            for line in finding.to_string().lines() {
                eprintln!("  {line}");
            }
        }
    }

    if failing > 0 {
        return Err(CliError::failure(format!(
            "\n{} of {} suite(s) out of date; run `fixturegen regenerate`",
            failing,
            suites.len()
        )));
    }

    println!("✓ {} suite(s) up to date", suites.len());
    Ok(ExitCode::SUCCESS)
}

/// `fixturegen list`
pub fn list(config: &FixturegenConfig, only: Option<&str>) -> CliResult<ExitCode> {
    let suites = config.select(only).map_err(CliError::diagnostic)?;

    for suite in suites {
        let planned = plan_suite(suite, config.base_dir()).map_err(CliError::diagnostic)?;
        println!(
            "{} ({}): {} fixture(s)",
            suite.name,
            suite.normalized_root(),
            planned.len()
        );
        println!("  {}", planned.completeness_entry());
        for entry in planned.entries() {
            println!("  {}  {}", entry.name, entry.fixture.relative_path());
        }
    }

    Ok(ExitCode::SUCCESS)
}
