//! The generation pipeline: scan → name → synthesize → write.
//!
//! Every selected suite is generated in memory before any file is touched, so a scan failure or name
//! collision in one suite leaves all committed modules as they were.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fixturegen_core::{Fixture, GeneratedSuite, NameCollisionError};
use thiserror::Error;

use crate::config::SuiteConfig;
use crate::scanner::{ScanError, scan};
use crate::synth::{SynthError, synthesize};

#[derive(Debug, Error, miette::Diagnostic)]
pub enum GenerateError {
    #[error("suite `{suite}`: invalid pattern: {source}")]
    #[diagnostic(code(fixturegen::generate::pattern))]
    Pattern {
        suite: String,
        #[source]
        source: regex::Error,
    },

    #[error("suite `{suite}`: {source}")]
    #[diagnostic(code(fixturegen::generate::scan))]
    Scan {
        suite: String,
        #[source]
        source: ScanError,
    },

    #[error("suite `{suite}`: {source}")]
    #[diagnostic(
        code(fixturegen::generate::name_collision),
        help(
            "every non-alphanumeric character separates words, so `foo-bar`, `foo_bar` and `fooBar` share a name; rename one fixture"
        )
    )]
    Collision {
        suite: String,
        #[source]
        source: NameCollisionError,
    },

    #[error("suite `{suite}`: {source}")]
    #[diagnostic(code(fixturegen::generate::synth))]
    Synth {
        suite: String,
        #[source]
        source: SynthError,
    },

    #[error("cannot write `{}`: {source}", .path.display())]
    #[diagnostic(code(fixturegen::generate::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A generated module, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub suite: String,
    pub output: PathBuf,
    pub source: String,
    /// Per-fixture entries (the completeness entry is not counted)
    pub fixture_count: usize,
}

/// What happened to an artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Scan a suite's root with its pattern and options.
pub fn scan_suite(config: &SuiteConfig, base_dir: &Path) -> Result<Vec<Fixture>, GenerateError> {
    let pattern = config.fixture_pattern().map_err(|source| GenerateError::Pattern {
        suite: config.name.clone(),
        source,
    })?;
    scan(&config.root_path(base_dir), &pattern, &config.scan_options()).map_err(|source| GenerateError::Scan {
        suite: config.name.clone(),
        source,
    })
}

/// Map fixtures to test names for a suite.
pub fn build_suite(config: &SuiteConfig, fixtures: Vec<Fixture>) -> Result<GeneratedSuite, GenerateError> {
    GeneratedSuite::build(&config.root_label(), fixtures, config.naming).map_err(|source| {
        GenerateError::Collision {
            suite: config.name.clone(),
            source,
        }
    })
}

/// Scan and name a suite without synthesizing it.
pub fn plan_suite(config: &SuiteConfig, base_dir: &Path) -> Result<GeneratedSuite, GenerateError> {
    let fixtures = scan_suite(config, base_dir)?;
    build_suite(config, fixtures)
}

/// Name and synthesize an already scanned fixture set.
pub fn synthesize_fixtures(config: &SuiteConfig, fixtures: Vec<Fixture>) -> Result<String, GenerateError> {
    let suite = build_suite(config, fixtures)?;
    synthesize(config, &suite).map_err(|source| GenerateError::Synth {
        suite: config.name.clone(),
        source,
    })
}

/// Produce one suite's module in memory.
pub fn generate_suite(config: &SuiteConfig, base_dir: &Path) -> Result<GeneratedArtifact, GenerateError> {
    let suite = plan_suite(config, base_dir)?;
    let source = synthesize(config, &suite).map_err(|source| GenerateError::Synth {
        suite: config.name.clone(),
        source,
    })?;

    Ok(GeneratedArtifact {
        suite: config.name.clone(),
        output: config.output_path(base_dir),
        source,
        fixture_count: suite.len(),
    })
}

/// Generate every suite, then write the ones whose content changed.
///
/// Nothing is written unless every suite generated successfully.
pub fn regenerate_all(
    suites: &[&SuiteConfig],
    base_dir: &Path,
) -> Result<Vec<(GeneratedArtifact, WriteOutcome)>, GenerateError> {
    let artifacts = suites
        .iter()
        .map(|config| generate_suite(config, base_dir))
        .collect::<Result<Vec<_>, _>>()?;

    artifacts
        .into_iter()
        .map(|artifact| {
            let outcome = write_artifact(&artifact)?;
            Ok((artifact, outcome))
        })
        .collect()
}

/// Write an artifact unless the file already holds the same bytes.
pub fn write_artifact(artifact: &GeneratedArtifact) -> Result<WriteOutcome, GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: artifact.output.clone(),
        source,
    };

    match fs::read_to_string(&artifact.output) {
        Ok(existing) if existing == artifact.source => {
            tracing::debug!(path = %artifact.output.display(), "generated module unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_err(e)),
    }

    if let Some(parent) = artifact.output.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(&artifact.output, &artifact.source).map_err(write_err)?;

    tracing::info!(
        suite = %artifact.suite,
        path = %artifact.output.display(),
        fixtures = artifact.fixture_count,
        "wrote generated module"
    );
    Ok(WriteOutcome::Written)
}
