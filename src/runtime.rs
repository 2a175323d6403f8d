//! Support code called from generated test modules.
//!
//! A generated module bakes its registry into a `const SUITE: SuiteManifest` and calls
//! [`assert_all_fixtures_present`] from its completeness entry. Per-fixture entries return the execution hook's
//! [`Outcome`] untouched.
//!
//! [`assert_all_fixtures_present`] panics on drift; it is a test assertion and only meant to be called from a
//! `#[test]` function.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::check::{CompletenessMismatch, check_completeness};
use crate::scanner::{FixturePattern, ScanError, ScanOptions, scan};

/// What an execution hook returns. The generator never looks inside it.
pub type Outcome = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Registry of one generated suite, as baked into generated source.
#[derive(Debug, Clone, Copy)]
pub struct SuiteManifest {
    pub name: &'static str,
    /// `CARGO_MANIFEST_DIR` of the crate that includes the generated module
    pub manifest_dir: &'static str,
    /// Fixture root, relative to `manifest_dir`
    pub root: &'static str,
    pub pattern: &'static str,
    pub backend: &'static str,
    pub exclude_dirs: &'static [&'static str],
    pub ignore: &'static [&'static str],
    /// `(test name, root-relative fixture path)` in generation order
    pub fixtures: &'static [(&'static str, &'static str)],
}

impl SuiteManifest {
    pub fn root_path(&self) -> PathBuf {
        Path::new(self.manifest_dir).join(self.root)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            exclude_dirs: self.exclude_dirs.iter().map(|s| s.to_string()).collect(),
            ignore: self.ignore.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Path a generated entry hands to the hook for `relative_path`.
    pub fn fixture_path(&self, relative_path: &str) -> String {
        fixture_path(self.root, relative_path)
    }
}

/// Join a normalized root and a root-relative fixture path the way generated entries do.
pub fn fixture_path(root: &str, relative_path: &str) -> String {
    if root == "." || root.is_empty() {
        relative_path.to_string()
    } else {
        format!("{root}/{relative_path}")
    }
}

/// Reasons the runtime completeness check fails.
#[derive(Debug, Error)]
pub enum RuntimeCheckError {
    #[error("suite `{suite}` has an invalid pattern: {source}")]
    Pattern {
        suite: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Mismatch(#[from] CompletenessMismatch),
}

/// Re-scan the manifest's root and compare with its registry.
pub fn check_manifest(manifest: &SuiteManifest) -> Result<(), RuntimeCheckError> {
    let pattern = FixturePattern::new(manifest.pattern).map_err(|source| RuntimeCheckError::Pattern {
        suite: manifest.name.to_string(),
        source,
    })?;
    let on_disk = scan(&manifest.root_path(), &pattern, &manifest.scan_options())?;
    let expected: Vec<&str> = manifest.fixtures.iter().map(|(_, path)| *path).collect();
    check_completeness(manifest.name, manifest.root, &expected, &on_disk)?;
    Ok(())
}

/// Fail the calling test, listing every discrepancy, when the registry and the disk disagree.
#[track_caller]
pub fn assert_all_fixtures_present(manifest: &SuiteManifest) {
    if let Err(e) = check_manifest(manifest) {
        panic!("{e}");
    }
}
