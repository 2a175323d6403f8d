//! Completeness checking: generated registry vs. fixtures on disk.
//!
//! The same comparison backs two entry points:
//! - the completeness entry inside every generated module (through [`crate::runtime`]), and
//! - `fixturegen verify`, which reads the committed module, extracts its `SUITE` registry with `syn` and also
//!   reports modules that a fresh regeneration would change.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fixturegen_core::Fixture;
use thiserror::Error;

use crate::config::SuiteConfig;
use crate::generate::{GenerateError, scan_suite, synthesize_fixtures};

/// Drift between a generated registry and the disk.
///
/// Every discrepancy is listed, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, miette::Diagnostic)]
#[diagnostic(
    code(fixturegen::check::completeness_mismatch),
    help("fixtures were added or removed without regenerating the suite")
)]
pub struct CompletenessMismatch {
    pub suite: String,
    pub root: String,
    /// On disk, no generated entry
    pub missing: Vec<String>,
    /// Generated entry, no file on disk
    pub stale: Vec<String>,
}

impl fmt::Display for CompletenessMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "fixture suite `{}` is out of sync with `{}`: {} missing, {} stale",
            self.suite,
            self.root,
            self.missing.len(),
            self.stale.len()
        )?;
        if !self.missing.is_empty() {
            writeln!(f, "  missing (on disk, no generated test):")?;
            for path in &self.missing {
                writeln!(f, "    - {}", path)?;
            }
        }
        if !self.stale.is_empty() {
            writeln!(f, "  stale (generated test, no file on disk):")?;
            for path in &self.stale {
                writeln!(f, "    - {}", path)?;
            }
        }
        write!(f, "  regenerate with: fixturegen regenerate --suite {}", self.suite)
    }
}

impl std::error::Error for CompletenessMismatch {}

/// Compare registry paths against scanned fixtures.
pub fn check_completeness(
    suite: &str,
    root: &str,
    expected: &[&str],
    on_disk: &[Fixture],
) -> Result<(), CompletenessMismatch> {
    let expected: BTreeSet<&str> = expected.iter().copied().collect();
    let actual: BTreeSet<&str> = on_disk.iter().map(Fixture::relative_path).collect();

    let missing: Vec<String> = actual.difference(&expected).map(|s| s.to_string()).collect();
    let stale: Vec<String> = expected.difference(&actual).map(|s| s.to_string()).collect();

    if missing.is_empty() && stale.is_empty() {
        return Ok(());
    }
    Err(CompletenessMismatch {
        suite: suite.to_string(),
        root: root.to_string(),
        missing,
        stale,
    })
}

// ============================================================================
// Reading committed artifacts
// ============================================================================

#[derive(Debug, Error, miette::Diagnostic)]
pub enum ArtifactError {
    #[error("cannot read: {0}")]
    #[diagnostic(code(fixturegen::artifact::read))]
    Read(#[from] io::Error),

    #[error("not valid Rust: {0}")]
    #[diagnostic(code(fixturegen::artifact::syntax), help("regenerate the module instead of editing it"))]
    Syntax(#[from] syn::Error),

    #[error("no `const SUITE` registry found")]
    #[diagnostic(code(fixturegen::artifact::missing_registry), help("was this file produced by fixturegen?"))]
    MissingRegistry,

    #[error("malformed `SUITE` registry: {0}")]
    #[diagnostic(code(fixturegen::artifact::malformed_registry))]
    MalformedRegistry(&'static str),
}

/// The registry as found in a committed generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BakedRegistry {
    pub name: Option<String>,
    pub root: Option<String>,
    /// `(test name, root-relative path)` pairs
    pub fixtures: Vec<(String, String)>,
}

impl BakedRegistry {
    pub fn fixture_paths(&self) -> Vec<&str> {
        self.fixtures.iter().map(|(_, path)| path.as_str()).collect()
    }
}

pub fn read_registry(path: &Path) -> Result<BakedRegistry, ArtifactError> {
    let source = fs::read_to_string(path)?;
    parse_registry(&source)
}

/// Extract `const SUITE` from generated source.
pub fn parse_registry(source: &str) -> Result<BakedRegistry, ArtifactError> {
    let file = syn::parse_file(source)?;

    let suite = file
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Const(c) if c.ident == "SUITE" => Some(c),
            _ => None,
        })
        .ok_or(ArtifactError::MissingRegistry)?;

    let syn::Expr::Struct(init) = suite.expr.as_ref() else {
        return Err(ArtifactError::MalformedRegistry("initializer is not a struct literal"));
    };

    let mut registry = BakedRegistry::default();
    let mut saw_fixtures = false;

    for field in &init.fields {
        let syn::Member::Named(ident) = &field.member else {
            continue;
        };
        if ident == "name" {
            registry.name = string_literal(&field.expr);
        } else if ident == "root" {
            registry.root = string_literal(&field.expr);
        } else if ident == "fixtures" {
            registry.fixtures = fixture_pairs(&field.expr)?;
            saw_fixtures = true;
        }
    }

    if !saw_fixtures {
        return Err(ArtifactError::MalformedRegistry("missing `fixtures` field"));
    }
    Ok(registry)
}

fn string_literal(expr: &syn::Expr) -> Option<String> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Str(s), ..
        }) => Some(s.value()),
        _ => None,
    }
}

fn fixture_pairs(expr: &syn::Expr) -> Result<Vec<(String, String)>, ArtifactError> {
    let syn::Expr::Reference(reference) = expr else {
        return Err(ArtifactError::MalformedRegistry("`fixtures` is not a slice reference"));
    };
    let syn::Expr::Array(array) = reference.expr.as_ref() else {
        return Err(ArtifactError::MalformedRegistry("`fixtures` is not an array"));
    };

    array
        .elems
        .iter()
        .map(|elem| {
            let syn::Expr::Tuple(tuple) = elem else {
                return Err(ArtifactError::MalformedRegistry("`fixtures` element is not a tuple"));
            };
            let mut parts = tuple.elems.iter().map(string_literal);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Some(name)), Some(Some(path)), None) => Ok((name, path)),
                _ => Err(ArtifactError::MalformedRegistry(
                    "`fixtures` element is not a pair of string literals",
                )),
            }
        })
        .collect()
}

// ============================================================================
// verify
// ============================================================================

/// One problem found while verifying a suite.
#[derive(Debug, Error)]
pub enum VerifyFinding {
    #[error("generated module `{}` does not exist", .path.display())]
    MissingArtifact { path: PathBuf },

    #[error("generated module `{}` is unusable: {source}", .path.display())]
    InvalidArtifact {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },

    #[error("{0}")]
    Drift(CompletenessMismatch),

    #[error("generated module `{}` differs from a fresh regeneration:\n{diff}", .path.display())]
    Outdated { path: PathBuf, diff: String },

    #[error(transparent)]
    Generation(#[from] GenerateError),
}

/// Verification result for one suite.
#[derive(Debug)]
pub struct SuiteVerification {
    pub suite: String,
    pub findings: Vec<VerifyFinding>,
}

impl SuiteVerification {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Check a committed module against the disk and against a fresh regeneration.
///
/// Drift is reported in preference to "outdated": a module with missing or stale entries is always outdated.
pub fn verify_suite(config: &SuiteConfig, base_dir: &Path) -> SuiteVerification {
    let mut verification = SuiteVerification {
        suite: config.name.clone(),
        findings: Vec::new(),
    };
    let output = config.output_path(base_dir);

    let committed = match fs::read_to_string(&output) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            verification.findings.push(VerifyFinding::MissingArtifact { path: output });
            return verification;
        }
        Err(e) => {
            verification.findings.push(VerifyFinding::InvalidArtifact {
                path: output,
                source: ArtifactError::Read(e),
            });
            return verification;
        }
    };

    let registry = match parse_registry(&committed) {
        Ok(registry) => registry,
        Err(source) => {
            verification
                .findings
                .push(VerifyFinding::InvalidArtifact { path: output, source });
            return verification;
        }
    };

    let on_disk = match scan_suite(config, base_dir) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            verification.findings.push(VerifyFinding::Generation(e));
            return verification;
        }
    };

    let expected = registry.fixture_paths();
    if let Err(mismatch) = check_completeness(&config.name, &config.normalized_root(), &expected, &on_disk) {
        tracing::debug!(suite = %config.name, missing = mismatch.missing.len(), stale = mismatch.stale.len(), "drift");
        verification.findings.push(VerifyFinding::Drift(mismatch));
        return verification;
    }

    match synthesize_fixtures(config, on_disk) {
        Ok(fresh) if fresh == committed => {}
        Ok(fresh) => verification.findings.push(VerifyFinding::Outdated {
            path: output,
            diff: artifact_diff(&committed, &fresh),
        }),
        Err(e) => verification.findings.push(VerifyFinding::Generation(e)),
    }

    verification
}

/// Line-by-line diff between a committed module and a fresh one.
pub fn artifact_diff(committed: &str, fresh: &str) -> String {
    let mut diff = String::new();
    let old_lines: Vec<&str> = committed.lines().collect();
    let new_lines: Vec<&str> = fresh.lines().collect();

    for i in 0..old_lines.len().max(new_lines.len()) {
        let old = old_lines.get(i).copied();
        let new = new_lines.get(i).copied();
        if old == new {
            continue;
        }
        if let Some(old) = old {
            diff.push_str(&format!("-{:4} | {}\n", i + 1, old));
        }
        if let Some(new) = new {
            diff.push_str(&format!("+{:4} | {}\n", i + 1, new));
        }
    }

    diff
}
