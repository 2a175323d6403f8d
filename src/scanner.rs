//! Fixture discovery.
//!
//! The scanner is read-only and keeps no state between calls: every call lists the root again.
//!
//! ## Recursion policy
//!
//! A pattern whose source contains `/` specifies a path shape. In that case the scanner descends into
//! subdirectories and matches the pattern against the root-relative path (`nested/alpha.xml`). Otherwise only
//! the root's direct children are considered and the pattern is matched against the bare file name.
//! Directories starting with `.` and directories named in [`ScanOptions::exclude_dirs`] are never entered.
//!
//! The check is textual: `^[^/]+\.xml$` contains `/`, so it recurses, yet it can only ever match top-level
//! names. The result is the same as a flat scan; only the traversal is wider.
//!
//! Symlinked directories are never entered, so a link back into the root cannot repeat fixtures. Symlinked
//! files are candidates like regular files. Entries whose names are not valid UTF-8 cannot be fixtures (their
//! names end up in string literals) and are skipped with a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fixturegen_core::Fixture;
use regex::Regex;
use thiserror::Error;

/// Default pattern: `<identifier>.xml`, identifier captured in group 1.
pub const DEFAULT_PATTERN: &str = r"^([\w\-]+)\.xml$";

/// Errors raised while listing a fixture root.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ScanError {
    #[error("fixture root `{}` does not exist", .root.display())]
    #[diagnostic(code(fixturegen::scan::missing_root), help("check `root` in the suite configuration"))]
    MissingRoot { root: PathBuf },

    #[error("fixture root `{}` is not a directory", .root.display())]
    #[diagnostic(code(fixturegen::scan::not_a_directory))]
    NotADirectory { root: PathBuf },

    #[error("cannot read `{}`: {source}", .path.display())]
    #[diagnostic(code(fixturegen::scan::unreadable))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A compiled fixture-name pattern.
#[derive(Debug, Clone)]
pub struct FixturePattern {
    regex: Regex,
    path_shaped: bool,
}

impl FixturePattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(source)?;
        if !source.starts_with('^') || !source.ends_with('$') {
            tracing::warn!(pattern = source, "fixture pattern is not anchored with ^...$; partial names will match");
        }
        Ok(Self {
            regex,
            path_shaped: source.contains('/'),
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern matches root-relative paths (and the scan recurses).
    ///
    /// True whenever the pattern source contains `/`, including inside a negated class such as `[^/]`.
    pub fn is_path_shaped(&self) -> bool {
        self.path_shaped
    }

    /// Match a candidate and extract its base identifier.
    ///
    /// The identifier is capture group 1 when the pattern has one and it participated in the match; otherwise
    /// the candidate with the extension of its last segment removed.
    pub fn base_identifier(&self, candidate: &str) -> Option<String> {
        let captures = self.regex.captures(candidate)?;
        if let Some(group) = captures.get(1) {
            return Some(group.as_str().to_string());
        }
        Some(strip_extension(candidate).to_string())
    }
}

impl Default for FixturePattern {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_PATTERN).expect("INVARIANT: DEFAULT_PATTERN is a valid regex"),
            path_shaped: false,
        }
    }
}

fn strip_extension(candidate: &str) -> &str {
    let segment_start = candidate.rfind('/').map(|i| i + 1).unwrap_or(0);
    match candidate[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &candidate[..segment_start + dot],
        _ => candidate,
    }
}

/// Filters applied on top of the pattern.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Directory names never entered during a path-shaped scan.
    pub exclude_dirs: Vec<String>,
    /// File names (or root-relative paths) skipped even when they match.
    pub ignore: Vec<String>,
}

/// List the fixtures under `root`, ordered by relative path.
pub fn scan(root: &Path, pattern: &FixturePattern, options: &ScanOptions) -> Result<Vec<Fixture>, ScanError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::MissingRoot {
                root: root.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(ScanError::Unreadable {
                path: root.to_path_buf(),
                source,
            });
        }
    };
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            root: root.to_path_buf(),
        });
    }

    let mut fixtures = Vec::new();
    walk(root, "", pattern, options, &mut fixtures)?;
    fixtures.sort();

    tracing::debug!(root = %root.display(), count = fixtures.len(), "scanned fixture root");
    Ok(fixtures)
}

fn walk(
    dir: &Path,
    prefix: &str,
    pattern: &FixturePattern,
    options: &ScanOptions,
    out: &mut Vec<Fixture>,
) -> Result<(), ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::Unreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %path.display(), "skipping entry whose name is not valid UTF-8");
            continue;
        };
        let relative = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        // `file_type` does not follow symlinks; linked files are resolved below, linked dirs never entered.
        let file_type = entry.file_type().map_err(|source| ScanError::Unreadable {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            if pattern.is_path_shaped() && !name.starts_with('.') && !options.exclude_dirs.contains(&name) {
                walk(&path, &relative, pattern, options, out)?;
            }
            continue;
        }
        if file_type.is_symlink() && !path.is_file() {
            tracing::debug!(entry = %relative, "skipping symlink that is not a file");
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }
        if options.ignore.iter().any(|i| *i == name || *i == relative) {
            tracing::debug!(fixture = %relative, "ignored by configuration");
            continue;
        }

        let candidate = if pattern.is_path_shaped() { &relative } else { &name };
        if let Some(base) = pattern.base_identifier(candidate) {
            tracing::debug!(fixture = %relative, base = %base, "discovered fixture");
            out.push(Fixture::new(relative, base));
        }
    }

    Ok(())
}
