//! A fixture file as seen after discovery.

use std::fmt;

/// One on-disk input file describing one test scenario.
///
/// Paths are stored relative to the suite root with `/` separators regardless of platform, so that generated
/// artifacts are identical on every machine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixture {
    relative_path: String,
    base_identifier: String,
}

impl Fixture {
    /// Create a fixture from its root-relative path and the identifier extracted from its name.
    ///
    /// Backslashes in `relative_path` are normalized to `/`.
    pub fn new(relative_path: impl Into<String>, base_identifier: impl Into<String>) -> Self {
        let relative_path = relative_path.into().replace('\\', "/");
        Self {
            relative_path,
            base_identifier: base_identifier.into(),
        }
    }

    /// Path relative to the suite root, `/`-separated.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Identifier the test name is derived from (usually the file name without extension).
    pub fn base_identifier(&self) -> &str {
        &self.base_identifier
    }

    /// Raw file name, i.e. the last path segment.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path)
    }
}
