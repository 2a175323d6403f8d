//! The ordered registry of generated test entries.
//!
//! A [`GeneratedSuite`] is what the synthesizer turns into source and what the completeness check compares
//! against the disk. Building one is the only place name collisions are detected.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use crate::fixture::Fixture;
use crate::naming::{NameStyle, TestCaseName, completeness_entry_name, to_test_case_name};

/// One generated test entry: a test name bound to the fixture it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    pub name: TestCaseName,
    pub fixture: Fixture,
}

/// Ordered `(TestCaseName → Fixture)` registry plus the reserved completeness entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSuite {
    completeness_entry: TestCaseName,
    entries: Vec<SuiteEntry>,
}

impl GeneratedSuite {
    /// Map every fixture to a test name and reject collisions.
    ///
    /// Fixtures are ordered by relative path first, so the result does not depend on the order they were
    /// discovered in. Duplicate paths are collapsed.
    pub fn build(
        root_label: &str,
        fixtures: impl IntoIterator<Item = Fixture>,
        style: NameStyle,
    ) -> Result<Self, NameCollisionError> {
        let mut fixtures: Vec<Fixture> = fixtures.into_iter().collect();
        fixtures.sort_by(|a, b| a.relative_path().cmp(b.relative_path()));
        fixtures.dedup_by(|a, b| a.relative_path() == b.relative_path());

        let completeness_entry = completeness_entry_name(root_label, style);

        let mut owners: BTreeMap<TestCaseName, String> = BTreeMap::new();
        let mut entries = Vec::with_capacity(fixtures.len());

        for fixture in fixtures {
            let name = to_test_case_name(fixture.base_identifier(), style);

            if name == completeness_entry {
                return Err(NameCollisionError {
                    name,
                    first: CollisionParty::Fixture(fixture.relative_path().to_string()),
                    second: CollisionParty::CompletenessEntry,
                });
            }
            if let Some(previous) = owners.get(&name) {
                return Err(NameCollisionError {
                    name,
                    first: CollisionParty::Fixture(previous.clone()),
                    second: CollisionParty::Fixture(fixture.relative_path().to_string()),
                });
            }

            owners.insert(name.clone(), fixture.relative_path().to_string());
            entries.push(SuiteEntry { name, fixture });
        }

        Ok(Self {
            completeness_entry,
            entries,
        })
    }

    /// Name of the always-present entry that runs the completeness check.
    pub fn completeness_entry(&self) -> &TestCaseName {
        &self.completeness_entry
    }

    /// Per-fixture entries in generation order.
    pub fn entries(&self) -> &[SuiteEntry] {
        &self.entries
    }

    /// Relative fixture paths in generation order.
    pub fn fixture_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.fixture.relative_path())
    }

    /// Number of per-fixture entries (the completeness entry is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Something that claimed a test name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionParty {
    /// A fixture, by root-relative path.
    Fixture(String),
    /// The reserved completeness entry.
    CompletenessEntry,
}

impl fmt::Display for CollisionParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionParty::Fixture(path) => write!(f, "`{}`", path),
            CollisionParty::CompletenessEntry => f.write_str("the completeness check entry"),
        }
    }
}

/// Two parties map to the same generated test name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollisionError {
    pub name: TestCaseName,
    pub first: CollisionParty,
    pub second: CollisionParty,
}

impl fmt::Display for NameCollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "test name `{}` is produced by both {} and {}",
            self.name, self.first, self.second
        )
    }
}

impl Error for NameCollisionError {}
