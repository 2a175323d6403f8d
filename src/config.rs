//! Suite configuration.
//!
//! Suites are declared in a JSON file (by default `fixturegen.json`) that lives in the directory of the crate
//! whose tests include the generated modules. Every relative path in the file is resolved against that
//! directory, which is also the `CARGO_MANIFEST_DIR` the generated code sees at test time.
//!
//! ```json
//! {
//!   "suites": [
//!     {
//!       "name": "maven_inspections",
//!       "root": "testData/maven-inspections",
//!       "output": "tests/generated/maven_inspections.rs"
//!     }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use fixturegen_core::NameStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scanner::{DEFAULT_PATTERN, FixturePattern, ScanOptions};

/// Config file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "fixturegen.json";

/// Backend tag used when a suite does not name one.
pub const DEFAULT_BACKEND: &str = "ANY";

/// Hook called by generated entries when a suite does not name one.
pub const DEFAULT_HOOK: &str = "super::execute_fixture";

#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config `{}`: {source}", .path.display())]
    #[diagnostic(code(fixturegen::config::read), help("pass --config or create fixturegen.json"))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config `{}`: {source}", .path.display())]
    #[diagnostic(code(fixturegen::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config declares no suites")]
    #[diagnostic(code(fixturegen::config::no_suites))]
    NoSuites,

    #[error("suite at position {index} has an empty name")]
    #[diagnostic(code(fixturegen::config::empty_name))]
    EmptyName { index: usize },

    #[error("suite `{0}` is declared more than once")]
    #[diagnostic(code(fixturegen::config::duplicate_suite))]
    DuplicateSuite(String),

    #[error("suites `{first}` and `{second}` both write `{output}`")]
    #[diagnostic(code(fixturegen::config::duplicate_output))]
    DuplicateOutput {
        output: String,
        first: String,
        second: String,
    },

    #[error("suite `{suite}` has an invalid pattern: {source}")]
    #[diagnostic(code(fixturegen::config::invalid_pattern))]
    InvalidPattern {
        suite: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown suite `{name}` (available: {available})")]
    #[diagnostic(code(fixturegen::config::unknown_suite))]
    UnknownSuite { name: String, available: String },
}

/// One generated test module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Suite identifier, used by `--suite` and in reports
    pub name: String,
    /// Directory holding the fixtures
    pub root: String,
    /// Regex selecting fixture names; group 1 is the base identifier
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Opaque tag handed to the execution hook
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Generated module path
    pub output: String,
    /// Rust path of the execution hook, as seen from the generated module
    #[serde(default = "default_hook")]
    pub hook: String,
    /// Test name convention
    #[serde(default)]
    pub naming: NameStyle,
    /// Directory names never entered
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
    /// Matching files to leave out
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Forward slashes, no empty or `.` segments, `.` for an empty path. `..` is kept as written.
fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let joined = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    match (path.starts_with('/'), joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

fn default_hook() -> String {
    DEFAULT_HOOK.to_string()
}

impl SuiteConfig {
    /// Create a suite with default pattern, backend, hook and naming.
    pub fn new(name: impl Into<String>, root: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            pattern: default_pattern(),
            backend: default_backend(),
            output: output.into(),
            hook: default_hook(),
            naming: NameStyle::default(),
            exclude_dirs: Vec::new(),
            ignore: Vec::new(),
        }
    }

    /// Set the fixture name pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the backend tag
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Set the execution hook path
    pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
        self.hook = hook.into();
        self
    }

    /// Set the naming style
    pub fn with_naming(mut self, naming: NameStyle) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    /// The root as written into generated code: `/`-separated, without `./` prefix or trailing slash.
    pub fn normalized_root(&self) -> String {
        normalize_path(&self.root)
    }

    /// `output` in the same normalized form, used to detect suites writing the same file.
    pub fn normalized_output(&self) -> String {
        normalize_path(&self.output)
    }

    /// Label the completeness entry is named after: the root's last component, or the suite name when the
    /// root has none (e.g. `.`).
    pub fn root_label(&self) -> String {
        let root = self.normalized_root();
        Path::new(&root)
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn root_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.normalized_root())
    }

    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output)
    }

    /// Path handed to the execution hook for a fixture: root-joined and relative to the config directory.
    pub fn hook_path(&self, relative_path: &str) -> String {
        crate::runtime::fixture_path(&self.normalized_root(), relative_path)
    }

    pub fn fixture_pattern(&self) -> Result<FixturePattern, regex::Error> {
        FixturePattern::new(&self.pattern)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            exclude_dirs: self.exclude_dirs.clone(),
            ignore: self.ignore.clone(),
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixturegenConfig {
    pub suites: Vec<SuiteConfig>,
    /// Directory every relative path is resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl FixturegenConfig {
    /// Build a config in memory (e.g. from CLI flags or tests).
    pub fn new(base_dir: impl Into<PathBuf>, suites: Vec<SuiteConfig>) -> Result<Self, ConfigError> {
        let config = Self {
            suites,
            base_dir: base_dir.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        Self::from_json_str(&source, base_dir).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate config text, resolving paths against `base_dir`.
    pub fn from_json_str(source: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let parsed: FixturegenConfig = serde_json::from_str(source).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::new(base_dir, parsed.suites)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check names, outputs and patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suites.is_empty() {
            return Err(ConfigError::NoSuites);
        }

        let mut names: HashSet<&str> = HashSet::new();
        let mut outputs: HashMap<String, &str> = HashMap::new();

        for (index, suite) in self.suites.iter().enumerate() {
            if suite.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if !names.insert(suite.name.as_str()) {
                return Err(ConfigError::DuplicateSuite(suite.name.clone()));
            }
            let output = suite.normalized_output();
            if let Some(first) = outputs.insert(output.clone(), suite.name.as_str()) {
                return Err(ConfigError::DuplicateOutput {
                    output,
                    first: first.to_string(),
                    second: suite.name.clone(),
                });
            }
            suite.fixture_pattern().map_err(|source| ConfigError::InvalidPattern {
                suite: suite.name.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// All suites, or the one named `only`.
    pub fn select(&self, only: Option<&str>) -> Result<Vec<&SuiteConfig>, ConfigError> {
        match only {
            None => Ok(self.suites.iter().collect()),
            Some(name) => self
                .suites
                .iter()
                .find(|s| s.name == name)
                .map(|s| vec![s])
                .ok_or_else(|| ConfigError::UnknownSuite {
                    name: name.to_string(),
                    available: self
                        .suites
                        .iter()
                        .map(|s| s.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ========================================
    // SuiteConfig defaults and builders
    // ========================================

    #[test]
    fn test_new_suite_defaults() {
        let suite = SuiteConfig::new("maven", "testData/maven-inspections", "tests/generated/maven.rs");
        assert_eq!(suite.pattern, DEFAULT_PATTERN);
        assert_eq!(suite.backend, "ANY");
        assert_eq!(suite.hook, "super::execute_fixture");
        assert_eq!(suite.naming, NameStyle::Camel);
        assert!(suite.exclude_dirs.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let suite = SuiteConfig::new("a", "data", "out.rs")
            .with_pattern(r"^(\w+)\.json$")
            .with_backend("JVM")
            .with_hook("crate::run")
            .with_naming(NameStyle::Snake)
            .with_ignore(vec!["skip.json".to_string()]);
        assert_eq!(suite.pattern, r"^(\w+)\.json$");
        assert_eq!(suite.backend, "JVM");
        assert_eq!(suite.hook, "crate::run");
        assert_eq!(suite.naming, NameStyle::Snake);
        assert_eq!(suite.ignore, vec!["skip.json".to_string()]);
    }

    #[test]
    fn test_normalized_root_and_label() {
        let suite = SuiteConfig::new("s", "./testData\\maven-inspections/", "o.rs");
        assert_eq!(suite.normalized_root(), "testData/maven-inspections");
        assert_eq!(suite.root_label(), "maven-inspections");
        assert_eq!(suite.hook_path("alpha.xml"), "testData/maven-inspections/alpha.xml");
    }

    #[test]
    fn test_root_label_falls_back_to_suite_name() {
        let suite = SuiteConfig::new("top_level", ".", "o.rs");
        assert_eq!(suite.normalized_root(), ".");
        assert_eq!(suite.root_label(), "top_level");
        assert_eq!(suite.hook_path("alpha.xml"), "alpha.xml");
    }

    // ========================================
    // Parsing
    // ========================================

    #[test]
    fn test_parse_minimal_config_applies_defaults() {
        let json = r#"{"suites": [{"name": "m", "root": "data", "output": "tests/gen/m.rs"}]}"#;
        let config = FixturegenConfig::from_json_str(json, Path::new("/work")).unwrap();
        let suite = &config.suites[0];
        assert_eq!(suite.pattern, DEFAULT_PATTERN);
        assert_eq!(suite.naming, NameStyle::Camel);
        assert_eq!(suite.root_path(config.base_dir()), PathBuf::from("/work/data"));
        assert_eq!(suite.output_path(config.base_dir()), PathBuf::from("/work/tests/gen/m.rs"));
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "suites": [{
                "name": "m",
                "root": "data",
                "pattern": "^(\\w+)\\.pom$",
                "backend": "JVM_IR",
                "output": "gen.rs",
                "hook": "crate::hooks::run",
                "naming": "snake",
                "exclude_dirs": ["old"],
                "ignore": ["template.pom"]
            }]
        }"#;
        let config = FixturegenConfig::from_json_str(json, Path::new(".")).unwrap();
        let suite = &config.suites[0];
        assert_eq!(suite.pattern, r"^(\w+)\.pom$");
        assert_eq!(suite.backend, "JVM_IR");
        assert_eq!(suite.naming, NameStyle::Snake);
        assert_eq!(suite.exclude_dirs, vec!["old".to_string()]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"suites": [{"name": "m", "root": "d", "output": "o.rs", "recurse": true}]}"#;
        let err = FixturegenConfig::from_json_str(json, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    // ========================================
    // Validation
    // ========================================

    #[test]
    fn test_no_suites_rejected() {
        let err = FixturegenConfig::from_json_str(r#"{"suites": []}"#, Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::NoSuites));
    }

    #[test]
    fn test_duplicate_suite_rejected() {
        let suites = vec![
            SuiteConfig::new("m", "a", "a.rs"),
            SuiteConfig::new("m", "b", "b.rs"),
        ];
        let err = FixturegenConfig::new(".", suites).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSuite(ref name) if name == "m"));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let suites = vec![
            SuiteConfig::new("a", "a", "gen.rs"),
            SuiteConfig::new("b", "b", "gen.rs"),
        ];
        let err = FixturegenConfig::new(".", suites).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOutput { .. }));
    }

    #[test]
    fn test_aliased_outputs_rejected() {
        for (first, second) in [
            ("gen.rs", "./gen.rs"),
            ("tests/gen/m.rs", "tests//gen/./m.rs"),
            ("tests/gen/m.rs", "tests\\gen\\m.rs"),
        ] {
            let suites = vec![
                SuiteConfig::new("a", "a", first),
                SuiteConfig::new("b", "b", second),
            ];
            let err = FixturegenConfig::new(".", suites).unwrap_err();
            assert!(
                matches!(err, ConfigError::DuplicateOutput { ref output, .. } if output == first),
                "{first} vs {second}: {err}"
            );
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./gen.rs"), "gen.rs");
        assert_eq!(normalize_path("a/./b//c/"), "a/b/c");
        assert_eq!(normalize_path("./"), ".");
        assert_eq!(normalize_path("/abs/./x.rs"), "/abs/x.rs");
        assert_eq!(normalize_path("../shared/x.rs"), "../shared/x.rs");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let suites = vec![SuiteConfig::new("a", "a", "a.rs").with_pattern("^(unclosed")];
        let err = FixturegenConfig::new(".", suites).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref suite, .. } if suite == "a"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let suites = vec![SuiteConfig::new("  ", "a", "a.rs")];
        let err = FixturegenConfig::new(".", suites).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyName { index: 0 }));
    }

    #[test]
    fn test_select() {
        let suites = vec![
            SuiteConfig::new("a", "a", "a.rs"),
            SuiteConfig::new("b", "b", "b.rs"),
        ];
        let config = FixturegenConfig::new(".", suites).unwrap();
        assert_eq!(config.select(None).unwrap().len(), 2);
        assert_eq!(config.select(Some("b")).unwrap()[0].name, "b");

        let err = config.select(Some("c")).unwrap_err();
        assert_eq!(err.to_string(), "unknown suite `c` (available: a, b)");
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixturegen.json");
        fs::write(&path, r#"{"suites": [{"name": "m", "root": "data", "output": "gen.rs"}]}"#).unwrap();

        let config = FixturegenConfig::load(&path).unwrap();
        assert_eq!(config.base_dir(), dir.path());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixturegenConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
