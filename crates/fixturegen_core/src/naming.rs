//! Map fixture base identifiers to test entry names.
//!
//! ## Separator policy
//!
//! A base identifier is split into words at **every** character that is not ASCII alphanumeric. Hyphens,
//! underscores, dots, slashes, spaces and non-ASCII characters are all separators and are treated identically;
//! empty words are dropped. Consequently `foo-bar`, `foo_bar` and `fooBar` all map to the same camel-style name
//! (`testFooBar`) and collide, which [`crate::GeneratedSuite::build`] reports as an error.
//!
//! ## Styles
//!
//! - [`NameStyle::Camel`]: `test` + each word with its first letter upper-cased, rest verbatim
//!   (`deprecatedJre` → `testDeprecatedJre`).
//! - [`NameStyle::Snake`]: `test_` + each word split at camel humps, lower-cased, joined with `_`
//!   (`deprecatedJre` → `test_deprecated_jre`).
//!
//! Every produced name starts with `test`, so it can never be a Rust keyword.

use std::fmt;

/// Prefix of every generated test name.
pub const TEST_PREFIX: &str = "test";

/// Stem of the completeness entry name, before the root label is appended.
const COMPLETENESS_STEM: [&str; 4] = ["All", "Files", "Present", "In"];

/// Naming convention for generated test entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NameStyle {
    /// `testAlpha`, the shape of historical generated suites.
    #[default]
    Camel,
    /// `test_alpha`, the shape rustc's `non_snake_case` lint expects.
    Snake,
}

impl NameStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NameStyle::Camel => "camel",
            NameStyle::Snake => "snake",
        }
    }
}

impl fmt::Display for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identifier of one generated test entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestCaseName(String);

impl TestCaseName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TestCaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TestCaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split an identifier into words according to the separator policy.
pub fn split_words(identifier: &str) -> Vec<&str> {
    identifier
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Derive the test name for a fixture's base identifier.
pub fn to_test_case_name(base_identifier: &str, style: NameStyle) -> TestCaseName {
    let words = split_words(base_identifier);
    TestCaseName(join_with_prefix(&words, style))
}

/// Derive the name of the always-present completeness entry for a suite rooted at a directory labelled
/// `root_label` (normally the last component of the root path).
pub fn completeness_entry_name(root_label: &str, style: NameStyle) -> TestCaseName {
    let mut words: Vec<&str> = COMPLETENESS_STEM.to_vec();
    words.extend(split_words(root_label));
    TestCaseName(join_with_prefix(&words, style))
}

fn join_with_prefix(words: &[&str], style: NameStyle) -> String {
    let mut out = String::from(TEST_PREFIX);
    match style {
        NameStyle::Camel => {
            for word in words {
                push_capitalized(&mut out, word);
            }
        }
        NameStyle::Snake => {
            for word in words {
                for hump in camel_humps(word) {
                    out.push('_');
                    out.push_str(&hump.to_ascii_lowercase());
                }
            }
        }
    }
    out
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
    }
}

/// Split an ASCII alphanumeric word where a lower-case letter or digit is followed by an upper-case letter.
fn camel_humps(word: &str) -> Vec<&str> {
    let bytes = word.as_bytes();
    let mut humps = Vec::new();
    let mut start = 0;
    for i in 1..bytes.len() {
        let prev = bytes[i - 1];
        let cur = bytes[i];
        if cur.is_ascii_uppercase() && (prev.is_ascii_lowercase() || prev.is_ascii_digit()) {
            humps.push(&word[start..i]);
            start = i;
        }
    }
    if start < word.len() {
        humps.push(&word[start..]);
    }
    humps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camel(s: &str) -> String {
        to_test_case_name(s, NameStyle::Camel).into_string()
    }

    fn snake(s: &str) -> String {
        to_test_case_name(s, NameStyle::Snake).into_string()
    }

    // ========================================
    // Camel style
    // ========================================

    #[test]
    fn test_camel_simple() {
        assert_eq!(camel("alpha"), "testAlpha");
        assert_eq!(camel("beta"), "testBeta");
    }

    #[test]
    fn test_camel_keeps_inner_humps() {
        assert_eq!(camel("deprecatedJreWithDependencyManagement"), "testDeprecatedJreWithDependencyManagement");
    }

    #[test]
    fn test_camel_separators_are_equivalent() {
        assert_eq!(camel("foo-bar"), "testFooBar");
        assert_eq!(camel("foo_bar"), "testFooBar");
        assert_eq!(camel("foo.bar"), "testFooBar");
        assert_eq!(camel("foo bar"), "testFooBar");
        assert_eq!(camel("foo/bar"), "testFooBar");
        assert_eq!(camel("fooBar"), "testFooBar");
    }

    #[test]
    fn test_camel_repeated_and_edge_separators() {
        assert_eq!(camel("--foo__bar--"), "testFooBar");
    }

    #[test]
    fn test_camel_leading_digit() {
        assert_eq!(camel("1st-case"), "test1stCase");
    }

    #[test]
    fn test_camel_non_ascii_is_separator() {
        assert_eq!(camel("café-au-lait"), "testCafAuLait");
    }

    #[test]
    fn test_empty_identifier_maps_to_prefix() {
        assert_eq!(camel(""), "test");
        assert_eq!(camel("---"), "test");
        assert_eq!(snake("___"), "test");
    }

    // ========================================
    // Snake style
    // ========================================

    #[test]
    fn test_snake_simple() {
        assert_eq!(snake("alpha"), "test_alpha");
    }

    #[test]
    fn test_snake_splits_humps() {
        assert_eq!(snake("deprecatedJre"), "test_deprecated_jre");
        assert_eq!(snake("kotlinTestWithJunit"), "test_kotlin_test_with_junit");
    }

    #[test]
    fn test_snake_keeps_acronyms_together() {
        assert_eq!(snake("parseXMLFile"), "test_parse_xmlfile");
    }

    #[test]
    fn test_snake_digit_before_upper() {
        assert_eq!(snake("case2Foo"), "test_case2_foo");
    }

    #[test]
    fn test_snake_separators_are_equivalent() {
        assert_eq!(snake("foo-bar"), snake("foo_bar"));
        assert_eq!(snake("foo-bar"), snake("fooBar"));
    }

    // ========================================
    // Completeness entry
    // ========================================

    #[test]
    fn test_completeness_entry_camel() {
        assert_eq!(
            completeness_entry_name("maven-inspections", NameStyle::Camel).as_str(),
            "testAllFilesPresentInMavenInspections"
        );
    }

    #[test]
    fn test_completeness_entry_snake() {
        assert_eq!(
            completeness_entry_name("maven-inspections", NameStyle::Snake).as_str(),
            "test_all_files_present_in_maven_inspections"
        );
    }

    #[test]
    fn test_completeness_entry_without_label() {
        assert_eq!(
            completeness_entry_name("", NameStyle::Camel).as_str(),
            "testAllFilesPresentIn"
        );
    }

    #[test]
    fn test_style_display() {
        assert_eq!(NameStyle::Camel.to_string(), "camel");
        assert_eq!(NameStyle::Snake.to_string(), "snake");
        assert_eq!(NameStyle::default(), NameStyle::Camel);
    }
}
