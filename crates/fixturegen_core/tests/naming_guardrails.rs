use fixturegen_core::{Fixture, GeneratedSuite, NameStyle, to_test_case_name};

/// Base identifiers taken from a real inspection fixture directory.
const HISTORICAL_IDENTIFIERS: &[&str] = &[
    "bothCompileAndTestCompileInTheSameExecution",
    "dependencyWithNoExecution",
    "deprecatedJre",
    "deprecatedJreWithDependencyManagement",
    "deprecatedKotlinxCoroutines",
    "deprecatedKotlinxCoroutinesNoError",
    "ideAndMavenVersions",
    "ideAndMavenVersionsSuppression",
    "kotlinTestWithJunit",
    "missingDependencies",
    "noExecutions",
    "oldVersionWithJre",
    "sameVersionPluginLibrary",
    "sameVersionPluginLibrarySuppression",
    "wrongJsExecution",
    "wrongPhaseExecution",
];

fn is_rust_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[test]
fn historical_identifiers_keep_their_camel_names() {
    for id in HISTORICAL_IDENTIFIERS {
        let name = to_test_case_name(id, NameStyle::Camel);
        let mut expected = String::from("test");
        expected.push_str(&id[..1].to_ascii_uppercase());
        expected.push_str(&id[1..]);
        assert_eq!(name.as_str(), expected, "camel name drifted for {}", id);
    }
}

#[test]
fn historical_identifiers_build_without_collisions_in_both_styles() {
    for style in [NameStyle::Camel, NameStyle::Snake] {
        let fixtures = HISTORICAL_IDENTIFIERS
            .iter()
            .map(|id| Fixture::new(format!("{id}.xml"), *id));
        let suite = GeneratedSuite::build("maven-inspections", fixtures, style)
            .unwrap_or_else(|e| panic!("unexpected collision in {style} style: {e}"));
        assert_eq!(suite.len(), HISTORICAL_IDENTIFIERS.len());
    }
}

#[test]
fn generated_names_are_rust_identifiers() {
    let awkward = ["", "-", "9lives", "a.b.c", "ünïcödé", "x y z", "__init__", "UPPER_CASE", "fn", "self"];
    for id in HISTORICAL_IDENTIFIERS.iter().chain(awkward.iter()) {
        for style in [NameStyle::Camel, NameStyle::Snake] {
            let name = to_test_case_name(id, style);
            assert!(
                is_rust_identifier(name.as_str()),
                "{:?} produced invalid identifier {:?} in {} style",
                id,
                name,
                style
            );
        }
    }
}
