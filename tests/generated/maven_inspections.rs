// @generated by fixturegen from `tests/fixtures/maven-inspections`. DO NOT MODIFY MANUALLY.
// Regenerate with: fixturegen regenerate --suite maven_inspections

#![allow(non_snake_case)]
/// Fixtures this module was generated from.
pub const SUITE: ::fixturegen::runtime::SuiteManifest = ::fixturegen::runtime::SuiteManifest {
    name: "maven_inspections",
    manifest_dir: env!("CARGO_MANIFEST_DIR"),
    root: "tests/fixtures/maven-inspections",
    pattern: "^([\\w\\-]+)\\.xml$",
    backend: "ANY",
    exclude_dirs: &[],
    ignore: &[],
    fixtures: &[
        (
            "testBothCompileAndTestCompileInTheSameExecution",
            "bothCompileAndTestCompileInTheSameExecution.xml",
        ),
        ("testDeprecatedJre", "deprecatedJre.xml"),
        ("testMissingDependencies", "missingDependencies.xml"),
        ("testNoExecutions", "noExecutions.xml"),
        ("testWrongJsExecution", "wrongJsExecution.xml"),
        ("testWrongPhaseExecution", "wrongPhaseExecution.xml"),
    ],
};
fn run_test(path: &str) -> ::fixturegen::runtime::Outcome {
    super::execute_fixture(path, SUITE.backend)
}
#[test]
fn testAllFilesPresentInMavenInspections() {
    ::fixturegen::runtime::assert_all_fixtures_present(&SUITE);
}
/// Fixture: `bothCompileAndTestCompileInTheSameExecution.xml`
#[test]
fn testBothCompileAndTestCompileInTheSameExecution() -> ::fixturegen::runtime::Outcome {
    run_test(
        "tests/fixtures/maven-inspections/bothCompileAndTestCompileInTheSameExecution.xml",
    )
}
/// Fixture: `deprecatedJre.xml`
#[test]
fn testDeprecatedJre() -> ::fixturegen::runtime::Outcome {
    run_test("tests/fixtures/maven-inspections/deprecatedJre.xml")
}
/// Fixture: `missingDependencies.xml`
#[test]
fn testMissingDependencies() -> ::fixturegen::runtime::Outcome {
    run_test("tests/fixtures/maven-inspections/missingDependencies.xml")
}
/// Fixture: `noExecutions.xml`
#[test]
fn testNoExecutions() -> ::fixturegen::runtime::Outcome {
    run_test("tests/fixtures/maven-inspections/noExecutions.xml")
}
/// Fixture: `wrongJsExecution.xml`
#[test]
fn testWrongJsExecution() -> ::fixturegen::runtime::Outcome {
    run_test("tests/fixtures/maven-inspections/wrongJsExecution.xml")
}
/// Fixture: `wrongPhaseExecution.xml`
#[test]
fn testWrongPhaseExecution() -> ::fixturegen::runtime::Outcome {
    run_test("tests/fixtures/maven-inspections/wrongPhaseExecution.xml")
}
