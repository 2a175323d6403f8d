#![forbid(unsafe_code)]
//! fixturegen: test cases generated from fixture files
//!
//! fixturegen scans a directory of fixture files, derives one deterministic test name per fixture and writes a Rust
//! module holding one `#[test]` per fixture plus a completeness entry that fails whenever fixtures on disk and the
//! generated tests disagree. The pure naming and collision rules live in `fixturegen_core`; this crate adds the
//! filesystem scan, code emission, configuration and the `fixturegen` CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Runtime assertions**: [`runtime::assert_all_fixtures_present`] panics on purpose. It is the body of a
//!   generated `#[test]` and a panic is how a test fails.
//!
//! - **True invariants**: If a panic represents a fixturegen bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod check;
pub mod cli;
pub mod config;
pub mod generate;
pub mod runtime;
pub mod scanner;
pub mod synth;

pub use fixturegen_core::{Fixture, GeneratedSuite, NameCollisionError, NameStyle, TestCaseName};

pub use check::{CompletenessMismatch, check_completeness, verify_suite};
pub use config::{FixturegenConfig, SuiteConfig};
pub use generate::{generate_suite, regenerate_all};
pub use scanner::{FixturePattern, ScanError, ScanOptions, scan};
