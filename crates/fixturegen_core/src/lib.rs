//! Provide the pure data model and naming policy shared by the fixturegen generator and its runtime checks.
//!
//! This crate is intentionally small and dependency-light. It knows what a fixture *is* once it has been
//! discovered, how a fixture's base identifier becomes a test name, and how an ordered suite of test entries is
//! assembled without name collisions.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state. Discovering fixtures on disk, emitting Rust
//!   source and re-checking the disk at test time all live in the `fixturegen` crate.
//! - Everything here is deterministic: the same inputs always produce the same names in the same order.

pub mod fixture;
pub mod naming;
pub mod suite;

pub use fixture::Fixture;
pub use naming::{NameStyle, TestCaseName, completeness_entry_name, split_words, to_test_case_name};
pub use suite::{CollisionParty, GeneratedSuite, NameCollisionError, SuiteEntry};
