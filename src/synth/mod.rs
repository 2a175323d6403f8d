//! Emit a generated test module from a [`GeneratedSuite`].
//!
//! ## Notes
//!
//! - Emission builds a token stream with `quote`, parses it back with `syn` and formats it with `prettyplease`,
//!   so the output is always syntactically valid and formatted the same way on every machine.
//! - Emission is codegen-only: it does not read fixtures, touch the filesystem or look at the clock. Identical
//!   inputs give byte-identical output.
//! - The manifest directory is resolved with `env!("CARGO_MANIFEST_DIR")` when the *consuming* crate compiles,
//!   never at generation time.
//!
//! ## Shape of a generated module
//!
//! ```text
//! // @generated header
//! #![allow(non_snake_case)]                    (camel naming only)
//! pub const SUITE: SuiteManifest = ...;        explicit registry of (name, path) pairs
//! fn run_test(path) -> Outcome                 forwards to the configured hook with SUITE.backend
//!                                              (`#[allow(dead_code)]` while there are no fixtures)
//! #[test] fn testAllFilesPresentIn<Root>()     completeness entry
//! #[test] fn test<Fixture>() -> Outcome        one per fixture
//! ```

mod emit;

use fixturegen_core::GeneratedSuite;
use thiserror::Error;

use crate::config::SuiteConfig;

/// Marker placed on the first line of every generated module.
pub const GENERATED_MARKER: &str = "@generated";

#[derive(Debug, Error, miette::Diagnostic)]
pub enum SynthError {
    #[error("hook `{hook}` is not a Rust path: {source}")]
    #[diagnostic(
        code(fixturegen::synth::invalid_hook),
        help("use a path such as `super::execute_fixture` or `crate::harness::run`")
    )]
    InvalidHookPath {
        hook: String,
        #[source]
        source: syn::Error,
    },

    #[error("generated tokens do not form a valid module: {0}")]
    #[diagnostic(code(fixturegen::synth::format))]
    Format(#[source] syn::Error),
}

/// Render the module for `suite` as formatted Rust source.
pub fn synthesize(config: &SuiteConfig, suite: &GeneratedSuite) -> Result<String, SynthError> {
    let hook: syn::Path = syn::parse_str(&config.hook).map_err(|source| SynthError::InvalidHookPath {
        hook: config.hook.clone(),
        source,
    })?;

    let tokens = emit::emit_module(config, suite, &hook);
    let file: syn::File = syn::parse2(tokens).map_err(SynthError::Format)?;

    let mut out = header(config);
    out.push_str(&prettyplease::unparse(&file));
    Ok(out)
}

/// Comment lines prepended to the formatted module (`prettyplease` does not carry comments).
fn header(config: &SuiteConfig) -> String {
    format!(
        "// {GENERATED_MARKER} by fixturegen from `{root}`. DO NOT MODIFY MANUALLY.\n\
         // Regenerate with: fixturegen regenerate --suite {name}\n\n",
        root = config.normalized_root(),
        name = config.name,
    )
}
