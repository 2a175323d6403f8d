//! CLI module for fixturegen
//!
//! ## Commands
//!
//! - `regenerate` - Scan fixtures and rewrite the generated test modules
//! - `verify` - Check committed modules against the disk (for CI)
//! - `list` - Print fixtures and the test names they map to, without writing
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with its code and help text.
    pub fn diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate and verify fixture-driven test suites
#[derive(Parser, Debug)]
#[command(name = "fixturegen")]
#[command(version = VERSION)]
#[command(about = "Generate one test per fixture file and keep the suite complete", long_about = None)]
pub struct Cli {
    /// Configuration file; suite paths are relative to its directory
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan fixtures and rewrite generated test modules
    Regenerate {
        /// Only this suite
        #[arg(long, value_name = "NAME")]
        suite: Option<String>,
    },

    /// Check committed modules against the fixtures on disk
    Verify {
        /// Only this suite
        #[arg(long, value_name = "NAME")]
        suite: Option<String>,
    },

    /// Print discovered fixtures and their test names (dry run)
    List {
        /// Only this suite
        #[arg(long, value_name = "NAME")]
        suite: Option<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = commands::load_config(&cli.config)?;

    match cli.command {
        Command::Regenerate { suite } => commands::regenerate(&config, suite.as_deref()),
        Command::Verify { suite } => commands::verify(&config, suite.as_deref()),
        Command::List { suite } => commands::list(&config, suite.as_deref()),
    }
}

// ============================================================================
// Tests
// ============================================================================
