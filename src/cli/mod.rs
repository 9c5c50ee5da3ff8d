//! CLI for inspecting builtin declaration files.
//!
//! The binary is a diagnostic tool for the machine-generated declaration
//! sources, not part of the library API:
//!
//! - `dump` - parse the sources and list every constant's publish form
//! - `check` - parse the sources and report accepted/dropped line counts
//! - `resolve <NAME>` - print one constant's publish representation
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors and
//! exits.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use crate::errors::BuiltinsError;
use crate::registry::BuiltinsRegistry;
use crate::resolve::VectorWidth;

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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<BuiltinsError> for CliError {
    fn from(err: BuiltinsError) -> Self {
        // Render through miette so source chains (I/O causes) stay visible.
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Builtin-constant inspector for the SLua scripting VM
#[derive(Parser, Debug)]
#[command(name = "slua-builtins")]
#[command(version = VERSION)]
#[command(about = "Inspect SLua/LSL builtin declaration files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Constant declaration file (default: embedded stock constants)
    #[arg(long, global = true, value_name = "FILE")]
    pub constants: Option<PathBuf>,

    /// Type-overlay declaration file (default: embedded SLua overlay)
    #[arg(long, global = true, value_name = "FILE")]
    pub overlay: Option<PathBuf>,

    /// Target a three-wide numeric-vector build (quaternions degrade)
    #[arg(long, global = true)]
    pub vector3: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every constant with its publish representation
    Dump,

    /// Parse the sources and report accepted/dropped line counts
    Check,

    /// Print one constant's publish representation
    Resolve {
        /// Constant name, e.g. NULL_KEY
        #[arg(value_name = "NAME")]
        name: String,
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let width = if cli.vector3 {
        VectorWidth::Three
    } else {
        VectorWidth::Four
    };

    let mut registry = BuiltinsRegistry::with_vector_width(width);
    registry.initialize(cli.constants.as_deref(), cli.overlay.as_deref())?;

    match cli.command {
        Command::Dump => dump(&registry),
        Command::Check => check(&registry, cli.constants.as_deref(), cli.overlay.as_deref()),
        Command::Resolve { name } => resolve(&registry, &name),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn dump(registry: &BuiltinsRegistry) -> CliResult<ExitCode> {
    let Some(db) = registry.database() else {
        return Err(CliError::failure("no builtins database installed"));
    };

    // The table is flat; sort for stable output.
    let mut names: Vec<&str> = db.constants().iter().map(|(name, _)| name).collect();
    names.sort_unstable();

    for name in names {
        match db.resolve(name) {
            Some(repr) => println!("{name} = {repr}"),
            None => println!("{name} = (unpublishable)"),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn check(
    registry: &BuiltinsRegistry,
    constants_path: Option<&Path>,
    overlay_path: Option<&Path>,
) -> CliResult<ExitCode> {
    let Some(db) = registry.database() else {
        return Err(CliError::failure("no builtins database installed"));
    };

    let constants_src = constants_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());
    let overlay_src = overlay_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<embedded>".to_string());

    println!(
        "constants ({constants_src}): {} accepted, {} dropped",
        db.constants().len(),
        db.constants().skipped_lines()
    );
    println!(
        "overlay   ({overlay_src}): {} accepted, {} dropped",
        db.overlay().len(),
        db.overlay().skipped_lines()
    );

    Ok(ExitCode::SUCCESS)
}

fn resolve(registry: &BuiltinsRegistry, name: &str) -> CliResult<ExitCode> {
    match registry.resolve(name) {
        Some(repr) => {
            println!("{name} = {repr}");
            Ok(ExitCode::SUCCESS)
        }
        None => Err(CliError::failure(format!(
            "'{name}' has no publishable representation"
        ))),
    }
}
