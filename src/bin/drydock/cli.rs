//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use drydock::core::metadata::ToolchainFamily;

/// Drydock - a build/test cycle driver for C and C++ packages
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full build/test cycle against a project directory
    Run(RunArgs),

    /// Print the resolved link targets and extra requirements
    Targets(TargetsArgs),

    /// Print the variables handed to the configure step
    Config(ConfigArgs),

    /// Remove generated build state
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Skip executing built binaries (cross builds)
    #[arg(long)]
    pub no_run: bool,

    /// Toolchain family (gcc, msvc, clang, apple-clang); detected when omitted
    #[arg(long)]
    pub compiler: Option<ToolchainFamily>,

    /// Output format: human or json
    #[arg(long, default_value = "human")]
    pub output_format: OutputFormat,
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Toolchain family (gcc, msvc, clang, apple-clang); detected when omitted
    #[arg(long)]
    pub compiler: Option<ToolchainFamily>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Project directory (defaults to the current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Machine-readable JSON output
    Json,
}
