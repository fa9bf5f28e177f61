//! namecheck CLI tool.
//!
//! Usage:
//! ```bash
//! namecheck check [OPTIONS] [PATH]
//! namecheck check-tree FILE.json
//! namecheck list-rules
//! namecheck init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use namecheck_core::{FailOn, MethodScan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Naming-convention checker for Java sources
#[derive(Parser)]
#[command(name = "namecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "NAMECHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check naming conventions in a source tree
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        options: CheckOptions,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Check a declaration tree serialized as JSON
    CheckTree {
        /// JSON file produced by a front-end
        file: PathBuf,

        /// Directory that source paths in the tree are relative to
        /// (defaults to the directory holding the JSON file)
        #[arg(long)]
        root: Option<PathBuf>,

        #[command(flatten)]
        options: CheckOptions,
    },

    /// List available rules, or describe one
    ListRules {
        /// Rule code or name (e.g. NC003 or constant-name)
        rule: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by the checking subcommands.
#[derive(clap::Args, Clone, Copy)]
pub struct CheckOptions {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// How ordinary methods are checked (overrides config)
    #[arg(long)]
    pub method_scan: Option<MethodScanArg>,

    /// Exit with status 1 on any warning, or never (overrides config)
    #[arg(long)]
    pub fail_on: Option<FailOn>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-diagnostic compact format.
    Compact,
    /// Source excerpts rendered with miette.
    Pretty,
}

/// Command-line spelling of [`MethodScan`].
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum MethodScanArg {
    /// Check every method and visit every body.
    Always,
    /// Check and descend only into methods named like their class.
    OnCollision,
}

impl From<MethodScanArg> for MethodScan {
    fn from(arg: MethodScanArg) -> Self {
        match arg {
            MethodScanArg::Always => Self::Always,
            MethodScanArg::OnCollision => Self::OnCollision,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            options,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, options, exclude, &source)
        }
        Commands::CheckTree {
            file,
            root,
            options,
        } => {
            let project_dir = file
                .parent()
                .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);
            let source = config_resolver::resolve(&project_dir, cli.config.as_deref());
            commands::check_tree::run(&file, root.as_deref(), options, &source)
        }
        Commands::ListRules { rule } => commands::list_rules::run(rule.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
