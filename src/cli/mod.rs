use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;
pub mod output;

#[derive(Parser)]
#[command(
    name = "dealias",
    version,
    about = "Rewrite tsconfig path aliases into relative imports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the tsconfig.json (default: <path>/tsconfig.json)
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Working directory offset for relative-path arithmetic
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Include only files matching this glob
    #[arg(long, global = true)]
    pub include: Vec<String>,

    /// Exclude files matching this glob
    #[arg(long, global = true)]
    pub exclude: Vec<String>,

    /// Fail on lines carrying more than one static import (legacy behavior)
    #[arg(long, global = true)]
    pub strict_same_line: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite aliased imports across a project tree
    Rewrite {
        /// Project path (default: current directory)
        #[arg(default_value = ".")]
        path: String,
        /// Write changes back to disk (default: dry run)
        #[arg(long)]
        write: bool,
    },

    /// Report files that still contain aliased imports (exit 1 if any)
    Check {
        /// Project path (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Print the normalized alias table
    Aliases {
        /// Project path (default: current directory)
        #[arg(default_value = ".")]
        path: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Compact,
}
