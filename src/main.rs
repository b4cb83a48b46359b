use anyhow::Result;
use clap::Parser;

use dealias::cli::commands::{self, CommandContext};
use dealias::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let context = |path: &str| {
        CommandContext::new(
            path,
            cli.project.as_deref(),
            cli.cwd.as_deref(),
            cli.strict_same_line,
            cli.include.clone(),
            cli.exclude.clone(),
        )
    };

    match cli.command {
        Commands::Rewrite { ref path, write } => {
            let output = commands::run_rewrite(&context(path), write, &cli.format)?;
            println!("{}", output);
        }

        Commands::Check { ref path } => {
            let (output, has_findings) = commands::run_check(&context(path), &cli.format)?;
            println!("{}", output);
            if has_findings {
                std::process::exit(1);
            }
        }

        Commands::Aliases { ref path } => {
            let output = commands::run_aliases(&context(path), &cli.format)?;
            println!("{}", output);
        }
    }

    Ok(())
}
