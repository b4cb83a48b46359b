use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{ConfigSource, Options};
use crate::discovery::{discover_files, DiscoveryConfig};
use crate::paths;
use crate::rewrite::Rewriter;

use super::output;
use super::OutputFormat;

/// Everything the CLI needs to run one command.
pub struct CommandContext {
    pub project_root: PathBuf,
    pub tsconfig: PathBuf,
    pub cwd: Option<PathBuf>,
    pub strict_same_line: bool,
    pub discovery: DiscoveryConfig,
}

impl CommandContext {
    pub fn new(
        path: &str,
        project: Option<&str>,
        cwd: Option<&str>,
        strict_same_line: bool,
        include: Vec<String>,
        exclude: Vec<String>,
    ) -> Self {
        let project_root = PathBuf::from(path);
        let tsconfig = match project {
            Some(explicit) => PathBuf::from(explicit),
            None => project_root.join("tsconfig.json"),
        };
        CommandContext {
            project_root,
            tsconfig,
            cwd: cwd.map(PathBuf::from),
            strict_same_line,
            discovery: DiscoveryConfig { include, exclude },
        }
    }

    fn build_rewriter(&self) -> Result<Rewriter> {
        let rewriter = Rewriter::new(Options {
            config: Some(ConfigSource::File(self.tsconfig.clone())),
            cwd: self.cwd.clone(),
            strict_same_line: self.strict_same_line,
        })
        .with_context(|| format!("invalid configuration {}", self.tsconfig.display()))?;
        Ok(rewriter)
    }
}

/// One processed file in a batch run.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub changed: bool,
}

/// Rewrite aliased imports across the project tree. Dry run unless
/// `write` is set.
pub fn run_rewrite(context: &CommandContext, write: bool, format: &OutputFormat) -> Result<String> {
    let rewriter = context.build_rewriter()?;
    let reports = process_project(context, &rewriter, write)?;
    Ok(output::format_rewrite_summary(&reports, write, format))
}

/// Report files still containing aliased imports. The boolean is true
/// when any were found.
pub fn run_check(context: &CommandContext, format: &OutputFormat) -> Result<(String, bool)> {
    let rewriter = context.build_rewriter()?;
    let reports = process_project(context, &rewriter, false)?;
    let has_findings = reports.iter().any(|r| r.changed);
    Ok((output::format_check_summary(&reports, format), has_findings))
}

/// Print the normalized alias table.
pub fn run_aliases(context: &CommandContext, format: &OutputFormat) -> Result<String> {
    let rewriter = context.build_rewriter()?;
    Ok(output::format_aliases(rewriter.config(), format))
}

/// Run the rewriter over every discovered file. The rewriter is immutable,
/// so the per-file work parallelizes over a shared reference.
fn process_project(
    context: &CommandContext,
    rewriter: &Rewriter,
    write: bool,
) -> Result<Vec<FileReport>> {
    let files = discover_files(&context.project_root, &context.discovery)?;

    let mut reports = files
        .par_iter()
        .map(|file| process_file(&context.project_root, rewriter, file, write))
        .collect::<Result<Vec<FileReport>>>()?;

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(reports)
}

fn process_file(
    root: &Path,
    rewriter: &Rewriter,
    file: &Path,
    write: bool,
) -> Result<FileReport> {
    let text =
        std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;

    // Alias arithmetic is anchored at the project root, so the importing
    // file's path must be root-relative.
    let relative_path = file.strip_prefix(root).unwrap_or(file);
    let rewritten = rewriter
        .rewrite_source(relative_path, &text)
        .with_context(|| format!("failed to rewrite {}", file.display()))?;

    let changed = rewritten != text;
    if changed && write {
        std::fs::write(file, &rewritten)
            .with_context(|| format!("failed to write {}", file.display()))?;
    }

    Ok(FileReport {
        path: paths::to_specifier(relative_path),
        changed,
    })
}
