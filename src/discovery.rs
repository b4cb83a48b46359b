use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// File extensions the rewriter operates on.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

/// Directories that never contain rewritable project sources.
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["node_modules/", "dist/", "build/", "coverage/"];

/// Configuration for project file discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Glob patterns to include (empty means include all).
    pub include: Vec<String>,
    /// Glob patterns to exclude.
    pub exclude: Vec<String>,
}

/// Discover TypeScript/JavaScript source files under `root`, respecting
/// .gitignore.
pub fn discover_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false) // don't skip dot-prefixed dirs entirely (let gitignore decide)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .parents(true);

    {
        let mut overrides = ignore::overrides::OverrideBuilder::new(root);
        for pattern in DEFAULT_EXCLUDE_PATTERNS {
            overrides
                .add(&format!("!{}", pattern))
                .context("invalid default exclude pattern")?;
        }
        for pattern in &config.exclude {
            overrides
                .add(&format!("!{}", pattern))
                .context("invalid exclude pattern")?;
        }
        for pattern in &config.include {
            overrides.add(pattern).context("invalid include pattern")?;
        }
        builder.overrides(overrides.build().context("failed to build overrides")?);
    }

    for entry in builder.build() {
        let entry = entry.context("error reading directory entry")?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let is_source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if !is_source {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
