use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

/// The `paths` mapping from a tsconfig. Insertion order is significant:
/// the first alias whose prefix matches an import specifier wins, so the
/// map must iterate in configuration order (IndexMap, not a sorted map).
pub type PathsMap = IndexMap<String, Vec<String>>;

/// The subset of tsconfig `compilerOptions` relevant to alias rewriting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Base for non-relative module resolution. Absent or `"."` means the
    /// working directory.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Alias patterns mapped to ordered candidate target patterns.
    #[serde(default)]
    pub paths: Option<PathsMap>,
}

/// A tsconfig.json wrapper around compiler options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    pub compiler_options: CompilerOptions,
}

/// Where the configuration comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Compiler options supplied directly.
    CompilerOptions(CompilerOptions),
    /// A full tsconfig object supplied directly.
    TsConfig(TsConfig),
    /// A tsconfig.json file to read from disk.
    File(PathBuf),
}

/// Options for building a [`crate::rewrite::Rewriter`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// The path-mapping configuration. `None` is a fatal error.
    pub config: Option<ConfigSource>,
    /// Working directory offset applied to `baseUrl` for relative-path
    /// arithmetic. Defaults to the directory the process runs in.
    pub cwd: Option<PathBuf>,
    /// Fail when a line carries more than one static-import match
    /// (legacy behavior). Default is to rewrite each match.
    pub strict_same_line: bool,
}

/// One normalized alias: the prefix to match (trailing `/*` stripped to a
/// trailing `/`) and its candidate targets, normalized the same way.
#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub prefix: String,
    pub targets: Vec<String>,
}

/// Configuration normalized once and shared read-only across every file
/// the rewriter processes.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Normalized `baseUrl` (`"./"` when absent or `"."`).
    pub base_dir: PathBuf,
    /// Normalized working-directory offset (`"./"` when absent or `"."`).
    pub working_dir: PathBuf,
    /// The process current directory at construction time, used only when
    /// an absolute path must be compared against a relative one.
    pub process_dir: PathBuf,
    /// Aliases in configuration insertion order.
    pub aliases: Vec<AliasEntry>,
    pub strict_same_line: bool,
}

impl ResolvedConfig {
    /// Validate and normalize the supplied options.
    pub fn from_options(options: &Options) -> Result<Self, RewriteError> {
        let compiler_options = match &options.config {
            None => return Err(RewriteError::MissingConfig),
            Some(ConfigSource::CompilerOptions(co)) => co.clone(),
            Some(ConfigSource::TsConfig(ts)) => ts.compiler_options.clone(),
            Some(ConfigSource::File(path)) => load_compiler_options(path)?,
        };

        let paths = compiler_options.paths.ok_or(RewriteError::MissingPaths)?;

        let aliases = paths
            .into_iter()
            .map(|(pattern, targets)| AliasEntry {
                prefix: strip_wildcard(&pattern),
                targets: targets.iter().map(|t| strip_wildcard(t)).collect(),
            })
            .collect();

        Ok(ResolvedConfig {
            base_dir: normalize_dir_option(compiler_options.base_url.as_deref()),
            working_dir: normalize_dir_option(
                options.cwd.as_deref().and_then(|p| p.to_str()),
            ),
            process_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            aliases,
            strict_same_line: options.strict_same_line,
        })
    }
}

/// Read compiler options from a tsconfig.json file. Accepts either a
/// `{ "compilerOptions": ... }` wrapper or bare compiler options.
fn load_compiler_options(path: &Path) -> Result<CompilerOptions, RewriteError> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            RewriteError::MissingConfig
        } else {
            RewriteError::ConfigRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| RewriteError::ConfigParse {
            path: path.to_path_buf(),
            source: err,
        })?;

    let options_value = match value.get("compilerOptions") {
        Some(inner) => inner.clone(),
        None => value,
    };

    serde_json::from_value(options_value).map_err(|err| RewriteError::ConfigParse {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Strip a trailing `/*` wildcard down to a trailing `/`.
fn strip_wildcard(pattern: &str) -> String {
    match pattern.strip_suffix("/*") {
        Some(stem) => format!("{}/", stem),
        None => pattern.to_string(),
    }
}

/// `None` and `"."` both mean "here".
fn normalize_dir_option(dir: Option<&str>) -> PathBuf {
    match dir {
        None | Some(".") => PathBuf::from("./"),
        Some(other) => PathBuf::from(other),
    }
}
