use std::path::{Path, PathBuf};

use crate::config::{Options, ResolvedConfig};
use crate::error::RewriteError;
use crate::resolver::AliasResolver;
use crate::scanner::{ImportKind, ImportScanner};

/// How a file's contents were delivered.
#[derive(Debug, Clone)]
pub enum Contents {
    Text(String),
    /// Continuous byte-stream delivery; not supported.
    Stream,
}

/// A file handed to the rewriter. `contents: None` means "no content"
/// and passes through unchanged.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: Option<PathBuf>,
    pub contents: Option<Contents>,
}

impl SourceFile {
    pub fn text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SourceFile {
            path: Some(path.into()),
            contents: Some(Contents::Text(text.into())),
        }
    }

    /// The text contents, if any.
    pub fn as_text(&self) -> Option<&str> {
        match &self.contents {
            Some(Contents::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// Applies the scanner and resolver to files, with the configuration
/// validated and normalized once at construction.
///
/// Holds no mutable state; a `Rewriter` can be shared across threads and
/// reused for any number of files.
#[derive(Debug)]
pub struct Rewriter {
    config: ResolvedConfig,
    scanner: ImportScanner,
}

impl Rewriter {
    pub fn new(options: Options) -> Result<Self, RewriteError> {
        let config = ResolvedConfig::from_options(&options)?;
        Ok(Rewriter {
            config,
            scanner: ImportScanner::new(),
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Rewrite one file, enforcing the structural rules: missing contents
    /// pass through, streamed contents and missing paths are fatal.
    pub fn rewrite_file(&self, file: SourceFile) -> Result<SourceFile, RewriteError> {
        let SourceFile { path, contents } = file;

        let contents = match contents {
            None => return Ok(SourceFile {
                path,
                contents: None,
            }),
            Some(contents) => contents,
        };

        let text = match contents {
            Contents::Stream => return Err(RewriteError::StreamingUnsupported),
            Contents::Text(text) => text,
        };

        let path = path.ok_or(RewriteError::MissingFilePath)?;
        let rewritten = self.rewrite_source(&path, &text)?;

        Ok(SourceFile {
            path: Some(path),
            contents: Some(Contents::Text(rewritten)),
        })
    }

    /// Scanner + resolver over raw text, without the per-file structural
    /// checks. Returns the input unchanged when nothing matches.
    pub fn rewrite_source(&self, path: &Path, text: &str) -> Result<String, RewriteError> {
        let lines: Vec<&str> = text.split('\n').collect();
        let occurrences = self.scanner.scan(&lines);

        if self.config.strict_same_line {
            let mut previous_static_line = None;
            for occurrence in &occurrences {
                if occurrence.kind != ImportKind::Static {
                    continue;
                }
                if previous_static_line == Some(occurrence.line) {
                    return Err(RewriteError::MultipleImportsOnLine {
                        line: occurrence.line + 1,
                    });
                }
                previous_static_line = Some(occurrence.line);
            }
        }

        if occurrences.is_empty() {
            return Ok(text.to_string());
        }

        let resolved = AliasResolver::new(&self.config).resolve_lines(&lines, &occurrences, path);
        Ok(resolved.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompilerOptions, ConfigSource, PathsMap};

    fn component_rewriter(strict: bool) -> Rewriter {
        let mut paths = PathsMap::new();
        paths.insert(
            "components".to_string(),
            vec!["./src/components/Component".to_string()],
        );
        Rewriter::new(Options {
            config: Some(ConfigSource::CompilerOptions(CompilerOptions {
                base_url: Some("./".to_string()),
                paths: Some(paths),
            })),
            cwd: None,
            strict_same_line: strict,
        })
        .unwrap()
    }

    #[test]
    fn test_null_contents_pass_through() {
        let rewriter = component_rewriter(false);
        let file = SourceFile {
            path: None,
            contents: None,
        };
        let out = rewriter.rewrite_file(file).unwrap();
        assert!(out.contents.is_none());
    }

    #[test]
    fn test_stream_contents_are_fatal() {
        let rewriter = component_rewriter(false);
        let file = SourceFile {
            path: Some(PathBuf::from("./src/pages/Page.ts")),
            contents: Some(Contents::Stream),
        };
        let err = rewriter.rewrite_file(file).unwrap_err();
        assert!(matches!(err, RewriteError::StreamingUnsupported));
    }

    #[test]
    fn test_missing_path_is_fatal_even_for_empty_text() {
        let rewriter = component_rewriter(false);
        let file = SourceFile {
            path: None,
            contents: Some(Contents::Text(String::new())),
        };
        let err = rewriter.rewrite_file(file).unwrap_err();
        assert!(matches!(err, RewriteError::MissingFilePath));
    }

    #[test]
    fn test_empty_text_passes_through() {
        let rewriter = component_rewriter(false);
        let out = rewriter
            .rewrite_file(SourceFile::text("./src/pages/Page.ts", ""))
            .unwrap();
        assert_eq!(out.as_text(), Some(""));
    }

    #[test]
    fn test_no_occurrences_is_identity() {
        let rewriter = component_rewriter(false);
        let input = "const x = 1\nlet y = x + 1\n";
        let out = rewriter
            .rewrite_source(Path::new("./src/pages/Page.ts"), input)
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_rewrite_preserves_other_lines() {
        let rewriter = component_rewriter(false);
        let out = rewriter
            .rewrite_source(
                Path::new("./src/pages/Page.ts"),
                "import module from 'module'\nimport Component from 'components'",
            )
            .unwrap();
        assert_eq!(
            out,
            "import module from 'module'\nimport Component from '../components/Component'"
        );
    }

    #[test]
    fn test_crlf_lines_round_trip() {
        let rewriter = component_rewriter(false);
        let out = rewriter
            .rewrite_source(
                Path::new("./src/pages/Page.ts"),
                "import module from 'module'\r\nconst x = 1\r\n",
            )
            .unwrap();
        assert_eq!(out, "import module from 'module'\r\nconst x = 1\r\n");
    }

    #[test]
    fn test_permissive_multiple_imports_per_line() {
        let rewriter = component_rewriter(false);
        let out = rewriter
            .rewrite_source(
                Path::new("./src/pages/Page.ts"),
                "import module from 'module'; import Component from 'components'",
            )
            .unwrap();
        assert_eq!(
            out,
            "import module from 'module'; import Component from '../components/Component'"
        );
    }

    #[test]
    fn test_strict_mode_rejects_multiple_static_imports_per_line() {
        let rewriter = component_rewriter(true);
        let err = rewriter
            .rewrite_source(
                Path::new("./src/pages/Page.ts"),
                "import a from 'a'; import b from 'b'",
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RewriteError::MultipleImportsOnLine { line: 1 }
        ));
    }

    #[test]
    fn test_strict_mode_allows_one_import_per_line() {
        let rewriter = component_rewriter(true);
        let out = rewriter
            .rewrite_source(
                Path::new("./src/pages/Page.ts"),
                "import a from 'a'\nimport Component from 'components'",
            )
            .unwrap();
        assert!(out.contains("../components/Component"));
    }
}
