use std::path::{Path, PathBuf};

use crate::config::ResolvedConfig;
use crate::paths;
use crate::scanner::ImportOccurrence;

/// Rewrites matched import specifiers into relative paths.
///
/// Holds only a reference to the immutable configuration; safe to share
/// across files.
pub struct AliasResolver<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> AliasResolver<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        AliasResolver { config }
    }

    /// Produce the rewritten line buffer. Lines with no matched occurrence
    /// pass through verbatim; multiple occurrences on one line each rewrite
    /// their own specifier text at the position the scanner matched it, so
    /// a replacement that happens to contain another occurrence's specifier
    /// as a substring never captures that occurrence's rewrite.
    pub fn resolve_lines(
        &self,
        lines: &[&str],
        occurrences: &[ImportOccurrence],
        file_path: &Path,
    ) -> Vec<String> {
        let current_dir = paths::dir_of(file_path);
        let mut resolved: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

        // The scanner groups occurrences by pattern within a line; apply
        // them left to right, shifting later spans by the length change of
        // earlier replacements on the same line.
        let mut ordered: Vec<&ImportOccurrence> = occurrences.iter().collect();
        ordered.sort_by_key(|o| (o.line, o.span.start));

        let mut current_line = None;
        let mut shift: isize = 0;
        for occurrence in ordered {
            if current_line != Some(occurrence.line) {
                current_line = Some(occurrence.line);
                shift = 0;
            }

            if let Some(replacement) = self.resolve_specifier(&occurrence.specifier, &current_dir)
            {
                let start = (occurrence.span.start as isize + shift) as usize;
                let end = (occurrence.span.end as isize + shift) as usize;
                resolved[occurrence.line].replace_range(start..end, &replacement);
                shift += replacement.len() as isize - occurrence.specifier.len() as isize;
            }
        }

        resolved
    }

    /// Resolve one specifier to its relative form, or `None` when no
    /// configured alias prefix matches (the line is left untouched).
    pub fn resolve_specifier(&self, specifier: &str, current_dir: &Path) -> Option<String> {
        // First alias whose prefix matches wins; insertion order, not
        // longest-prefix.
        let entry = self
            .config
            .aliases
            .iter()
            .find(|entry| specifier.starts_with(&entry.prefix))?;

        // Only the first candidate target is ever used.
        let candidate = entry.targets.first()?;
        let target = specifier.replacen(&entry.prefix, candidate, 1);
        if target.is_empty() {
            return None;
        }

        Some(self.relative_specifier(&target, current_dir))
    }

    /// Relative path from the importing file's directory to the target,
    /// with the target interpreted against the baseUrl/cwd anchor.
    fn relative_specifier(&self, target: &str, current_dir: &Path) -> String {
        let anchor = self.config.base_dir.join(&self.config.working_dir);
        let target = paths::normalize(&anchor.join(target));

        let relative = match paths::relative(current_dir, &target) {
            Some(relative) => relative,
            None => {
                // Mixed absolute/relative frames (or an importer path that
                // escapes upward): anchor both in the process directory.
                let from = self.absolutize(current_dir);
                let to = self.absolutize(&target);
                paths::relative(&from, &to).unwrap_or(target)
            }
        };

        let specifier = paths::to_specifier(&relative);
        if specifier.is_empty() {
            "./".to_string()
        } else if !specifier.starts_with('.') {
            format!("./{}", specifier)
        } else {
            specifier
        }
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            paths::normalize(path)
        } else {
            paths::normalize(&self.config.process_dir.join(path))
        }
    }
}
