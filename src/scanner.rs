use std::ops::Range;

use regex::Regex;

/// The statement shape an import specifier was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import X from "./mod"`
    Static,
    /// `import("./mod")`
    Dynamic,
    /// `require("./mod")`
    Require,
    /// `import "./mod"` with no binding
    SideEffect,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Static => "static",
            ImportKind::Dynamic => "dynamic",
            ImportKind::Require => "require",
            ImportKind::SideEffect => "side_effect",
        }
    }
}

/// A module specifier found in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOccurrence {
    /// 0-based index into the split line buffer.
    pub line: usize,
    /// The exact specifier substring, without quotes.
    pub specifier: String,
    /// Byte range of the specifier within its original line.
    pub span: Range<usize>,
    pub kind: ImportKind,
}

/// Scans line-oriented text for import-like statements.
///
/// Patterns are compiled once and applied in fixed priority order. The
/// regex crate has no backreferences, so each quote style gets its own
/// alternation branch; a specifier must close with the quote that opened
/// it. Compiled regexes carry no match-position state between calls.
#[derive(Debug)]
pub struct ImportScanner {
    patterns: Vec<(ImportKind, Regex)>,
}

impl ImportScanner {
    pub fn new() -> Self {
        let patterns = vec![
            (
                ImportKind::Static,
                pattern(r#"\bfrom\s+(?:"([^"]*)"|'([^']*)')"#),
            ),
            (
                ImportKind::Dynamic,
                pattern(r#"\bimport\s*\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#),
            ),
            (
                ImportKind::Require,
                pattern(r#"\brequire\s*\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#),
            ),
            (
                ImportKind::SideEffect,
                pattern(r#"\bimport\s+(?:"([^"]*)"|'([^']*)')"#),
            ),
        ];

        ImportScanner { patterns }
    }

    /// Find every import occurrence in the given lines.
    ///
    /// Comment content is stripped before matching, so specifiers after a
    /// `//` marker or inside a `/* */` block (multi-line included) yield
    /// no occurrence. Scanning never fails; strict-mode rejection of
    /// ambiguous lines is the caller's concern.
    pub fn scan(&self, lines: &[&str]) -> Vec<ImportOccurrence> {
        let mut occurrences = Vec::new();
        let mut in_block_comment = false;

        for (index, line) in lines.iter().enumerate() {
            let code = strip_comments(line, &mut in_block_comment);

            for (kind, regex) in &self.patterns {
                for captures in regex.captures_iter(&code) {
                    let matched = captures.get(1).or_else(|| captures.get(2));
                    if let Some(matched) = matched {
                        occurrences.push(ImportOccurrence {
                            line: index,
                            specifier: matched.as_str().to_string(),
                            span: matched.range(),
                            kind: *kind,
                        });
                    }
                }
            }
        }

        occurrences
    }
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in pattern must compile")
}

/// Blank out comment content in one line, tracking open block comments
/// across lines. Comment bytes are replaced with spaces so that match
/// offsets in the stripped text index directly into the original line.
///
/// Quoting is not tracked: a `//` marker hides the rest of the line even
/// when it sits inside a string literal (so URL specifiers like
/// `'https://cdn/x'` are never matched). Same line-oriented model as the
/// rest of the scanner.
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut code = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_block_comment {
            match rest.find("*/") {
                Some(end) => {
                    blank(&mut code, end + 2);
                    rest = &rest[end + 2..];
                    *in_block_comment = false;
                }
                None => {
                    blank(&mut code, rest.len());
                    break;
                }
            }
        } else {
            let line_marker = rest.find("//");
            let block_marker = rest.find("/*");

            match (line_marker, block_marker) {
                (Some(l), Some(b)) if l < b => {
                    code.push_str(&rest[..l]);
                    blank(&mut code, rest.len() - l);
                    break;
                }
                (_, Some(b)) => {
                    code.push_str(&rest[..b]);
                    blank(&mut code, 2);
                    rest = &rest[b + 2..];
                    *in_block_comment = true;
                }
                (Some(l), None) => {
                    code.push_str(&rest[..l]);
                    blank(&mut code, rest.len() - l);
                    break;
                }
                (None, None) => {
                    code.push_str(rest);
                    break;
                }
            }
        }
    }

    code
}

/// Pad with one space per blanked byte, keeping byte offsets stable.
fn blank(code: &mut String, len: usize) {
    for _ in 0..len {
        code.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<ImportOccurrence> {
        let lines: Vec<&str> = text.split('\n').collect();
        ImportScanner::new().scan(&lines)
    }

    #[test]
    fn test_static_import() {
        let found = scan("import Component from 'components'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "components");
        assert_eq!(found[0].kind, ImportKind::Static);
        assert_eq!(found[0].line, 0);
    }

    #[test]
    fn test_double_quoted_import() {
        let found = scan(r#"import Component from "components""#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "components");
    }

    #[test]
    fn test_dynamic_import() {
        let found = scan("const Component = await import('components')");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "components");
        assert_eq!(found[0].kind, ImportKind::Dynamic);
    }

    #[test]
    fn test_require_import() {
        let found = scan("const Component = require('components')");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ImportKind::Require);
    }

    #[test]
    fn test_side_effect_import() {
        let found = scan("import 'components'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "components");
        assert_eq!(found[0].kind, ImportKind::SideEffect);
    }

    #[test]
    fn test_static_import_is_not_also_side_effect() {
        let found = scan("import Component from 'components'");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_multiple_imports_per_line() {
        let found = scan("import a from 'first'; import b from 'second'");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].specifier, "first");
        assert_eq!(found[1].specifier, "second");
        assert_eq!(found[0].line, found[1].line);
    }

    #[test]
    fn test_line_indices_follow_buffer() {
        let found = scan("const x = 1\nimport a from 'a'\n\nimport b from 'b'");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 1);
        assert_eq!(found[1].line, 3);
    }

    #[test]
    fn test_line_comment_hides_specifier() {
        let found = scan("// import Component from 'components'");
        assert!(found.is_empty());
    }

    #[test]
    fn test_mid_line_comment_hides_rest_of_line() {
        let found = scan("import a from 'a' // import b from 'b'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "a");
    }

    #[test]
    fn test_block_comment_hides_specifier() {
        let found = scan("/* import Component from 'components' */");
        assert!(found.is_empty());
    }

    #[test]
    fn test_multi_line_block_comment() {
        let found = scan("/*\nimport a from 'a'\n*/\nimport b from 'b'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "b");
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn test_code_resumes_after_block_comment_on_same_line() {
        let found = scan("/* note */ import a from 'a'");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specifier, "a");
    }

    #[test]
    fn test_spans_index_into_the_original_line() {
        let line = "/* note */ import a from 'components'";
        let found = scan(line);
        assert_eq!(found.len(), 1);
        assert_eq!(&line[found[0].span.clone()], "components");
        assert_eq!(found[0].span.start, 26);
    }

    #[test]
    fn test_repeated_specifier_spans_are_distinct() {
        let line = "const a = require('x'); const b = require('x')";
        let found = scan(line);
        assert_eq!(found.len(), 2);
        assert_ne!(found[0].span, found[1].span);
        assert_eq!(&line[found[0].span.clone()], "x");
        assert_eq!(&line[found[1].span.clone()], "x");
    }

    #[test]
    fn test_comment_marker_inside_string_hides_rest_of_line() {
        // Quoting is not tracked; the `//` in the URL reads as a line
        // comment and the specifier is never matched.
        let found = scan("import a from 'https://cdn/x'");
        assert!(found.is_empty());
    }

    #[test]
    fn test_mismatched_quotes_do_not_match() {
        let found = scan("import a from \"components'");
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_imports() {
        assert!(scan("const x = 1 + 1").is_empty());
    }
}
