use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running the rewriter.
///
/// Alias misses are not errors: a specifier matching no configured alias
/// is simply left untouched. Everything here is structural and surfaces
/// to the caller with a descriptive message.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No usable configuration was supplied, or the referenced
    /// tsconfig.json could not be read or parsed.
    #[error("could not find a valid 'tsconfig.json': provide the tsconfig or compilerOptions")]
    MissingConfig,

    /// The configuration carries no `paths` mapping.
    #[error("unable to find the 'paths' property in the supplied configuration")]
    MissingPaths,

    /// A file was delivered without a filesystem path; relative output
    /// cannot be computed for it.
    #[error("received file with no path; files must have a path to be resolved")]
    MissingFilePath,

    /// File contents arrived as a continuous byte stream.
    #[error("streaming is not supported")]
    StreamingUnsupported,

    /// Strict mode only: more than one static-import match on one line.
    #[error("multiple imports on line {line} are not supported in strict mode")]
    MultipleImportsOnLine { line: usize },

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
