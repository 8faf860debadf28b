//! Driver errors. Syntax errors in the parsed files are not errors here;
//! they are reported as diagnostics.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(tern::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (first invalid byte at offset {valid_up_to})", path.display())]
    #[diagnostic(code(tern::encoding), help("tern only reads UTF-8 source files"))]
    InvalidUtf8 { path: PathBuf, valid_up_to: usize },

    #[error("invalid parse options in {}", path.display())]
    #[diagnostic(
        code(tern::config),
        help("expected a JSON object with optional scriptKind, sourceType and setParentNodes fields")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("edit {start}+{delete} is outside {} ({len} chars)", path.display())]
    #[diagnostic(code(tern::edit_range))]
    EditOutOfRange {
        path: PathBuf,
        start: usize,
        delete: usize,
        len: usize,
    },

    #[error("incremental result for {} differs from a full parse", path.display())]
    #[diagnostic(code(tern::verify), help("rerun with TERN_LOG=tern_parser=debug to see the reused ranges"))]
    VerifyMismatch { path: PathBuf },

    #[error("failed to serialize the syntax tree")]
    #[diagnostic(code(tern::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to start the worker pool")]
    #[diagnostic(code(tern::threads))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("no input files")]
    #[diagnostic(code(tern::no_input))]
    NoInput,
}
