use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AadrError {
    #[error("missing config file aadr-curator.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to read table {path}: {message}")]
    TableRead { path: PathBuf, message: String },

    #[error("annotation row {row} has {found} columns, expected at least {expected}")]
    ColumnCount {
        row: u64,
        found: usize,
        expected: usize,
    },

    #[error("table {path} has no {column} column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("failed to write {path}: {message}")]
    TableWrite { path: PathBuf, message: String },

    #[error("link check client failed: {0}")]
    LinkHttp(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
