//! Error and Result types for scalar file indexing and loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A convenience `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for classification, header scanning, and loading.
#[derive(Debug, Error)]
pub enum Error {
    /// Filename does not follow `<name>.<reduction>.asc[.gz|.bz2]`.
    #[error("malformed scalar file name {name}: {reason}")]
    MalformedName { name: String, reason: &'static str },

    /// Reduction token not in the known set.
    #[error("unrecognized reduction: {0}")]
    UnknownReduction(String),

    /// Header comments do not describe a time column and at least one data column.
    #[error("malformed header in {}: {reason}", .path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    /// A data row could not be parsed or lacks a requested column.
    #[error("malformed data in {} line {line}: {reason}", .path.display())]
    MalformedData {
        path: PathBuf,
        /// One-based line number in the decompressed text.
        line: usize,
        reason: String,
    },

    /// Requested variable is not indexed.
    #[error("variable not found: {variable} ({scope})")]
    VariableNotFound { variable: String, scope: String },

    /// A handle that is not a discovered simulation directory.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// Time and value sequences differ in length.
    #[error("invalid time series: {0}")]
    InvalidSeries(String),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn header(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::MalformedHeader {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_variable_not_found(&self) -> bool {
        matches!(self, Error::VariableNotFound { .. })
    }

    /// True for the name-level classification failures.
    pub fn is_malformed_name(&self) -> bool {
        matches!(
            self,
            Error::MalformedName { .. } | Error::UnknownReduction(_)
        )
    }
}
