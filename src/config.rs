//! Reader configuration.
//!
//! Defines options shared by every file and reader built from one simulation:
//! the comment marker, header scan bounds, row validation, and merge caching.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for scalar indexing and loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalarsConfig {
    /// Prefix of header and comment lines.
    /// Default: '#'
    pub comment_marker: char,

    /// Upper bound on the leading comment lines collected by a header scan.
    /// Default: 4096
    pub max_header_lines: usize,

    /// Require a uniform row width when a variable's column is resolved as
    /// "last column of the row".
    /// Default: true
    pub validate_row_width: bool,

    /// Keep merged series per variable after the first load.
    /// Default: true
    pub cache_merged: bool,
}

impl Default for ScalarsConfig {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            max_header_lines: 4096,
            validate_row_width: true,
            cache_merged: true,
        }
    }
}

impl ScalarsConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| Error::io(path, err))?;
        Self::from_json_slice(&data)
    }

    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub(crate) fn is_comment(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.comment_marker)
    }
}
