//! One physical scalar output file.
//!
//! Classification happens at construction and only looks at the name. The
//! header scan is deferred until a column position is needed, runs at most
//! once, and its result never changes afterwards.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::columns::load_columns;
use crate::config::ScalarsConfig;
use crate::error::{Error, Result};
use crate::filename::{classify, Classification};
use crate::header::{self, ColumnLayout};
use crate::reduction::{Compression, Reduction};
use crate::timeseries::TimeSeries;

#[derive(Debug)]
pub struct ScalarFile {
    path: PathBuf,
    class: Classification,
    config: Rc<ScalarsConfig>,
    layout: OnceCell<ColumnLayout>,
}

impl ScalarFile {
    /// Classify `path` with the default configuration.
    ///
    /// # Errors
    ///
    /// - `Error::MalformedName` / `Error::UnknownReduction`: the name does not
    ///   follow the scalar output grammar
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(path, Rc::new(ScalarsConfig::default()))
    }

    pub fn with_config(path: impl Into<PathBuf>, config: Rc<ScalarsConfig>) -> Result<Self> {
        let path = path.into();
        let class = classify(&path)?;
        Ok(Self {
            path,
            class,
            config,
            layout: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reduction(&self) -> Reduction {
        self.class.reduction
    }

    pub fn compression(&self) -> Compression {
        self.class.compression
    }

    pub fn is_one_file_per_group(&self) -> bool {
        self.class.one_file_per_group
    }

    pub fn was_header_scanned(&self) -> bool {
        self.layout.get().is_some()
    }

    pub fn classification(&self) -> &Classification {
        &self.class
    }

    /// Scan the header if that has not happened yet and return the layout.
    ///
    /// # Errors
    ///
    /// - `Error::MalformedHeader`: neither header syntax yields a time column and
    ///   at least one data column
    /// - `Error::Io`: the file cannot be opened or decompressed
    pub fn scan_header(&self) -> Result<&ColumnLayout> {
        if let Some(layout) = self.layout.get() {
            return Ok(layout);
        }
        let layout = header::scan(&self.path, &self.class, &self.config)?;
        Ok(self.layout.get_or_init(|| layout))
    }

    /// Variable name → 0-based column, `None` while unresolved.
    ///
    /// An unscanned per-variable file has a single `None` entry; a column left
    /// as "last column of the row" by the scan also stays `None`.
    pub fn column_map(&self) -> BTreeMap<String, Option<usize>> {
        match self.layout.get() {
            Some(layout) => layout
                .variables
                .iter()
                .map(|(name, column)| (name.clone(), column.index()))
                .collect(),
            None => self
                .class
                .variable
                .iter()
                .map(|name| (name.clone(), None))
                .collect(),
        }
    }

    /// Names of the variables this file provides. Scans group files.
    pub fn variables(&self) -> Result<BTreeSet<String>> {
        if self.class.one_file_per_group || self.was_header_scanned() {
            return Ok(self.scan_header()?.variables.keys().cloned().collect());
        }
        Ok(self.class.variable.iter().cloned().collect())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.variables()?.into_iter().collect())
    }

    pub fn contains(&self, variable: &str) -> Result<bool> {
        if self.class.one_file_per_group || self.was_header_scanned() {
            return Ok(self.scan_header()?.variables.contains_key(variable));
        }
        Ok(self.class.variable.as_deref() == Some(variable))
    }

    pub fn time_column(&self) -> Result<usize> {
        Ok(self.scan_header()?.time)
    }

    /// Load the time series of `variable` from this file.
    ///
    /// # Errors
    ///
    /// - `Error::VariableNotFound`: the file does not provide `variable`
    /// - `Error::MalformedHeader`: the header cannot be parsed
    /// - `Error::MalformedData`: a data row cannot be parsed
    pub fn load(&self, variable: &str) -> Result<TimeSeries> {
        if !self.contains(variable)? {
            return Err(self.not_found(variable));
        }
        let layout = self.scan_header()?;
        let column = *layout
            .variables
            .get(variable)
            .ok_or_else(|| self.not_found(variable))?;
        load_columns(
            &self.path,
            self.class.compression,
            layout.time,
            column,
            &self.config,
        )
    }

    fn not_found(&self, variable: &str) -> Error {
        Error::VariableNotFound {
            variable: variable.to_string(),
            scope: self.path.display().to_string(),
        }
    }
}
