//! All scalar files of one reduction across every restart of a simulation.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::config::ScalarsConfig;
use crate::error::{Error, Result};
use crate::reduction::Reduction;
use crate::scalar_file::ScalarFile;
use crate::simdir::RestartFile;
use crate::timeseries::{merge_restarts, MergeOutcome, TimeSeries};

#[derive(Debug, Clone)]
struct Candidate {
    restart: u32,
    file: Rc<ScalarFile>,
}

/// Index from variable name to the files providing it, one reduction only.
///
/// Loading a variable merges its per-restart series: samples are sorted by
/// time and a timestamp seen in an earlier restart wins over later ones.
pub struct ScalarReader {
    reduction: Reduction,
    vars: BTreeMap<String, Vec<Candidate>>,
    config: Rc<ScalarsConfig>,
    merged: RefCell<HashMap<String, TimeSeries>>,
}

impl ScalarReader {
    /// Index `files` for the reduction named by `kind`.
    ///
    /// Files with malformed names or headers are logged and skipped so the
    /// remaining files stay available. Files of another reduction are ignored.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownReduction`: `kind` is not a known reduction
    pub fn new<I>(kind: &str, files: I, config: Rc<ScalarsConfig>) -> Result<Self>
    where
        I: IntoIterator<Item = RestartFile>,
    {
        let reduction: Reduction = kind.parse()?;
        Ok(Self::with_reduction(reduction, files, config))
    }

    pub fn with_reduction<I>(reduction: Reduction, files: I, config: Rc<ScalarsConfig>) -> Self
    where
        I: IntoIterator<Item = RestartFile>,
    {
        let mut vars: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
        let mut indexed = 0usize;

        for RestartFile { restart, path } in files {
            let file = match ScalarFile::with_config(&path, Rc::clone(&config)) {
                Ok(file) => file,
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    continue;
                }
            };
            if file.reduction() != reduction {
                log::debug!(
                    "skipping {}: reduction {} is not {reduction}",
                    path.display(),
                    file.reduction()
                );
                continue;
            }
            let variables = match file.variables() {
                Ok(variables) => variables,
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    continue;
                }
            };

            let file = Rc::new(file);
            for variable in variables {
                vars.entry(variable).or_default().push(Candidate {
                    restart,
                    file: Rc::clone(&file),
                });
            }
            indexed += 1;
        }

        for candidates in vars.values_mut() {
            candidates.sort_by_key(|candidate| candidate.restart);
        }
        log::debug!(
            "indexed {indexed} {reduction} files providing {} variables",
            vars.len()
        );

        Self {
            reduction,
            vars,
            config,
            merged: RefCell::new(HashMap::new()),
        }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.vars.contains_key(variable)
    }

    /// Files providing `variable`, in restart order.
    pub fn files(&self, variable: &str) -> Vec<(u32, &Path)> {
        self.vars
            .get(variable)
            .map(|candidates| {
                candidates
                    .iter()
                    .map(|candidate| (candidate.restart, candidate.file.path()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Load and merge every restart's series of `variable`.
    ///
    /// # Errors
    ///
    /// - `Error::VariableNotFound`: no indexed file provides `variable`, or
    ///   every file providing it has a malformed header
    /// - any other load error of a candidate file, unmodified
    pub fn load(&self, variable: &str) -> Result<TimeSeries> {
        if let Some(series) = self.merged.borrow().get(variable) {
            return Ok(series.clone());
        }

        let outcome = self.merge(variable)?;
        if outcome.duplicates > 0 {
            log::warn!(
                "{} {variable}: discarded {} duplicate timestamps while merging restarts",
                self.reduction,
                outcome.duplicates
            );
        }
        if self.config.cache_merged {
            self.merged
                .borrow_mut()
                .insert(variable.to_string(), outcome.series.clone());
        }
        Ok(outcome.series)
    }

    /// Merge without consulting or filling the cache, reporting duplicates.
    ///
    /// A restart whose header turns out malformed is logged and left out, as
    /// group files are at indexing time.
    pub fn merge(&self, variable: &str) -> Result<MergeOutcome> {
        let not_found = || Error::VariableNotFound {
            variable: variable.to_string(),
            scope: format!("{} timeseries", self.reduction),
        };
        let candidates = self.vars.get(variable).ok_or_else(not_found)?;

        let mut parts = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match candidate.file.load(variable) {
                Ok(series) => parts.push(series),
                Err(err @ Error::MalformedHeader { .. }) => {
                    log::warn!(
                        "{} {variable}: skipping restart {}: {err}",
                        self.reduction,
                        candidate.restart
                    );
                }
                Err(err) => return Err(err),
            }
        }
        if parts.is_empty() {
            return Err(not_found());
        }
        Ok(merge_restarts(parts))
    }

    /// Like `load`, but `Ok(None)` when the variable is not indexed.
    pub fn get(&self, variable: &str) -> Result<Option<TimeSeries>> {
        if !self.contains(variable) {
            return Ok(None);
        }
        self.load(variable).map(Some)
    }

    pub fn get_or(&self, variable: &str, default: TimeSeries) -> Result<TimeSeries> {
        Ok(self.get(variable)?.unwrap_or(default))
    }
}

impl fmt::Display for ScalarReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.keys().collect();
        writeln!(f, "Available {} timeseries:", self.reduction)?;
        writeln!(f, "{names:?}")
    }
}

impl fmt::Debug for ScalarReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarReader")
            .field("reduction", &self.reduction)
            .field("variables", &self.vars.len())
            .finish()
    }
}
