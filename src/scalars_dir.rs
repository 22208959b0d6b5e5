//! Every scalar reduction of a simulation, one lazily built reader each.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::ScalarsConfig;
use crate::error::{Error, Result};
use crate::filename::classify;
use crate::reader::ScalarReader;
use crate::reduction::Reduction;
use crate::simdir::{RestartFile, SimDir};

const READER_SLOTS: usize = Reduction::ALL.len();

/// Two-level lookup: reduction → variable → merged time series.
///
/// Files are grouped by reduction once at construction, from their names
/// alone. A reduction's reader, and the header scans it needs, are built on
/// first request and then kept.
pub struct ScalarsDir {
    path: PathBuf,
    config: Rc<ScalarsConfig>,
    files: BTreeMap<Reduction, Vec<RestartFile>>,
    readers: [OnceCell<ScalarReader>; READER_SLOTS],
}

impl ScalarsDir {
    /// # Errors
    ///
    /// - `Error::InvalidConstruction`: `sim` has no restart directories
    pub fn new(sim: &SimDir) -> Result<Self> {
        Self::with_config(sim, ScalarsConfig::default())
    }

    pub fn with_config(sim: &SimDir, config: ScalarsConfig) -> Result<Self> {
        if sim.restarts().is_empty() {
            return Err(Error::InvalidConstruction(format!(
                "{} has no restart directories",
                sim.path().display()
            )));
        }

        let mut files: BTreeMap<Reduction, Vec<RestartFile>> = BTreeMap::new();
        for file in sim.all_files() {
            match classify(&file.path) {
                Ok(class) => files.entry(class.reduction).or_default().push(file),
                Err(err @ Error::UnknownReduction(_)) => {
                    log::debug!("not scalar output: {}: {err}", file.path.display());
                }
                Err(err) if is_ascii_output(&file.path) => {
                    log::warn!("ignoring {}: {err}", file.path.display());
                }
                Err(_) => log::debug!("not scalar output: {}", file.path.display()),
            }
        }

        Ok(Self {
            path: sim.path().to_path_buf(),
            config: Rc::new(config),
            files,
            readers: std::array::from_fn(|_| OnceCell::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ScalarsConfig {
        &self.config
    }

    /// Reader for `reduction`, built on first request.
    pub fn reader_for(&self, reduction: Reduction) -> &ScalarReader {
        self.readers[reduction as usize].get_or_init(|| {
            let files = self.files.get(&reduction).cloned().unwrap_or_default();
            ScalarReader::with_reduction(reduction, files, Rc::clone(&self.config))
        })
    }

    /// # Errors
    ///
    /// - `Error::UnknownReduction`: `kind` is not a known reduction
    pub fn reader(&self, kind: &str) -> Result<&ScalarReader> {
        Ok(self.reader_for(kind.parse()?))
    }

    pub fn get(&self, kind: &str) -> Option<&ScalarReader> {
        self.reader(kind).ok()
    }

    pub fn scalar(&self) -> &ScalarReader {
        self.reader_for(Reduction::Scalar)
    }

    pub fn minimum(&self) -> &ScalarReader {
        self.reader_for(Reduction::Minimum)
    }

    pub fn maximum(&self) -> &ScalarReader {
        self.reader_for(Reduction::Maximum)
    }

    pub fn norm1(&self) -> &ScalarReader {
        self.reader_for(Reduction::Norm1)
    }

    pub fn norm2(&self) -> &ScalarReader {
        self.reader_for(Reduction::Norm2)
    }

    pub fn norm_inf(&self) -> &ScalarReader {
        self.reader_for(Reduction::NormInf)
    }

    pub fn average(&self) -> &ScalarReader {
        self.reader_for(Reduction::Average)
    }
}

fn is_ascii_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(".asc"))
}

impl fmt::Display for ScalarsDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Folder {}", self.path.display())?;
        for reduction in Reduction::ALL {
            write!(f, "{}", self.reader_for(reduction))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ScalarsDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarsDir")
            .field("path", &self.path)
            .field("files", &self.files.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simdir::RestartDir;
    use tempfile::tempdir;

    #[test]
    fn empty_simdir_is_invalid() {
        let dir = tempdir().expect("tempdir");
        let sim = SimDir::new(dir.path(), Vec::new()).expect("simdir");
        let err = ScalarsDir::new(&sim).unwrap_err();
        assert!(matches!(err, Error::InvalidConstruction(_)));
    }

    #[test]
    fn readers_are_built_lazily_and_cached() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("rho.maximum.asc"),
            "# column format: 1:iteration 2:time 3:data\n0 0.0 1.0\n",
        )
        .expect("write");
        std::fs::write(dir.path().join("checkpoint.h5"), "").expect("write");

        let sim = SimDir::new(dir.path(), vec![RestartDir::scan(0, dir.path()).expect("scan")])
            .expect("simdir");
        let scalars = ScalarsDir::new(&sim).expect("scalars");

        assert!(scalars.readers.iter().all(|cell| cell.get().is_none()));
        let maximum = scalars.maximum();
        assert!(maximum.contains("rho"));
        assert!(std::ptr::eq(maximum, scalars.reader("maximum").unwrap()));
        assert!(scalars.minimum().is_empty());
        assert!(scalars.get("bubu").is_none());
        assert!(matches!(
            scalars.reader("bubu"),
            Err(Error::UnknownReduction(_))
        ));
    }
}
