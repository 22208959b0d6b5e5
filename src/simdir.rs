//! Discovered simulation directory handle.
//!
//! Deciding which directories are restarts happens elsewhere; this module only
//! carries the validated listing that the scalar readers consume.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A discovered file tagged with the restart it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartFile {
    pub restart: u32,
    pub path: PathBuf,
}

/// One restart segment of a run and the files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartDir {
    pub index: u32,
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
}

impl RestartDir {
    /// List every regular file below `path`, recursively, in sorted order.
    pub fn scan(index: u32, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut files = Vec::new();
        collect_files(&path, &mut files)?;
        files.sort();
        Ok(Self { index, path, files })
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|err| Error::io(dir, err))?;
    for entry in entries {
        let entry = entry.map_err(|err| Error::io(dir, err))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|err| Error::io(&path, err))?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Validated listing of a simulation's restart directories, ordered by index.
#[derive(Debug, Clone)]
pub struct SimDir {
    path: PathBuf,
    restarts: Vec<RestartDir>,
}

impl SimDir {
    /// # Errors
    ///
    /// - `Error::InvalidConstruction`: two restarts share an index, or a restart
    ///   path is not a directory
    pub fn new(path: impl Into<PathBuf>, mut restarts: Vec<RestartDir>) -> Result<Self> {
        let path = path.into();
        restarts.sort_by_key(|restart| restart.index);
        for pair in restarts.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(Error::InvalidConstruction(format!(
                    "restart index {} appears twice in {}",
                    pair[0].index,
                    path.display()
                )));
            }
        }
        if let Some(restart) = restarts.iter().find(|restart| !restart.path.is_dir()) {
            return Err(Error::InvalidConstruction(format!(
                "restart {} is not a directory: {}",
                restart.index,
                restart.path.display()
            )));
        }
        Ok(Self { path, restarts })
    }

    /// Scan each directory as a restart, numbered in the order given.
    pub fn from_restart_dirs<I, P>(path: impl Into<PathBuf>, dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let restarts = dirs
            .into_iter()
            .enumerate()
            .map(|(index, dir)| {
                let index = u32::try_from(index).map_err(|_| {
                    Error::InvalidConstruction("too many restart directories".to_string())
                })?;
                RestartDir::scan(index, dir)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(path, restarts)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn restarts(&self) -> &[RestartDir] {
        &self.restarts
    }

    /// Every file of every restart, in restart order.
    pub fn all_files(&self) -> impl Iterator<Item = RestartFile> + '_ {
        self.restarts.iter().flat_map(|restart| {
            restart.files.iter().map(|path| RestartFile {
                restart: restart.index,
                path: path.clone(),
            })
        })
    }
}
