//! Indexing and loading of Cactus scalar ASCII time series.
//!
//! A simulation writes one scalar file per variable (or per group) and per
//! reduction into every restart directory. This crate classifies those files
//! from their names, scans headers only when column positions are needed, and
//! merges the per-restart pieces of a variable into one sorted series.
//!
//! ```no_run
//! use cactus_scalars::{ScalarsDir, SimDir};
//!
//! let sim = SimDir::from_restart_dirs("tov", ["tov/output-0000", "tov/output-0001"])?;
//! let scalars = ScalarsDir::new(&sim)?;
//! let rho = scalars.average().load("rho")?;
//! println!("{} samples", rho.len());
//! # Ok::<(), cactus_scalars::Error>(())
//! ```

pub mod columns;
pub mod compression;
pub mod config;
pub mod error;
pub mod filename;
pub mod header;
pub mod reader;
pub mod reduction;
pub mod scalar_file;
pub mod scalars_dir;
pub mod simdir;
pub mod timeseries;

pub use config::ScalarsConfig;
pub use error::{Error, Result};
pub use filename::{classify, Classification};
pub use header::{ColumnLayout, DataColumn, HeaderSyntax};
pub use reader::ScalarReader;
pub use reduction::{Compression, Reduction};
pub use scalar_file::ScalarFile;
pub use scalars_dir::ScalarsDir;
pub use simdir::{RestartDir, RestartFile, SimDir};
pub use timeseries::{merge_restarts, MergeOutcome, TimeSeries};
