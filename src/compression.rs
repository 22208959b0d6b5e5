//! Transparent text access to plain, gzip, and bzip2 scalar files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;

use crate::error::{Error, Result};
use crate::reduction::Compression;

/// Open `path` for line-oriented reading, decompressing per `compression`.
///
/// The handle lives only as long as the returned reader.
pub fn open_text(path: &Path, compression: Compression) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    let inner: Box<dyn Read> = match compression {
        Compression::None => Box::new(file),
        Compression::Gzip => Box::new(MultiGzDecoder::new(file)),
        Compression::Bzip2 => Box::new(BzDecoder::new(file)),
    };
    Ok(Box::new(BufReader::new(inner)))
}

/// Iterate over lines of an opened text reader, attaching the path to errors.
pub(crate) fn lines<'a>(
    path: &'a Path,
    reader: Box<dyn BufRead>,
) -> impl Iterator<Item = Result<String>> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|err| Error::io(path, err)))
}
