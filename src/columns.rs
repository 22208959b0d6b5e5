//! Numeric body loader: pulls the time column and one data column out of the
//! whitespace-delimited rows of a scalar file.

use std::path::Path;

use crate::compression::{lines, open_text};
use crate::config::ScalarsConfig;
use crate::error::{Error, Result};
use crate::header::DataColumn;
use crate::reduction::Compression;
use crate::timeseries::TimeSeries;

/// Read `(time, data)` pairs from every non-comment row of the file.
pub fn load_columns(
    path: &Path,
    compression: Compression,
    time: usize,
    data: DataColumn,
    config: &ScalarsConfig,
) -> Result<TimeSeries> {
    let reader = open_text(path, compression)?;
    let mut t = Vec::new();
    let mut y = Vec::new();
    let mut width: Option<usize> = None;

    for (number, line) in lines(path, reader).enumerate() {
        let line = line?;
        let number = number + 1;
        if line.trim().is_empty() || config.is_comment(&line) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let data_index = match data {
            DataColumn::At(index) => index,
            DataColumn::Last => {
                let expected = *width.get_or_insert(fields.len());
                if config.validate_row_width && fields.len() != expected {
                    return Err(malformed(
                        path,
                        number,
                        format!("row has {} columns, expected {expected}", fields.len()),
                    ));
                }
                if fields.len() < 2 {
                    return Err(malformed(path, number, "row has fewer than two columns"));
                }
                fields.len() - 1
            }
        };

        t.push(parse_field(path, number, &fields, time)?);
        y.push(parse_field(path, number, &fields, data_index)?);
    }

    TimeSeries::new(t, y)
}

fn parse_field(path: &Path, line: usize, fields: &[&str], index: usize) -> Result<f64> {
    let field = fields.get(index).ok_or_else(|| {
        malformed(
            path,
            line,
            format!("missing column {} (row has {})", index + 1, fields.len()),
        )
    })?;
    field
        .parse()
        .map_err(|_| malformed(path, line, format!("`{field}` is not a number")))
}

fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Error {
    Error::MalformedData {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}
