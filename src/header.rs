//! Header scanning for scalar ASCII files.
//!
//! Cactus writes two column-description syntaxes in the leading comment block:
//!
//! ```text
//! # column format: 1:iteration 2:time 3:data
//! # data columns: 3:gxx 4:gxy 5:gxz
//! ```
//!
//! Indices are declared 1-based and stored 0-based. `column format` locates the
//! time column (and the single `data` column of per-variable files); `data
//! columns` enumerates every variable of a group file.

use std::collections::BTreeMap;
use std::path::Path;

use crate::compression::{lines, open_text};
use crate::config::ScalarsConfig;
use crate::error::{Error, Result};
use crate::filename::Classification;

/// The two header column-description syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderSyntax {
    ColumnFormat,
    DataColumns,
}

impl HeaderSyntax {
    fn marker(self) -> &'static str {
        match self {
            HeaderSyntax::ColumnFormat => "column format:",
            HeaderSyntax::DataColumns => "data columns:",
        }
    }
}

/// Position of a variable's values within a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataColumn {
    At(usize),
    /// Undeclared: the last column of each row.
    Last,
}

impl DataColumn {
    pub fn index(self) -> Option<usize> {
        match self {
            DataColumn::At(index) => Some(index),
            DataColumn::Last => None,
        }
    }
}

/// Resolved column layout of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub time: usize,
    pub variables: BTreeMap<String, DataColumn>,
}

/// Read the file's header and resolve its column layout.
pub fn scan(path: &Path, class: &Classification, config: &ScalarsConfig) -> Result<ColumnLayout> {
    let header = read_header(path, class, config)?;
    let layout = resolve_layout(&header, class, path)?;
    log::debug!(
        "scanned header of {}: time column {}, {} variables",
        path.display(),
        layout.time,
        layout.variables.len()
    );
    Ok(layout)
}

/// Collect the leading run of comment lines, stopping at the first data line.
///
/// A comment run longer than `max_header_lines` is a malformed header rather
/// than a truncated one.
pub fn read_header(
    path: &Path,
    class: &Classification,
    config: &ScalarsConfig,
) -> Result<Vec<String>> {
    let reader = open_text(path, class.compression)?;
    let mut header = Vec::new();
    for line in lines(path, reader) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if !config.is_comment(&line) {
            break;
        }
        if header.len() >= config.max_header_lines {
            return Err(Error::header(
                path,
                format!(
                    "header exceeds max_header_lines ({})",
                    config.max_header_lines
                ),
            ));
        }
        header.push(line);
    }
    Ok(header)
}

/// Parse the first line carrying `syntax` into a name → 0-based column map.
///
/// Fails when no line carries the syntax or when a token is not `idx:name`.
pub fn scan_strings_for_columns(
    strings: &[String],
    syntax: HeaderSyntax,
    path: &Path,
) -> Result<BTreeMap<String, usize>> {
    find_columns(strings, syntax, path)?.ok_or_else(|| {
        Error::header(path, format!("no `{}` declaration", syntax.marker()))
    })
}

fn find_columns(
    strings: &[String],
    syntax: HeaderSyntax,
    path: &Path,
) -> Result<Option<BTreeMap<String, usize>>> {
    let Some(declaration) = strings.iter().find_map(|line| declaration_body(line, syntax)) else {
        return Ok(None);
    };

    let mut columns = BTreeMap::new();
    for token in declaration.split_whitespace() {
        let (index, name) = token
            .split_once(':')
            .filter(|(_, name)| !name.is_empty())
            .ok_or_else(|| Error::header(path, format!("bad column token `{token}`")))?;
        let index: usize = index
            .parse()
            .ok()
            .filter(|index| *index >= 1)
            .ok_or_else(|| Error::header(path, format!("bad column index in `{token}`")))?;
        columns.insert(name.to_string(), index - 1);
    }
    Ok(Some(columns))
}

fn declaration_body(line: &str, syntax: HeaderSyntax) -> Option<&str> {
    let body = line.trim_start();
    let body = body.strip_prefix(|c: char| !c.is_alphanumeric())?;
    body.trim_start().strip_prefix(syntax.marker())
}

/// Combine both syntaxes into one layout.
///
/// Group files take their variables from `data columns`; per-variable files
/// take the `data` entry of `column format`. A per-variable file with no
/// declaration at all falls back to time in the first column and the value in
/// the last.
pub fn resolve_layout(
    header: &[String],
    class: &Classification,
    path: &Path,
) -> Result<ColumnLayout> {
    let column_format = find_columns(header, HeaderSyntax::ColumnFormat, path)?;
    let data_columns = find_columns(header, HeaderSyntax::DataColumns, path)?;

    if column_format.is_none() && data_columns.is_none() {
        return match (&class.variable, class.one_file_per_group) {
            (Some(variable), false) => Ok(ColumnLayout {
                time: 0,
                variables: BTreeMap::from([(variable.clone(), DataColumn::Last)]),
            }),
            _ => Err(Error::header(path, "no column declarations")),
        };
    }

    let lookup = |columns: &Option<BTreeMap<String, usize>>, name: &str| -> Option<usize> {
        columns.as_ref().and_then(|columns| columns.get(name)).copied()
    };
    let time = lookup(&column_format, "time")
        .or_else(|| lookup(&data_columns, "time"))
        .ok_or_else(|| Error::header(path, "missing time column"))?;
    let declared_data = lookup(&column_format, "data");

    let mut variables = BTreeMap::new();
    if class.one_file_per_group {
        if let Some(columns) = &data_columns {
            variables.extend(
                columns
                    .iter()
                    .filter(|(name, _)| name.as_str() != "time")
                    .map(|(name, index)| (name.clone(), DataColumn::At(*index))),
            );
        }
        if variables.is_empty() {
            if let (Some(variable), Some(index)) = (&class.variable, declared_data) {
                variables.insert(variable.clone(), DataColumn::At(index));
            }
        }
    } else if let Some(variable) = &class.variable {
        let index = declared_data
            .or_else(|| lookup(&data_columns, variable.as_str()))
            .or_else(|| sole_data_column(&data_columns));
        if let Some(index) = index {
            variables.insert(variable.clone(), DataColumn::At(index));
        }
    }

    if variables.is_empty() {
        return Err(Error::header(path, "no data columns"));
    }
    Ok(ColumnLayout { time, variables })
}

fn sole_data_column(columns: &Option<BTreeMap<String, usize>>) -> Option<usize> {
    let mut data = columns
        .as_ref()?
        .iter()
        .filter(|(name, _)| name.as_str() != "time");
    match (data.next(), data.next()) {
        (Some((_, index)), None) => Some(*index),
        _ => None,
    }
}
