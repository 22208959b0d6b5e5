//! Filename classification for scalar ASCII output.
//!
//! Names follow `<left>.<reduction>.asc[.gz|.bz2]` where `<left>` is one of
//! `var`, `var[N]`, `thorn-var`, or `thorn-var[N]`. An empty reduction token
//! (`<left>..asc`) means a plain scalar written one file per group.

use std::path::Path;

use crate::error::{Error, Result};
use crate::reduction::{Compression, Reduction};

/// Everything that can be decided from a file's basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub reduction: Reduction,
    pub compression: Compression,
    /// The file hosts a whole group; columns must come from the header.
    pub one_file_per_group: bool,
    /// Variable named by the file, verbatim including any `[N]` suffix.
    pub variable: Option<String>,
}

struct LeftPart<'a> {
    thorn: Option<&'a str>,
    variable: &'a str,
    component: Option<&'a str>,
}

/// Classify a scalar file by its basename only. Never touches the filesystem.
pub fn classify(path: impl AsRef<Path>) -> Result<Classification> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| malformed(path.display().to_string(), "missing or non-utf8 file name"))?;

    let (stem, compression) = Compression::strip_suffix(name);
    let stem = stem
        .strip_suffix(".asc")
        .ok_or_else(|| malformed(name, "expected .asc extension"))?;
    let (left, token) = stem
        .rsplit_once('.')
        .ok_or_else(|| malformed(name, "missing reduction separator"))?;
    let reduction =
        Reduction::from_token(token).ok_or_else(|| Error::UnknownReduction(token.to_string()))?;
    let parts = parse_left(left).ok_or_else(|| malformed(name, "unrecognized variable or group name"))?;

    let explicit_reduction = !token.is_empty();
    let one_file_per_group =
        !explicit_reduction || (parts.thorn.is_some() && parts.component.is_none());
    let variable = explicit_reduction.then(|| {
        let mut variable = parts.variable.to_string();
        if let Some(component) = parts.component {
            variable.push_str(component);
        }
        variable
    });

    Ok(Classification {
        reduction,
        compression,
        one_file_per_group,
        variable,
    })
}

fn malformed(name: impl Into<String>, reason: &'static str) -> Error {
    Error::MalformedName {
        name: name.into(),
        reason,
    }
}

fn parse_left(left: &str) -> Option<LeftPart<'_>> {
    let (thorn, rest) = match left.split_once('-') {
        Some((thorn, rest)) => (Some(thorn), rest),
        None => (None, left),
    };
    if let Some(thorn) = thorn {
        if !is_word(thorn) {
            return None;
        }
    }

    let (variable, component) = match rest.find('[') {
        Some(open) => {
            let (variable, component) = rest.split_at(open);
            let digits = component.strip_prefix('[')?.strip_suffix(']')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (variable, Some(component))
        }
        None => (rest, None),
    };
    if !is_word(variable) {
        return None;
    }

    Some(LeftPart {
        thorn,
        variable,
        component,
    })
}

fn is_word(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
