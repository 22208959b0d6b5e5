//! Reduction operators and compression methods encoded in scalar filenames.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Spatial or statistical operator applied to a field before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reduction {
    Scalar,
    Minimum,
    Maximum,
    Norm1,
    Norm2,
    NormInf,
    Average,
}

impl Reduction {
    pub const ALL: [Reduction; 7] = [
        Reduction::Scalar,
        Reduction::Minimum,
        Reduction::Maximum,
        Reduction::Norm1,
        Reduction::Norm2,
        Reduction::NormInf,
        Reduction::Average,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Reduction::Scalar => "scalar",
            Reduction::Minimum => "minimum",
            Reduction::Maximum => "maximum",
            Reduction::Norm1 => "norm1",
            Reduction::Norm2 => "norm2",
            Reduction::NormInf => "norm_inf",
            Reduction::Average => "average",
        }
    }

    /// Parse a filename token. The empty token means no explicit reduction.
    pub fn from_token(token: &str) -> Option<Self> {
        let reduction = match token {
            "" | "scalar" | "scalars" => Reduction::Scalar,
            "minimum" => Reduction::Minimum,
            "maximum" => Reduction::Maximum,
            "norm1" => Reduction::Norm1,
            "norm2" => Reduction::Norm2,
            "norm_inf" | "infnorm" => Reduction::NormInf,
            "average" => Reduction::Average,
            _ => return None,
        };
        Some(reduction)
    }
}

impl FromStr for Reduction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::UnknownReduction(s.to_string()));
        }
        Reduction::from_token(s).ok_or_else(|| Error::UnknownReduction(s.to_string()))
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compression applied to a whole scalar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    pub(crate) fn strip_suffix(name: &str) -> (&str, Self) {
        if let Some(stem) = name.strip_suffix(".gz") {
            (stem, Compression::Gzip)
        } else if let Some(stem) = name.strip_suffix(".bz2") {
            (stem, Compression::Bzip2)
        } else {
            (name, Compression::None)
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compression::None => "none",
            Compression::Gzip => "gz",
            Compression::Bzip2 => "bz2",
        };
        f.write_str(name)
    }
}
