//! Minimal time series container and restart merging.
//!
//! Only construction and the restart merge live here; interpolation and other
//! algebra belong to downstream consumers.

use crate::error::{Error, Result};

/// Paired time and value samples of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    t: Vec<f64>,
    y: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from raw samples, in the order given.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidSeries`: `t` and `y` differ in length
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if t.len() != y.len() {
            return Err(Error::InvalidSeries(format!(
                "{} times but {} values",
                t.len(),
                y.len()
            )));
        }
        Ok(Self { t, y })
    }

    pub fn times(&self) -> &[f64] {
        &self.t
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.y.iter().copied())
    }

    /// True when times are strictly increasing.
    pub fn is_strictly_increasing(&self) -> bool {
        self.t.windows(2).all(|pair| pair[0] < pair[1])
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.t, self.y)
    }
}

/// Result of merging per-restart series.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub series: TimeSeries,
    /// Samples dropped because an earlier sample had the same time.
    pub duplicates: usize,
}

/// Merge series given in restart order into one sorted, duplicate-free series.
///
/// Samples are sorted by time with a stable sort, so among equal timestamps
/// the one from the earliest restart (then earliest row) is kept.
pub fn merge_restarts<I>(parts: I) -> MergeOutcome
where
    I: IntoIterator<Item = TimeSeries>,
{
    let mut samples: Vec<(f64, f64)> = Vec::new();
    for part in parts {
        samples.extend(part.iter());
    }
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = samples.len();
    let mut t = Vec::with_capacity(total);
    let mut y = Vec::with_capacity(total);
    for (time, value) in samples {
        if t.last().is_some_and(|last: &f64| *last == time) {
            continue;
        }
        t.push(time);
        y.push(value);
    }

    MergeOutcome {
        duplicates: total - t.len(),
        series: TimeSeries { t, y },
    }
}
