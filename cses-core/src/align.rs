//! Joining observed and modeled series on date.
//!
//! Both series are de-duplicated (first occurrence wins), inner-joined on
//! date and sorted ascending. The joined rows are then restricted either
//! to an inclusive date window or to a fixed number of leading rows.

use crate::date_window::DateWindow;
use crate::error::{EvalError, Result};
use crate::series::TimeSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Number of leading rows kept when no date window applies.
pub const DEFAULT_ROW_LIMIT: usize = 45;

/// How the joined rows are restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Keep rows inside the inclusive window; an empty result is an error.
    Slice(DateWindow),
    /// Keep the first `n` rows.
    Truncate(usize),
}

/// One date with both flows defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPoint {
    pub date: NaiveDate,
    pub observed: f64,
    pub modeled: f64,
}

/// Observed and modeled flow on shared dates, ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedPair {
    pub points: Vec<AlignedPoint>,
}

impl AlignedPair {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn observed(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.observed).collect()
    }

    pub fn modeled(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.modeled).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Inner-join two series on date and apply the window policy.
pub fn align(
    mut observed: TimeSeries,
    mut modeled: TimeSeries,
    policy: WindowPolicy,
) -> Result<AlignedPair> {
    observed.dedup();
    modeled.dedup();

    let modeled_by_date: HashMap<NaiveDate, f64> =
        modeled.points.iter().map(|p| (p.date, p.value)).collect();
    let mut points: Vec<AlignedPoint> = observed
        .points
        .iter()
        .filter_map(|p| {
            modeled_by_date.get(&p.date).map(|&m| AlignedPoint {
                date: p.date,
                observed: p.value,
                modeled: m,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);

    if points.is_empty() {
        return Err(EvalError::Alignment(format!(
            "{} and {} share no dates",
            observed.name, modeled.name
        )));
    }
    let joined = points.len();

    match policy {
        WindowPolicy::Slice(window) => {
            points.retain(|p| window.contains(&p.date));
            if points.is_empty() {
                return Err(EvalError::Alignment(format!(
                    "no overlapping data between {} and {} ({} joined rows)",
                    window.start, window.end, joined
                )));
            }
        }
        WindowPolicy::Truncate(limit) => points.truncate(limit),
    }
    log::debug!("aligned {} of {} joined rows", points.len(), joined);
    Ok(AlignedPair { points })
}
