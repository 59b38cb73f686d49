use crate::error::{EvalError, Result};
use chrono::{NaiveDate, TimeDelta};
use cses_utils::dates::parse_request_date;
use std::mem::replace;

/// An inclusive window of days, `[start, end]`.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DateWindow {
        DateWindow { start, end }
    }

    /// Parse a window from request values in `mm-dd-yyyy` (or ISO) form.
    ///
    /// A window whose start is after its end parses fine; it simply
    /// contains no days.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<DateWindow> {
        let parse = |label: &str, raw: Option<&str>| {
            let raw = raw.ok_or_else(|| {
                EvalError::InvalidInput(format!("{} date is missing", label))
            })?;
            parse_request_date(raw)
                .map_err(|e| EvalError::InvalidInput(format!("{} date: {}", label, e)))
        };
        Ok(DateWindow::new(parse("start", start)?, parse("end", end)?))
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Iterate every day in the window.
    pub fn days(&self) -> Days {
        Days(self.start, self.end)
    }
}

/// Iterator over the days of a [`DateWindow`], start through end.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct Days(NaiveDate, NaiveDate);

impl Iterator for Days {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
