//! Report window resolution and the two-day metric axis.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::utils::time_utils::calendar_day;
use crate::Result;

use super::PerformanceRecord;

/// The two most recent distinct calendar days in the performance data.
///
/// Every comparative figure in the report is "newest day vs the day before
/// it"; this window is resolved once and threaded through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub newest: NaiveDate,
    pub second_newest: NaiveDate,
}

impl DateWindow {
    /// Resolves the window from performance records.
    ///
    /// Days are derived by truncating each record timestamp; the result is
    /// independent of input row order. Fewer than two distinct days is a
    /// hard failure, since a one-day upload cannot produce a comparative
    /// report.
    pub fn resolve(records: &[PerformanceRecord]) -> Result<Self> {
        let days: BTreeSet<NaiveDate> = records
            .iter()
            .map(|record| calendar_day(record.timestamp))
            .collect();

        let mut recent = days.iter().rev();
        match (recent.next(), recent.next()) {
            (Some(&newest), Some(&second_newest)) => Ok(Self {
                newest,
                second_newest,
            }),
            _ => Err(Error::InsufficientData {
                distinct_days: days.len(),
            }),
        }
    }

    /// True when the date is one of the two report days.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day == self.newest || day == self.second_newest
    }

    /// Places a date on the report axis, `None` for out-of-window dates.
    pub fn day_of(&self, day: NaiveDate) -> Option<ReportDay> {
        if day == self.newest {
            Some(ReportDay::Newest)
        } else if day == self.second_newest {
            Some(ReportDay::SecondNewest)
        } else {
            None
        }
    }
}

/// Position on the two-day report axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportDay {
    Newest,
    SecondNewest,
}

/// A metric measured on both report days.
///
/// The fixed two-element axis every per-entity figure uses; aggregation
/// fills it by day and absent days keep the zero default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPair<T> {
    pub newest: T,
    pub second_newest: T,
}

impl<T> DayPair<T> {
    pub fn new(newest: T, second_newest: T) -> Self {
        Self {
            newest,
            second_newest,
        }
    }

    pub fn get(&self, day: ReportDay) -> &T {
        match day {
            ReportDay::Newest => &self.newest,
            ReportDay::SecondNewest => &self.second_newest,
        }
    }

    pub fn get_mut(&mut self, day: ReportDay) -> &mut T {
        match day {
            ReportDay::Newest => &mut self.newest,
            ReportDay::SecondNewest => &mut self.second_newest,
        }
    }

    /// Applies a function to both days, e.g. rounding at the display
    /// boundary.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DayPair<U> {
        DayPair {
            newest: f(self.newest),
            second_newest: f(self.second_newest),
        }
    }
}
