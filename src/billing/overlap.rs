//! Day-level intersection of a billing interval with a target year and its months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{days_in_month, year_bounds};

/// Portion of a bill that falls inside the target year. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOverlap {
    pub target_year: i32,
    pub effective_start: NaiveDate,
    pub effective_end: NaiveDate,
}

impl YearOverlap {
    /// Inclusive number of days inside the target year.
    pub fn days(&self) -> i64 {
        (self.effective_end - self.effective_start).num_days() + 1
    }

    /// Covered day count for one month of the target year.
    pub fn covered_days(&self, month: u32) -> u32 {
        overlap_with_month(
            self.effective_start,
            self.effective_end,
            month,
            self.target_year,
        )
    }

    /// `(month, covered_days)` for every month the overlap touches, ascending.
    pub fn months(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.effective_start.month()..=self.effective_end.month())
            .map(move |month| (month, self.covered_days(month)))
    }
}

/// Clips `[start, end]` to the target year. `None` means the bill contributes nothing.
pub fn overlap_with_year(start: NaiveDate, end: NaiveDate, target_year: i32) -> Option<YearOverlap> {
    let (year_start, year_end) = year_bounds(target_year)?;
    let effective_start = start.max(year_start);
    let effective_end = end.min(year_end);
    if effective_start > effective_end {
        return None;
    }
    Some(YearOverlap {
        target_year,
        effective_start,
        effective_end,
    })
}

/// Days of `month` covered by `[effective_start, effective_end]`.
///
/// Both bounds must already be clipped to `target_year`. The boundary months use the
/// day-of-month remainder, interior months count in full, and the per-month values
/// add up to the inclusive span.
pub fn overlap_with_month(
    effective_start: NaiveDate,
    effective_end: NaiveDate,
    month: u32,
    target_year: i32,
) -> u32 {
    if effective_start > effective_end
        || effective_start.year() != target_year
        || effective_end.year() != target_year
    {
        return 0;
    }
    let start_month = effective_start.month();
    let end_month = effective_end.month();
    if month < start_month || month > end_month {
        return 0;
    }

    let month_days = days_in_month(target_year, month);
    let covered = if start_month == end_month {
        effective_end.day() - effective_start.day() + 1
    } else if month == start_month {
        month_days - effective_start.day() + 1
    } else if month == end_month {
        effective_end.day()
    } else {
        month_days
    };
    covered.min(month_days)
}
