//! Republic-of-China (Minguo) era dates.
//!
//! Bills arrive with dates such as `113/01/16`, meaning the 16th of January in
//! ROC year 113 (Gregorian 2024).

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{calendar::month::days_in_month, errors::BillError};

/// Gregorian year = ROC year + 1911.
pub const ROC_ERA_OFFSET: i32 = 1911;

static ROC_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3})/(\d{1,2})/(\d{1,2})$").expect("ROC date pattern compiles")
});

/// A date expressed in the ROC era, already checked against the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RocDate {
    pub era_year: i32,
    pub month: u32,
    pub day: u32,
}

impl RocDate {
    pub fn new(era_year: i32, month: u32, day: u32) -> Result<Self, BillError> {
        to_gregorian(era_year, month, day)?;
        Ok(Self {
            era_year,
            month,
            day,
        })
    }

    /// Converts a Gregorian date back into the ROC era. Dates before 1912 have no ROC year.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, BillError> {
        let era_year = date.year() - ROC_ERA_OFFSET;
        if era_year < 1 {
            return Err(BillError::invalid_date(
                date.to_string(),
                "date precedes the ROC era",
            ));
        }
        Ok(Self {
            era_year,
            month: date.month(),
            day: date.day(),
        })
    }

    pub fn gregorian_year(&self) -> i32 {
        self.era_year.saturating_add(ROC_ERA_OFFSET)
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, BillError> {
        to_gregorian(self.era_year, self.month, self.day)
    }

    /// `YYYY-MM-DD` rendering of the equivalent Gregorian date.
    pub fn to_iso_string(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.gregorian_year(),
            self.month,
            self.day
        )
    }
}

impl fmt::Display for RocDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}/{:02}/{:02}", self.era_year, self.month, self.day)
    }
}

impl FromStr for RocDate {
    type Err = BillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let captures = ROC_DATE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| BillError::invalid_date(s, "expected YYY/MM/DD"))?;
        let component = |idx: usize| -> Result<u32, BillError> {
            captures[idx]
                .parse::<u32>()
                .map_err(|err| BillError::invalid_date(s, err.to_string()))
        };
        let era_year = component(1)? as i32;
        let month = component(2)?;
        let day = component(3)?;
        to_gregorian(era_year, month, day).map_err(|err| match err {
            BillError::InvalidDate { reason, .. } => BillError::invalid_date(s, reason),
            other => other,
        })?;
        Ok(Self {
            era_year,
            month,
            day,
        })
    }
}

/// Converts ROC era components into a Gregorian date.
pub fn to_gregorian(era_year: i32, month: u32, day: u32) -> Result<NaiveDate, BillError> {
    let input = format!("{era_year}/{month}/{day}");
    if !(1..=12).contains(&month) {
        return Err(BillError::invalid_date(
            input,
            format!("month {month} is outside 1-12"),
        ));
    }
    if era_year < 1 {
        return Err(BillError::invalid_date(input, "ROC years start at 1"));
    }
    let year = era_year
        .checked_add(ROC_ERA_OFFSET)
        .ok_or_else(|| BillError::invalid_date(input.clone(), "era year out of range"))?;
    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(BillError::invalid_date(
            input,
            format!("day {day} is outside 1-{max_day} for {year}-{month:02}"),
        ));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| BillError::invalid_date(input, "date is not representable"))
}

/// Parses a `YYY/MM/DD` string straight into a Gregorian date.
pub fn parse_roc_date(input: &str) -> Result<NaiveDate, BillError> {
    input.parse::<RocDate>()?.to_gregorian()
}
