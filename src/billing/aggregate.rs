//! Per-year aggregation of many bills into twelve month records.
//!
//! Everything here is recomputed from the bill list on each call. The
//! [`MonthlyAccumulator`] sums are commutative and associative, so a host may
//! accumulate subsets of bills separately and [`MonthlyAccumulator::merge`] them
//! into the same report it would get from one pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    billing::{
        allocation::allocate,
        coverage::{classify, coverage_percentage, CoverageStatus},
        overlap::overlap_with_year,
        record::{BillingPeriod, BillingRecord},
    },
    calendar::days_in_month,
    errors::{BillError, BillingError, Result},
};

/// Bills longer than this many days are flagged in the logs.
pub const DEFAULT_LONG_BILL_DAYS: i64 = 70;

const MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAggregate {
    pub month: u32,
    pub allocated_usage: f64,
    pub covered_days: u32,
    pub days_in_month: u32,
    pub status: CoverageStatus,
    pub coverage_percentage: u8,
}

/// A bill excluded from aggregation, identified by its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedBill {
    pub index: usize,
    pub error: BillError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReport {
    pub target_year: i32,
    pub monthly_progress: Vec<MonthAggregate>,
    pub total_usage: f64,
    pub filled_months_count: usize,
    #[serde(default)]
    pub skipped: Vec<SkippedBill>,
}

impl YearReport {
    pub fn month(&self, month: u32) -> Option<&MonthAggregate> {
        self.monthly_progress.iter().find(|m| m.month == month)
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Running per-month totals for one target year.
#[derive(Debug, Clone)]
pub struct MonthlyAccumulator {
    target_year: i32,
    allocated: [f64; MONTHS],
    covered: [u32; MONTHS],
    days: [u32; MONTHS],
    skipped: Vec<SkippedBill>,
    long_bill_days: i64,
}

impl MonthlyAccumulator {
    pub fn new(target_year: i32) -> Self {
        let mut days = [0; MONTHS];
        for (idx, slot) in days.iter_mut().enumerate() {
            *slot = days_in_month(target_year, idx as u32 + 1);
        }
        Self {
            target_year,
            allocated: [0.0; MONTHS],
            covered: [0; MONTHS],
            days,
            skipped: Vec::new(),
            long_bill_days: DEFAULT_LONG_BILL_DAYS,
        }
    }

    pub fn with_long_bill_days(mut self, days: i64) -> Self {
        self.long_bill_days = days.max(1);
        self
    }

    /// Adds one record. Invalid records are remembered as skipped, never propagated.
    pub fn add_bill(&mut self, index: usize, record: &BillingRecord) {
        let checked = record
            .period()
            .and_then(|period| Ok((period, record.billable_quantity()?)));
        match checked {
            Ok((period, quantity)) => self.add_period(&period, quantity),
            Err(error) => {
                warn!(
                    index,
                    start = %record.billing_start,
                    end = %record.billing_end,
                    "skipping bill: {error}"
                );
                self.skipped.push(SkippedBill { index, error });
            }
        }
    }

    /// Adds an already validated period with its quantity.
    pub fn add_period(&mut self, period: &BillingPeriod, quantity: f64) {
        if period.total_days() > self.long_bill_days {
            warn!(
                start = %period.start,
                end = %period.end,
                days = period.total_days(),
                limit = self.long_bill_days,
                "bill spans an unusually long period"
            );
        }

        let Some(overlap) = overlap_with_year(period.start, period.end, self.target_year) else {
            debug!(
                start = %period.start,
                end = %period.end,
                target_year = self.target_year,
                "bill lies outside the target year"
            );
            return;
        };

        for (month, days) in overlap.months() {
            self.add_covered_days(month, days);
        }
        for (month, share) in allocate(period, quantity, self.target_year) {
            let slot = (month as usize)
                .checked_sub(1)
                .and_then(|idx| self.allocated.get_mut(idx));
            if let Some(slot) = slot {
                *slot += share;
            }
        }
    }

    fn add_covered_days(&mut self, month: u32, days: u32) {
        let Some(idx) = (month as usize).checked_sub(1) else {
            return;
        };
        if let (Some(covered), Some(limit)) = (self.covered.get_mut(idx), self.days.get(idx)) {
            *covered = covered.saturating_add(days).min(*limit);
        }
    }

    /// Folds another accumulator for the same year into this one.
    pub fn merge(&mut self, other: &MonthlyAccumulator) -> Result<()> {
        if other.target_year != self.target_year {
            return Err(BillingError::InvalidInput(format!(
                "cannot merge aggregates for {} into {}",
                other.target_year, self.target_year
            )));
        }
        for idx in 0..MONTHS {
            self.allocated[idx] += other.allocated[idx];
        }
        for idx in 0..MONTHS {
            self.add_covered_days(idx as u32 + 1, other.covered[idx]);
        }
        self.skipped.extend(other.skipped.iter().cloned());
        Ok(())
    }

    /// Classifies every month and produces the final report.
    pub fn finish(self) -> YearReport {
        let monthly_progress: Vec<MonthAggregate> = (0..MONTHS)
            .map(|idx| {
                let covered_days = self.covered[idx];
                let days_in_month = self.days[idx];
                MonthAggregate {
                    month: idx as u32 + 1,
                    allocated_usage: self.allocated[idx],
                    covered_days,
                    days_in_month,
                    status: classify(covered_days, days_in_month),
                    coverage_percentage: coverage_percentage(covered_days, days_in_month),
                }
            })
            .collect();

        let total_usage = monthly_progress.iter().map(|m| m.allocated_usage).sum();
        let filled_months_count = monthly_progress
            .iter()
            .filter(|m| m.allocated_usage > 0.0)
            .count();

        let mut skipped = self.skipped;
        skipped.sort_by_key(|s| s.index);

        YearReport {
            target_year: self.target_year,
            monthly_progress,
            total_usage,
            filled_months_count,
            skipped,
        }
    }
}

/// Aggregates `bills` into a twelve-month report for `target_year`.
pub fn aggregate_year(bills: &[BillingRecord], target_year: i32) -> YearReport {
    aggregate_with(MonthlyAccumulator::new(target_year), bills)
}

/// Same as [`aggregate_year`] with a pre-configured accumulator.
pub fn aggregate_with(mut accumulator: MonthlyAccumulator, bills: &[BillingRecord]) -> YearReport {
    for (index, record) in bills.iter().enumerate() {
        accumulator.add_bill(index, record);
    }
    let report = accumulator.finish();
    debug!(
        target_year = report.target_year,
        bills = bills.len(),
        skipped = report.skipped.len(),
        total_usage = report.total_usage,
        "aggregated billing year"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_twelve_empty_months() {
        let report = aggregate_year(&[], 2024);
        assert_eq!(report.monthly_progress.len(), 12);
        for (idx, month) in report.monthly_progress.iter().enumerate() {
            assert_eq!(month.month, idx as u32 + 1);
            assert_eq!(month.status, CoverageStatus::Empty);
            assert_eq!(month.coverage_percentage, 0);
        }
        assert_eq!(report.month(2).unwrap().days_in_month, 29);
        assert_eq!(report.total_usage, 0.0);
        assert_eq!(report.filled_months_count, 0);
    }

    #[test]
    fn overlapping_bills_clamp_covered_days() {
        let bills = vec![
            BillingRecord::new("113/03/01", "113/03/31", 31.0),
            BillingRecord::new("113/03/10", "113/03/20", 11.0),
        ];
        let report = aggregate_year(&bills, 2024);
        let march = report.month(3).unwrap();
        assert_eq!(march.covered_days, 31);
        assert_eq!(march.status, CoverageStatus::Complete);
        assert!((march.allocated_usage - 42.0).abs() < 1e-9);
    }

    #[test]
    fn zero_quantity_bill_still_covers_days() {
        let bills = vec![BillingRecord::new("113/05/01", "113/05/31", 0.0)];
        let report = aggregate_year(&bills, 2024);
        let may = report.month(5).unwrap();
        assert_eq!(may.covered_days, 31);
        assert_eq!(may.status, CoverageStatus::Complete);
        assert_eq!(may.allocated_usage, 0.0);
        assert_eq!(report.filled_months_count, 0);
        assert!(!report.has_skipped());
    }

    #[test]
    fn merge_rejects_mismatched_years() {
        let mut left = MonthlyAccumulator::new(2024);
        let right = MonthlyAccumulator::new(2023);
        assert!(matches!(
            left.merge(&right),
            Err(BillingError::InvalidInput(_))
        ));
    }

    #[test]
    fn merged_partials_match_single_pass() {
        let bills = vec![
            BillingRecord::new("113/01/16", "113/02/15", 300.0),
            BillingRecord::new("113/02/16", "113/03/15", 290.0),
            BillingRecord::new("113/99/01", "113/03/15", 1.0),
            BillingRecord::new("113/03/16", "113/04/15", 310.0),
        ];
        let whole = aggregate_year(&bills, 2024);

        let mut left = MonthlyAccumulator::new(2024);
        let mut right = MonthlyAccumulator::new(2024);
        for (index, record) in bills.iter().enumerate() {
            if index % 2 == 0 {
                left.add_bill(index, record);
            } else {
                right.add_bill(index, record);
            }
        }
        right.merge(&left).unwrap();
        let merged = right.finish();

        assert_eq!(merged.skipped, whole.skipped);
        for (a, b) in merged.monthly_progress.iter().zip(&whole.monthly_progress) {
            assert_eq!(a.covered_days, b.covered_days);
            assert_eq!(a.status, b.status);
            assert!((a.allocated_usage - b.allocated_usage).abs() < 1e-9);
        }
    }
}
