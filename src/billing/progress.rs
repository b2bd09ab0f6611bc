//! Report-level summaries used by hosts for progress indicators.

use crate::{
    billing::{
        aggregate::YearReport,
        coverage::{CoverageStatus, ExtendedStatus},
        record::BillingPeriod,
    },
    calendar::parse_roc_date,
    errors::BillError,
};

/// Months that carry usage and are fully covered.
pub fn completed_months(report: &YearReport) -> usize {
    report
        .monthly_progress
        .iter()
        .filter(|m| m.allocated_usage > 0.0 && m.status == CoverageStatus::Complete)
        .count()
}

/// `round(completed / total * 100)`, or 0 when there is nothing to complete.
pub fn progress_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed.min(total) as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

/// Inclusive day count between two ROC date strings.
pub fn billing_days(start: &str, end: &str) -> Result<i64, BillError> {
    let period = BillingPeriod::new(parse_roc_date(start)?, parse_roc_date(end)?)?;
    Ok(period.total_days())
}

/// Combines the report's usage with per-month evidence flags supplied by the host.
pub fn extended_statuses(report: &YearReport, evidence: &[bool; 12]) -> [ExtendedStatus; 12] {
    let mut statuses = [ExtendedStatus::Empty; 12];
    for (idx, slot) in statuses.iter_mut().enumerate() {
        let has_usage = report
            .month(idx as u32 + 1)
            .map(|m| m.allocated_usage > 0.0)
            .unwrap_or(false);
        *slot = ExtendedStatus::from_flags(has_usage, evidence[idx]);
    }
    statuses
}

/// Display rounding, half away from zero. Allocation itself is never rounded.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(12) as i32);
    (value * factor).round() / factor
}
