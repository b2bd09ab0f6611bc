//! Splits a bill's quantity across the months it covers, weighted by days.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    billing::{
        overlap::overlap_with_year,
        record::{BillingPeriod, BillingRecord},
    },
    errors::BillError,
};

/// Month number (1-12) to allocated quantity.
pub type MonthlyAllocation = BTreeMap<u32, f64>;

/// Allocates `quantity` to the months of `target_year` that `period` covers.
///
/// The daily rate uses the full, unclipped billing interval as its denominator, so a
/// bill straddling two years only contributes the share of days falling in the target
/// year. Non-positive quantities yield an empty allocation.
pub fn allocate(period: &BillingPeriod, quantity: f64, target_year: i32) -> MonthlyAllocation {
    let mut allocation = MonthlyAllocation::new();
    if !(quantity.is_finite() && quantity > 0.0) {
        return allocation;
    }
    let Some(overlap) = overlap_with_year(period.start, period.end, target_year) else {
        return allocation;
    };

    let daily_rate = quantity / period.total_days() as f64;
    for (month, days) in overlap.months() {
        if days > 0 {
            allocation.insert(month, f64::from(days) * daily_rate);
        }
    }

    debug!(
        start = %period.start,
        end = %period.end,
        total_days = period.total_days(),
        effective_days = overlap.days(),
        target_year,
        quantity,
        "allocated bill across {} month(s)",
        allocation.len()
    );
    allocation
}

/// Converts the record's ROC dates and allocates its billable quantity.
pub fn allocate_record(
    record: &BillingRecord,
    target_year: i32,
) -> Result<MonthlyAllocation, BillError> {
    let period = record.period()?;
    Ok(allocate(&period, record.billable_quantity()?, target_year))
}
