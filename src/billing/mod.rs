//! Billing-period allocation and coverage engine.

pub mod aggregate;
pub mod allocation;
pub mod coverage;
pub mod overlap;
pub mod progress;
pub mod record;

pub use aggregate::{
    aggregate_with, aggregate_year, MonthAggregate, MonthlyAccumulator, SkippedBill, YearReport,
    DEFAULT_LONG_BILL_DAYS,
};
pub use allocation::{allocate, allocate_record, MonthlyAllocation};
pub use coverage::{classify, coverage_percentage, CoverageStatus, ExtendedStatus};
pub use overlap::{overlap_with_month, overlap_with_year, YearOverlap};
pub use progress::{billing_days, completed_months, extended_statuses, progress_percentage, round_to};
pub use record::{BillingPeriod, BillingRecord};
