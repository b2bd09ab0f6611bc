#![doc(test(attr(deny(warnings))))]

//! Billing Core allocates ROC-dated utility bills across the calendar months of a
//! reporting year and classifies how completely each month is covered.
//!
//! ```
//! use billing_core::billing::{aggregate_year, BillingRecord, CoverageStatus};
//!
//! let bills = vec![BillingRecord::new("113/01/16", "113/02/15", 300.0)];
//! let report = aggregate_year(&bills, 2024);
//! assert_eq!(report.month(1).unwrap().covered_days, 16);
//! assert_eq!(report.month(2).unwrap().status, CoverageStatus::Partial);
//! ```

pub mod billing;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Billing Core tracing initialized.");
    });
}
