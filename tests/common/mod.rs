#![allow(dead_code)]

use billing_core::billing::{BillingRecord, YearReport};

pub const TOLERANCE: f64 = 1e-6;

pub fn bill(start: &str, end: &str, quantity: f64) -> BillingRecord {
    BillingRecord::new(start, end, quantity)
}

/// A year of consecutive, month-straddling gas bills as they typically arrive.
pub fn sample_bills() -> Vec<BillingRecord> {
    vec![
        bill("112/12/16", "113/01/15", 310.0),
        bill("113/01/16", "113/02/15", 300.0),
        bill("113/02/16", "113/03/15", 290.0),
        bill("113/03/16", "113/04/15", 310.0),
        bill("113/04/16", "113/05/15", 300.0),
        bill("113/05/16", "113/06/15", 310.0),
        bill("113/06/16", "113/07/15", 300.0),
        bill("113/07/16", "113/08/15", 310.0),
        bill("113/08/16", "113/09/15", 310.0),
        bill("113/09/16", "113/10/15", 300.0),
        bill("113/10/16", "113/11/15", 310.0),
        bill("113/11/16", "113/12/15", 300.0),
        bill("113/12/16", "114/01/15", 310.0),
    ]
}

pub fn assert_reports_match(left: &YearReport, right: &YearReport) {
    assert_eq!(left.target_year, right.target_year);
    assert_eq!(left.filled_months_count, right.filled_months_count);
    assert!((left.total_usage - right.total_usage).abs() < TOLERANCE);
    for (a, b) in left.monthly_progress.iter().zip(&right.monthly_progress) {
        assert_eq!(a.month, b.month);
        assert_eq!(a.covered_days, b.covered_days);
        assert_eq!(a.days_in_month, b.days_in_month);
        assert_eq!(a.status, b.status);
        assert_eq!(a.coverage_percentage, b.coverage_percentage);
        assert!(
            (a.allocated_usage - b.allocated_usage).abs() < TOLERANCE,
            "month {} differs: {} vs {}",
            a.month,
            a.allocated_usage,
            b.allocated_usage
        );
    }
}
