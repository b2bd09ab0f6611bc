use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar::RocDate, errors::BillError};

/// One bill or usage document as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    /// ROC date string, `YYY/MM/DD`.
    pub billing_start: String,
    /// ROC date string, `YYY/MM/DD`. Inclusive.
    pub billing_end: String,
    #[serde(alias = "billingUnits")]
    pub quantity: f64,
}

impl BillingRecord {
    pub fn new(
        billing_start: impl Into<String>,
        billing_end: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            billing_start: billing_start.into(),
            billing_end: billing_end.into(),
            quantity,
        }
    }

    /// Converts both ROC dates and checks ordering.
    pub fn period(&self) -> Result<BillingPeriod, BillError> {
        let start = self.billing_start.parse::<RocDate>()?.to_gregorian()?;
        let end = self.billing_end.parse::<RocDate>()?.to_gregorian()?;
        BillingPeriod::new(start, end)
    }

    /// Quantity the allocator distributes. Zero and negative amounts are legitimate
    /// "no usage" bills and count as nothing; NaN and infinities are rejected.
    pub fn billable_quantity(&self) -> Result<f64, BillError> {
        if !self.quantity.is_finite() {
            return Err(BillError::NonFiniteQuantity {
                quantity: self.quantity.to_string(),
            });
        }
        Ok(self.quantity.max(0.0))
    }
}

/// Inclusive Gregorian interval `[start, end]` of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BillError> {
        if end < start {
            return Err(BillError::InvertedInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Inclusive day count; at least 1 because `start <= end`.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_converts_roc_dates() {
        let record = BillingRecord::new("113/01/16", "113/02/15", 300.0);
        let period = record.period().unwrap();
        assert_eq!(period.start, date(2024, 1, 16));
        assert_eq!(period.end, date(2024, 2, 15));
        assert_eq!(period.total_days(), 31);
    }

    #[test]
    fn single_day_period_counts_one_day() {
        let period = BillingPeriod::new(date(2024, 3, 3), date(2024, 3, 3)).unwrap();
        assert_eq!(period.total_days(), 1);
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let record = BillingRecord::new("113/02/15", "113/01/16", 10.0);
        assert!(matches!(
            record.period(),
            Err(BillError::InvertedInterval { .. })
        ));
    }

    #[test]
    fn non_positive_quantities_are_not_billable() {
        assert_eq!(BillingRecord::new("", "", -5.0).billable_quantity(), Ok(0.0));
        assert_eq!(BillingRecord::new("", "", 0.0).billable_quantity(), Ok(0.0));
        assert_eq!(BillingRecord::new("", "", 12.5).billable_quantity(), Ok(12.5));
    }

    #[test]
    fn non_finite_quantities_are_errors() {
        for quantity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                BillingRecord::new("", "", quantity).billable_quantity(),
                Err(BillError::NonFiniteQuantity { .. })
            ));
        }
    }

    #[test]
    fn accepts_upstream_field_names() {
        let json = r#"{"billingStart":"113/01/01","billingEnd":"113/01/31","billingUnits":310}"#;
        let record: BillingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.quantity, 310.0);
    }
}
