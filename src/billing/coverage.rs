use std::fmt;

use serde::{Deserialize, Serialize};

/// How much of a calendar month is covered by bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CoverageStatus {
    #[default]
    Empty,
    Partial,
    Complete,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoverageStatus::Empty => "empty",
            CoverageStatus::Partial => "partial",
            CoverageStatus::Complete => "complete",
        };
        f.write_str(label)
    }
}

/// Month status once evidence files are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ExtendedStatus {
    Complete,
    MissingEvidence,
    MissingData,
    #[default]
    Empty,
}

impl ExtendedStatus {
    pub fn from_flags(has_usage_data: bool, has_evidence_files: bool) -> Self {
        match (has_usage_data, has_evidence_files) {
            (true, true) => ExtendedStatus::Complete,
            (true, false) => ExtendedStatus::MissingEvidence,
            (false, true) => ExtendedStatus::MissingData,
            (false, false) => ExtendedStatus::Empty,
        }
    }
}

impl fmt::Display for ExtendedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExtendedStatus::Complete => "complete",
            ExtendedStatus::MissingEvidence => "missingEvidence",
            ExtendedStatus::MissingData => "missingData",
            ExtendedStatus::Empty => "empty",
        };
        f.write_str(label)
    }
}

pub fn classify(covered_days: u32, days_in_month: u32) -> CoverageStatus {
    if covered_days == 0 {
        CoverageStatus::Empty
    } else if covered_days >= days_in_month {
        CoverageStatus::Complete
    } else {
        CoverageStatus::Partial
    }
}

/// `round(covered / days * 100)`. Partial months stay strictly between 0 and 100.
pub fn coverage_percentage(covered_days: u32, days_in_month: u32) -> u8 {
    match classify(covered_days, days_in_month) {
        CoverageStatus::Empty => 0,
        CoverageStatus::Complete => 100,
        CoverageStatus::Partial => {
            let ratio = f64::from(covered_days) / f64::from(days_in_month);
            (ratio * 100.0).round().clamp(1.0, 99.0) as u8
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify(0, 31), CoverageStatus::Empty);
        assert_eq!(classify(1, 31), CoverageStatus::Partial);
        assert_eq!(classify(30, 31), CoverageStatus::Partial);
        assert_eq!(classify(31, 31), CoverageStatus::Complete);
        assert_eq!(classify(29, 29), CoverageStatus::Complete);
    }

    #[test]
    fn percentages_round_and_stay_in_range() {
        assert_eq!(coverage_percentage(0, 31), 0);
        assert_eq!(coverage_percentage(16, 31), 52);
        assert_eq!(coverage_percentage(15, 29), 52);
        assert_eq!(coverage_percentage(31, 31), 100);
        for days in [28, 29, 30, 31] {
            for covered in 1..days {
                let pct = coverage_percentage(covered, days);
                assert!(pct > 0 && pct < 100, "{covered}/{days} -> {pct}");
            }
        }
    }

    #[test]
    fn extended_status_truth_table() {
        assert_eq!(ExtendedStatus::from_flags(true, true), ExtendedStatus::Complete);
        assert_eq!(ExtendedStatus::from_flags(true, false), ExtendedStatus::MissingEvidence);
        assert_eq!(ExtendedStatus::from_flags(false, true), ExtendedStatus::MissingData);
        assert_eq!(ExtendedStatus::from_flags(false, false), ExtendedStatus::Empty);
    }

    #[test]
    fn statuses_serialize_in_camel_case() {
        assert_eq!(
            serde_json::to_string(&ExtendedStatus::MissingEvidence).unwrap(),
            "\"missingEvidence\""
        );
        assert_eq!(serde_json::to_string(&CoverageStatus::Partial).unwrap(), "\"partial\"");
    }
}
