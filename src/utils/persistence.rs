use std::{fs, path::Path};

use crate::{
    billing::{BillingRecord, YearReport},
    errors::Result,
};

/// Reads a JSON array of bills.
pub fn load_bills_from_file(path: &Path) -> Result<Vec<BillingRecord>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the report to disk atomically by staging to a temporary file.
pub fn save_report_to_file(report: &YearReport, path: &Path) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

pub fn load_report_from_file(path: &Path) -> Result<YearReport> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
