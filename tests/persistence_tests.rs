mod common;

use billing_core::billing::aggregate_year;
use billing_core::errors::BillingError;
use billing_core::utils::persistence::{
    load_bills_from_file, load_report_from_file, save_report_to_file,
};
use common::{assert_reports_match, sample_bills};
use std::fs;
use tempfile::tempdir;

#[test]
fn bills_load_from_upstream_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bills.json");
    fs::write(
        &path,
        r#"[
            {"billingStart": "113/01/16", "billingEnd": "113/02/15", "billingUnits": 300},
            {"billingStart": "113/02/16", "billingEnd": "113/03/15", "quantity": 290.5}
        ]"#,
    )
    .unwrap();

    let bills = load_bills_from_file(&path).expect("load bills");
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].billing_start, "113/01/16");
    assert_eq!(bills[0].quantity, 300.0);
    assert_eq!(bills[1].quantity, 290.5);
}

#[test]
fn report_survives_save_and_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    let report = aggregate_year(&sample_bills(), 2024);

    save_report_to_file(&report, &path).expect("save report");
    assert!(!path.with_extension("tmp").exists());

    let loaded = load_report_from_file(&path).expect("load report");
    assert_reports_match(&report, &loaded);
    assert_eq!(loaded.skipped, report.skipped);
}

#[test]
fn missing_and_malformed_files_surface_errors() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_bills_from_file(&missing),
        Err(BillingError::Io(_))
    ));

    let malformed = dir.path().join("malformed.json");
    fs::write(&malformed, "{ not json").unwrap();
    assert!(matches!(
        load_bills_from_file(&malformed),
        Err(BillingError::Serde(_))
    ));
}
