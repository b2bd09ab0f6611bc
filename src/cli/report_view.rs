//! Text rendering of a [`YearReport`]. Status labels and colours live here only.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::{
    billing::{
        completed_months, extended_statuses, progress_percentage, round_to, CoverageStatus,
        ExtendedStatus, YearReport,
    },
    config::Config,
};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn coverage_label(status: CoverageStatus) -> ColoredString {
    let text = format!("{:<9}", status.to_string());
    match status {
        CoverageStatus::Complete => text.green(),
        CoverageStatus::Partial => text.yellow(),
        CoverageStatus::Empty => text.dimmed(),
    }
}

fn extended_label(status: ExtendedStatus) -> ColoredString {
    let text = format!("{:<16}", status.to_string());
    match status {
        ExtendedStatus::Complete => text.green(),
        ExtendedStatus::MissingEvidence => text.yellow(),
        ExtendedStatus::MissingData => text.magenta(),
        ExtendedStatus::Empty => text.dimmed(),
    }
}

/// Renders the monthly table, the totals line and the progress line.
pub fn render_report(report: &YearReport, config: &Config, evidence: Option<&[bool; 12]>) -> String {
    let decimals = config.decimal_places as usize;
    let extended = evidence.map(|flags| extended_statuses(report, flags));
    let mut out = String::new();

    let _ = writeln!(out, "Monthly usage for {}", report.target_year);
    let _ = write!(
        out,
        "{:<5} {:>14} {:>9} {:<9} {:>5}",
        "Month", "Usage", "Days", "Status", "Cover"
    );
    if extended.is_some() {
        let _ = write!(out, " {}", "Evidence");
    }
    out.push('\n');

    for month in &report.monthly_progress {
        let slot = (month.month as usize).checked_sub(1);
        let name = slot
            .and_then(|idx| MONTH_NAMES.get(idx))
            .copied()
            .unwrap_or("?");
        let usage = round_to(month.allocated_usage, config.decimal_places);
        let _ = write!(
            out,
            "{:<5} {:>14.*} {:>9} {} {:>4}%",
            name,
            decimals,
            usage,
            format!("{}/{}", month.covered_days, month.days_in_month),
            coverage_label(month.status),
            month.coverage_percentage
        );
        if let Some(statuses) = &extended {
            match slot.and_then(|idx| statuses.get(idx)) {
                Some(status) => {
                    let _ = write!(out, " {}", extended_label(*status));
                }
                None => out.push_str(" ?"),
            }
        }
        out.push('\n');
    }

    let total = round_to(report.total_usage, config.decimal_places);
    let _ = writeln!(
        out,
        "Total: {:.*} {} across {} filled month(s)",
        decimals, total, config.unit_label, report.filled_months_count
    );
    let completed = completed_months(report);
    let _ = writeln!(
        out,
        "Completed: {}/12 ({}%)",
        completed,
        progress_percentage(completed, 12)
    );
    out
}
