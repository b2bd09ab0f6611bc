//! Reference command-line host for the billing engine.

pub mod output;
pub mod report_view;

use std::{env, path::PathBuf};

use chrono::{Datelike, Utc};

use crate::{
    billing::{aggregate_with, MonthlyAccumulator, YearReport},
    calendar::{days_in_month, RocDate},
    config::{Config, ConfigManager},
    errors::{BillingError, CliError},
    utils::{build_info, persistence},
};

pub type CliResult<T> = Result<T, CliError>;

const USAGE: &str = "Usage: billing_core_cli <command>\n\
     Commands:\n  \
     report <bills.json> [--year YYYY] [--json] [--evidence 1,2,...] [--out report.json]\n  \
     convert <YYY/MM/DD>\n  \
     days <year> <month>\n  \
     config show | config path | config set <key> <value>\n  \
     version";

/// Options accepted by the `report` command.
#[derive(Debug, Default, PartialEq)]
pub struct ReportArgs {
    pub bills: PathBuf,
    pub year: Option<i32>,
    pub json: bool,
    pub evidence: Option<[bool; 12]>,
    pub out: Option<PathBuf>,
}

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> CliResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    output::set_color(config.color);
    run_with(&args, &manager, config)
}

pub fn run_with(args: &[String], manager: &ConfigManager, config: Config) -> CliResult<()> {
    let Some((command, rest)) = args.split_first() else {
        return Err(CliError::Input(USAGE.into()));
    };

    match command.as_str() {
        "report" => {
            let report_args = parse_report_args(rest)?;
            run_report(&report_args, &config)
        }
        "convert" => {
            let input = rest
                .first()
                .ok_or_else(|| CliError::Input("convert expects a YYY/MM/DD date".into()))?;
            let date: RocDate = input.parse()?;
            println!("{}", date.to_iso_string());
            Ok(())
        }
        "days" => {
            let (year, month) = match rest {
                [year, month] => (
                    parse_number::<i32>("year", year)?,
                    parse_number::<u32>("month", month)?,
                ),
                _ => return Err(CliError::Input("days expects <year> <month>".into())),
            };
            if !(1..=12).contains(&month) {
                return Err(CliError::Input(format!("month {month} is outside 1-12")));
            }
            println!("{}", days_in_month(year, month));
            Ok(())
        }
        "config" => run_config(rest, manager, config),
        "version" => {
            println!("{}", build_info::current().summary());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

pub fn parse_report_args(args: &[String]) -> CliResult<ReportArgs> {
    let mut parsed = ReportArgs::default();
    let mut bills = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--year" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Input("--year expects a value".into()))?;
                parsed.year = Some(parse_number("year", value)?);
            }
            "--evidence" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Input("--evidence expects a month list".into()))?;
                parsed.evidence = Some(parse_evidence(value)?);
            }
            "--out" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Input("--out expects a path".into()))?;
                parsed.out = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Input(format!("unknown option `{flag}`")))
            }
            path if bills.is_none() => bills = Some(PathBuf::from(path)),
            extra => return Err(CliError::Input(format!("unexpected argument `{extra}`"))),
        }
    }
    parsed.bills = bills.ok_or_else(|| CliError::Input("report expects a bills file".into()))?;
    Ok(parsed)
}

/// Parses `1,3,12` into per-month evidence flags.
pub fn parse_evidence(value: &str) -> CliResult<[bool; 12]> {
    let mut flags = [false; 12];
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let month: usize = parse_number("evidence month", part)?;
        if !(1..=12).contains(&month) {
            return Err(CliError::Input(format!("evidence month {month} is outside 1-12")));
        }
        flags[month - 1] = true;
    }
    Ok(flags)
}

fn parse_number<T: std::str::FromStr>(label: &str, value: &str) -> CliResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Input(format!("invalid {label} `{value}`")))
}

fn build_report(args: &ReportArgs, config: &Config) -> CliResult<YearReport> {
    let bills = persistence::load_bills_from_file(&args.bills)?;
    let year = args
        .year
        .or(config.default_target_year)
        .unwrap_or_else(|| Utc::now().year());
    let accumulator = MonthlyAccumulator::new(year).with_long_bill_days(config.long_bill_days);
    Ok(aggregate_with(accumulator, &bills))
}

fn run_report(args: &ReportArgs, config: &Config) -> CliResult<()> {
    let report = build_report(args, config)?;

    if let Some(out) = &args.out {
        persistence::save_report_to_file(&report, out)?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(BillingError::from)?;
        println!("{json}");
    } else {
        print!(
            "{}",
            report_view::render_report(&report, config, args.evidence.as_ref())
        );
    }

    if report.has_skipped() {
        for skipped in &report.skipped {
            output::warning(format!("bill #{} skipped: {}", skipped.index + 1, skipped.error));
        }
        output::warning(format!(
            "{} bill(s) were not counted",
            report.skipped.len()
        ));
    }
    if let Some(out) = &args.out {
        output::success(format!("Saved report to {}", out.display()));
    }
    Ok(())
}

fn run_config(args: &[String], manager: &ConfigManager, mut config: Config) -> CliResult<()> {
    match args {
        [] => Err(CliError::Input("config expects show, path or set".into())),
        [cmd] if cmd == "show" => {
            output::section("Configuration");
            let json =
                serde_json::to_string_pretty(&config).map_err(BillingError::from)?;
            println!("{json}");
            Ok(())
        }
        [cmd] if cmd == "path" => {
            println!("{}", manager.path().display());
            Ok(())
        }
        [cmd, key, value] if cmd == "set" => {
            config.set_value(key, value)?;
            manager.save(&config)?;
            output::success(format!("Set {key} = {value}"));
            Ok(())
        }
        _ => Err(CliError::Input(
            "config expects show, path or set <key> <value>".into(),
        )),
    }
}
