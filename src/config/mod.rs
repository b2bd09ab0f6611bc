use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    billing::DEFAULT_LONG_BILL_DAYS,
    errors::{BillingError, Result},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// User preferences for hosts of the billing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decimals shown for allocated usage. The engine itself never rounds.
    pub decimal_places: u32,
    /// Bills longer than this are logged as unusual.
    pub long_bill_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target_year: Option<i32>,
    pub unit_label: String,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            long_bill_days: DEFAULT_LONG_BILL_DAYS,
            default_target_year: None,
            unit_label: "m³".into(),
            color: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "decimal_places",
        "long_bill_days",
        "default_target_year",
        "unit_label",
        "color",
    ];

    /// Updates a single field from its textual form, as typed on the command line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "decimal_places" => {
                let places: u32 = parse_field(key, value)?;
                if places > 6 {
                    return Err(BillingError::Config(format!(
                        "decimal_places must be between 0 and 6, got {places}"
                    )));
                }
                self.decimal_places = places;
            }
            "long_bill_days" => {
                let days: i64 = parse_field(key, value)?;
                if days < 1 {
                    return Err(BillingError::Config(
                        "long_bill_days must be at least 1".into(),
                    ));
                }
                self.long_bill_days = days;
            }
            "default_target_year" => {
                self.default_target_year = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(parse_field(key, value)?)
                };
            }
            "unit_label" => self.unit_label = value.to_string(),
            "color" => self.color = parse_field(key, value)?,
            other => {
                return Err(BillingError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| BillingError::Config(format!("invalid value `{value}` for {key}")))
}

/// Loads and stores [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_root = paths::config_dir_in(&base);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                BillingError::Config(format!("{}: {err}", self.path.display()))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
