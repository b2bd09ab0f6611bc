use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".billing_core";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Application data directory: `BILLING_CORE_HOME` if set, otherwise `~/.billing_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BILLING_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}
