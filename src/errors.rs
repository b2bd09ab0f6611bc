use std::result::Result as StdResult;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a single billing record is rejected by the engine.
///
/// These never abort an aggregation; the offending bill is skipped and reported
/// back through [`crate::billing::YearReport::skipped`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BillError {
    #[error("Invalid date `{input}`: {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("Billing end {end} is before billing start {start}")]
    InvertedInterval { start: String, end: String },
    #[error("Quantity {quantity} is not a finite number")]
    NonFiniteQuantity { quantity: String },
}

impl BillError {
    pub(crate) fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BillError::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-level error for the I/O facing surfaces (persistence, config, CLI).
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Bill(#[from] BillError),
}

pub type Result<T> = StdResult<T, BillingError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BillingError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
}

impl From<BillError> for CliError {
    fn from(err: BillError) -> Self {
        CliError::Core(BillingError::from(err))
    }
}
