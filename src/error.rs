//! Error types
//!
//! Failures raised by the resolver and aggregator, grouped by kind, plus the
//! loader errors raised at the CSV boundary.

use thiserror::Error;

use crate::nutrition::Granularity;

/// Malformed `amount` field in an entry being scaled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("Empty amount")]
    EmptyAmount,

    #[error("Amount '{amount}' does not start with a number")]
    InvalidNumeral { amount: String },

    #[error("Amount '{amount}' has unrecognized unit suffix '{unit}'")]
    UnknownUnit { amount: String, unit: char },
}

/// Input data that makes a computation undefined
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("Meal '{meal}' has a zero total amount '{amount}'")]
    ZeroMealTotal { meal: String, amount: String },

    #[error("Meal '{meal}' has a negative total amount '{amount}'")]
    NegativeMealTotal { meal: String, amount: String },

    #[error(
        "Meal '{meal}' has {} total lines ({}), expected exactly one",
        .amounts.len(),
        .amounts.join(", ")
    )]
    DuplicateMealTotal { meal: String, amounts: Vec<String> },

    #[error("'{date}' looks like a date but is not a valid calendar day")]
    InvalidDate { date: String },
}

/// Unknown or unimplemented configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unknown granularity '{0}'")]
    UnknownGranularity(String),

    #[error("Granularity '{0}' is not supported")]
    UnsupportedGranularity(Granularity),

    #[error("Unknown unit policy '{0}', expected 'strict' or 'lenient'")]
    UnknownUnitPolicy(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Any failure of the nutrition core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for the nutrition core
pub type NutritionResult<T> = Result<T, NutritionError>;

/// Failure reading one of the input tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error for file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for table loading
pub type LoadResult<T> = Result<T, LoadError>;
