//! nutrilog library
//!
//! Meal resolution and time-bucketed aggregation of a nutrition log.

pub mod build_info;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod tools;

pub use error::{ConfigError, DataError, FormatError, LoadError, NutritionError, NutritionResult};
