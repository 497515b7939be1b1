//! Input tables
//!
//! Reads the calorie-changes log and the food-nutrition table from CSV.

pub mod tables;

pub use tables::{load_entries, load_nutrient_table, read_entries, read_nutrient_table};
