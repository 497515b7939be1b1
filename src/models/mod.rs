//! Data models
//!
//! Log entries, the nutrient reference table, and aggregation results.

mod entry;
mod nutrient_profile;
mod result_table;

pub use entry::{looks_like_date, Consumption, Entry, EntryClass, TOTAL_MARKER};
pub use nutrient_profile::{NutrientProfile, NutrientTable};
pub use result_table::{Cell, ResultTable};
