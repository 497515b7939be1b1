//! Nutrient reference table
//!
//! Per-food nutrient values, with nutrient columns taken from the table
//! header rather than fixed at compile time.

use serde::{Deserialize, Serialize};

/// One food's nutrient values, in the table's column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub name: String,
    pub values: Vec<f64>,
}

impl NutrientProfile {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A reference table of nutrient profiles with unique names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTable {
    columns: Vec<String>,
    rows: Vec<NutrientProfile>,
}

impl NutrientTable {
    /// Create an empty table with the given nutrient columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Nutrient column names (the `name` column is not included)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[NutrientProfile] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a food by exact name
    pub fn get(&self, name: &str) -> Option<&NutrientProfile> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// A row of zeros, used for foods missing from the table
    pub fn zero_values(&self) -> Vec<f64> {
        vec![0.0; self.columns.len()]
    }

    /// Insert a profile, replacing any row with the same name
    ///
    /// The replaced row is removed and the new one appended, so names stay
    /// unique. Returns `true` when a row was replaced.
    pub fn upsert(&mut self, profile: NutrientProfile) -> bool {
        debug_assert_eq!(profile.values.len(), self.columns.len());

        let before = self.rows.len();
        self.rows.retain(|row| row.name != profile.name);
        let replaced = self.rows.len() != before;
        self.rows.push(profile);
        replaced
    }
}
