//! Scaling rule
//!
//! Turns a reference profile and a logged amount into the nutrients
//! actually consumed: `reference value * numeral / scale factor`.

use crate::error::FormatError;
use crate::models::NutrientTable;

use super::units::{Quantity, UnitPolicy};

/// Nutrient contribution of `amount` of `subject`
///
/// A subject missing from the reference table contributes zeros. The amount
/// is parsed either way, so a malformed amount is reported even for an
/// unknown food.
pub fn contribution(
    reference: &NutrientTable,
    subject: &str,
    amount: &str,
    policy: UnitPolicy,
) -> Result<Vec<f64>, FormatError> {
    let quantity = Quantity::parse(amount, policy)?;

    match reference.get(subject) {
        Some(profile) => Ok(scale_values(&profile.values, &quantity)),
        None => {
            tracing::debug!("'{}' not in nutrient table, contributing zero", subject);
            Ok(reference.zero_values())
        }
    }
}

/// Apply the scaling rule to every value of a profile
pub fn scale_values(values: &[f64], quantity: &Quantity) -> Vec<f64> {
    let scale = quantity.unit.scale_factor();
    values.iter().map(|v| v * quantity.numeral / scale).collect()
}

/// Add `values` into `acc` column by column
pub fn accumulate(acc: &mut [f64], values: &[f64]) {
    for (total, value) in acc.iter_mut().zip(values) {
        *total += value;
    }
}
