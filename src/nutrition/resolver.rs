//! Meal resolution
//!
//! A meal is a group of log lines sharing a non-date key: ingredient lines
//! plus one `total` line giving the amount the finished dish weighs. The
//! resolver turns each meal into a synthetic reference row so that eating
//! the meal on a date is scaled exactly like eating any other food.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{DataError, NutritionResult};
use crate::models::{Consumption, Entry, EntryClass, NutrientProfile, NutrientTable, TOTAL_MARKER};

use super::scaling::{accumulate, contribution};
use super::units::{Quantity, UnitPolicy};

/// A meal turned into a reference row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMeal {
    pub name: String,
    pub ingredient_count: usize,
    /// The `total` line's amount, as logged
    pub total_amount: String,
    pub profile: NutrientProfile,
}

/// Output of [`resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Dated entries, in log order
    pub consumption: Vec<Consumption>,
    /// The input reference table plus one row per resolved meal
    pub reference: NutrientTable,
    /// Resolved meals, in order of their `total` lines
    pub meals: Vec<ResolvedMeal>,
}

/// Scaled ingredient contributions for one meal key
struct MealIngredients {
    count: usize,
    sums: Vec<f64>,
}

/// Split the log, resolve meals and build the augmented reference table
///
/// The meal profile is expressed in the convention of the `total` line's
/// unit: a `300g` total yields values per 100 g, a `2` total yields values
/// per portion. Ingredients are looked up in `reference` only, so a meal
/// used as another meal's ingredient contributes zero.
pub fn resolve(
    entries: &[Entry],
    reference: &NutrientTable,
    policy: UnitPolicy,
) -> NutritionResult<Resolution> {
    let mut consumption = Vec::new();
    let mut totals: Vec<(&str, Vec<&Entry>)> = Vec::new();
    let mut ingredients: HashMap<&str, MealIngredients> = HashMap::new();

    for entry in entries {
        match entry.classify() {
            EntryClass::Consumption => {
                if entry.subject == TOTAL_MARKER {
                    tracing::warn!(
                        "'{}' line dated {} is not part of a meal, logging it as eaten food",
                        TOTAL_MARKER,
                        entry.date_or_id
                    );
                }
                consumption.push(entry.clone().into_consumption());
            }
            EntryClass::MealTotal => {
                match totals.iter_mut().find(|(key, _)| *key == entry.date_or_id) {
                    Some((_, lines)) => lines.push(entry),
                    None => totals.push((entry.date_or_id.as_str(), vec![entry])),
                }
            }
            EntryClass::MealIngredient => {
                let values = contribution(reference, &entry.subject, &entry.amount, policy)?;
                let group = ingredients
                    .entry(entry.date_or_id.as_str())
                    .or_insert_with(|| MealIngredients {
                        count: 0,
                        sums: reference.zero_values(),
                    });
                group.count += 1;
                accumulate(&mut group.sums, &values);
            }
        }
    }

    let mut augmented = reference.clone();
    let mut meals = Vec::with_capacity(totals.len());

    for (name, lines) in totals {
        let total = match lines.as_slice() {
            [total] => *total,
            _ => {
                return Err(DataError::DuplicateMealTotal {
                    meal: name.to_string(),
                    amounts: lines.iter().map(|line| line.amount.clone()).collect(),
                }
                .into())
            }
        };

        let quantity = Quantity::parse(&total.amount, policy)?;
        let divisor = quantity.scaled();
        if divisor == 0.0 {
            return Err(DataError::ZeroMealTotal {
                meal: name.to_string(),
                amount: total.amount.clone(),
            }
            .into());
        }
        if divisor < 0.0 {
            return Err(DataError::NegativeMealTotal {
                meal: name.to_string(),
                amount: total.amount.clone(),
            }
            .into());
        }

        let (ingredient_count, sums) = match ingredients.remove(name) {
            Some(group) => (group.count, group.sums),
            None => {
                tracing::debug!("Meal '{}' has a total but no ingredients", name);
                (0, reference.zero_values())
            }
        };

        let profile = NutrientProfile::new(name, sums.iter().map(|v| v / divisor).collect());

        if augmented.upsert(profile.clone()) {
            tracing::warn!("Meal '{}' replaces the nutrient table row of the same name", name);
        }

        meals.push(ResolvedMeal {
            name: name.to_string(),
            ingredient_count,
            total_amount: total.amount.clone(),
            profile,
        });
    }

    for name in ingredients.keys() {
        tracing::debug!("Meal '{}' has no total line, dropped", name);
    }

    tracing::debug!(
        "Resolved {} meals, {} consumption entries",
        meals.len(),
        consumption.len()
    );

    Ok(Resolution {
        consumption,
        reference: augmented,
        meals,
    })
}
