//! Core entry point
//!
//! Resolver followed by aggregator, as one pure function of the two input
//! tables and the request.

use serde::{Deserialize, Serialize};

use crate::error::NutritionResult;
use crate::models::{Entry, NutrientTable, ResultTable};

use super::aggregator::aggregate;
use super::granularity::Granularity;
use super::resolver::{resolve, ResolvedMeal};
use super::units::UnitPolicy;

/// Per-call parameters of the core
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub granularity: Granularity,
    pub unit_policy: UnitPolicy,
}

impl AggregationRequest {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            unit_policy: UnitPolicy::default(),
        }
    }
}

/// Result table together with what the resolver found along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub table: ResultTable,
    pub meals: Vec<ResolvedMeal>,
    pub consumption_count: usize,
}

/// Resolve meals in `entries` and aggregate the dated ones
pub fn summarize(
    entries: &[Entry],
    reference: &NutrientTable,
    request: &AggregationRequest,
) -> NutritionResult<Summary> {
    let resolution = resolve(entries, reference, request.unit_policy)?;
    let table = aggregate(
        &resolution.consumption,
        &resolution.reference,
        request.granularity,
        request.unit_policy,
    )?;

    Ok(Summary {
        table,
        meals: resolution.meals,
        consumption_count: resolution.consumption.len(),
    })
}
