//! Nutrition core
//!
//! Amount scaling, meal resolution and time-bucketed aggregation.

pub mod aggregator;
pub mod granularity;
pub mod pipeline;
pub mod resolver;
pub mod scaling;
pub mod units;

pub use aggregator::aggregate;
pub use granularity::Granularity;
pub use pipeline::{summarize, AggregationRequest, Summary};
pub use resolver::{resolve, Resolution, ResolvedMeal};
pub use scaling::contribution;
pub use units::{Quantity, Unit, UnitPolicy};
