//! Time-bucketed aggregation
//!
//! Scales every consumption entry against the reference table, then either
//! lists the entries as they are or sums them per day, ISO week, month or
//! year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{ConfigError, DataError, NutritionResult};
use crate::models::{Cell, Consumption, NutrientTable, ResultTable};

use super::granularity::Granularity;
use super::scaling::{accumulate, contribution};
use super::units::UnitPolicy;

/// Grouping key; one variant per date-derived granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BucketKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Year(i32),
}

impl BucketKey {
    fn for_date(granularity: Granularity, date: NaiveDate) -> Self {
        match granularity {
            Granularity::Week => {
                let iso = date.iso_week();
                BucketKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Granularity::Month => BucketKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Year => BucketKey::Year(date.year()),
            _ => BucketKey::Day(date),
        }
    }

    fn cells(&self) -> Vec<Cell> {
        match *self {
            BucketKey::Day(date) => vec![Cell::Text(date.format("%Y-%m-%d").to_string())],
            BucketKey::Week { year, week } => vec![Cell::Integer(year.into()), Cell::Integer(week.into())],
            BucketKey::Month { year, month } => vec![Cell::Integer(year.into()), Cell::Integer(month.into())],
            BucketKey::Year(year) => vec![Cell::Integer(year.into())],
        }
    }
}

/// Leading columns of the result for a granularity
fn key_columns(granularity: Granularity) -> &'static [&'static str] {
    match granularity {
        Granularity::Item => &["subject", "amount", "date"],
        Granularity::Day => &["date"],
        Granularity::Week => &["year", "week"],
        Granularity::Month => &["year", "month"],
        Granularity::Year => &["year"],
        Granularity::Ingredient | Granularity::Decade | Granularity::Century | Granularity::Eon => &[],
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| DataError::InvalidDate {
        date: date.to_string(),
    })
}

/// Aggregate consumption entries at the requested granularity
///
/// Unsupported granularities are rejected before any entry is looked at.
/// Bucketed rows come back sorted by their key; item rows keep log order.
pub fn aggregate(
    entries: &[Consumption],
    reference: &NutrientTable,
    granularity: Granularity,
    policy: UnitPolicy,
) -> NutritionResult<ResultTable> {
    if !granularity.is_supported() {
        return Err(ConfigError::UnsupportedGranularity(granularity).into());
    }

    let columns = key_columns(granularity)
        .iter()
        .map(|c| c.to_string())
        .chain(reference.columns().iter().cloned())
        .collect();
    let mut table = ResultTable::new(columns);

    if granularity == Granularity::Item {
        for entry in entries {
            let values = contribution(reference, &entry.subject, &entry.amount, policy)?;
            let mut row = vec![
                Cell::Text(entry.subject.clone()),
                Cell::Text(entry.amount.clone()),
                Cell::Text(entry.date.clone()),
            ];
            row.extend(values.into_iter().map(Cell::Number));
            table.rows.push(row);
        }
        return Ok(table);
    }

    let mut buckets: BTreeMap<BucketKey, Vec<f64>> = BTreeMap::new();
    for entry in entries {
        let values = contribution(reference, &entry.subject, &entry.amount, policy)?;
        let key = BucketKey::for_date(granularity, parse_date(&entry.date)?);
        let sums = buckets.entry(key).or_insert_with(|| reference.zero_values());
        accumulate(sums, &values);
    }

    for (key, sums) in buckets {
        let mut row = key.cells();
        row.extend(sums.into_iter().map(Cell::Number));
        table.rows.push(row);
    }

    tracing::debug!(
        "Aggregated {} entries into {} rows by {}",
        entries.len(),
        table.len(),
        granularity
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, NutritionError};
    use crate::models::NutrientProfile;

    fn reference() -> NutrientTable {
        let mut table = NutrientTable::new(vec!["cal".to_string(), "protein".to_string()]);
        table.upsert(NutrientProfile::new("rice", vec![130.0, 2.7]));
        table.upsert(NutrientProfile::new("egg", vec![78.0, 6.3]));
        table
    }

    fn log() -> Vec<Consumption> {
        vec![
            Consumption::new("rice", "200g", "2024-01-01"),
            Consumption::new("egg", "2", "2024-01-01"),
            Consumption::new("rice", "100g", "2023-12-31"),
            Consumption::new("egg", "1", "2024-01-08"),
            Consumption::new("rice", "50g", "2024-02-10"),
        ]
    }

    fn run(granularity: Granularity) -> ResultTable {
        aggregate(&log(), &reference(), granularity, UnitPolicy::Strict).unwrap()
    }

    #[test]
    fn test_item_passes_rows_through() {
        let table = run(Granularity::Item);

        assert_eq!(table.columns, vec!["subject", "amount", "date", "cal", "protein"]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.rows[0][0], Cell::Text("rice".to_string()));
        assert!((table.number(0, "cal").unwrap() - 260.0).abs() < 0.001);
        assert!((table.number(1, "cal").unwrap() - 156.0).abs() < 0.001);
    }

    #[test]
    fn test_day_groups_and_sorts() {
        let table = run(Granularity::Day);

        assert_eq!(table.columns, vec!["date", "cal", "protein"]);
        let dates: Vec<String> = table.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(dates, vec!["2023-12-31", "2024-01-01", "2024-01-08", "2024-02-10"]);
        assert!((table.number(1, "cal").unwrap() - 416.0).abs() < 0.001);
    }

    #[test]
    fn test_day_matches_regrouped_items() {
        let items = run(Granularity::Item);
        let days = run(Granularity::Day);

        let mut regrouped: BTreeMap<String, f64> = BTreeMap::new();
        for (i, row) in items.rows.iter().enumerate() {
            *regrouped.entry(row[2].to_string()).or_default() += items.number(i, "cal").unwrap();
        }

        assert_eq!(regrouped.len(), days.len());
        for (i, (date, cal)) in regrouped.iter().enumerate() {
            assert_eq!(&days.rows[i][0].to_string(), date);
            assert!((days.number(i, "cal").unwrap() - cal).abs() < 0.001);
        }
    }

    #[test]
    fn test_week_uses_iso_calendar() {
        let table = run(Granularity::Week);

        assert_eq!(table.columns, vec!["year", "week", "cal", "protein"]);
        // 2023-12-31 is a Sunday in ISO week 2023-W52; 2024-01-01 starts 2024-W01
        assert_eq!(table.rows[0][..2], [Cell::Integer(2023), Cell::Integer(52)]);
        assert_eq!(table.rows[1][..2], [Cell::Integer(2024), Cell::Integer(1)]);
        assert_eq!(table.rows[2][..2], [Cell::Integer(2024), Cell::Integer(2)]);
        assert_eq!(table.rows[3][..2], [Cell::Integer(2024), Cell::Integer(6)]);
        assert!((table.number(1, "cal").unwrap() - 416.0).abs() < 0.001);
    }

    #[test]
    fn test_month_groups() {
        let table = run(Granularity::Month);

        assert_eq!(table.columns, vec!["year", "month", "cal", "protein"]);
        assert_eq!(table.len(), 3);
        // January: 260 + 156 + 78
        assert_eq!(table.rows[1][..2], [Cell::Integer(2024), Cell::Integer(1)]);
        assert!((table.number(1, "cal").unwrap() - 494.0).abs() < 0.001);
    }

    #[test]
    fn test_year_groups() {
        let table = run(Granularity::Year);

        assert_eq!(table.columns, vec!["year", "cal", "protein"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], Cell::Integer(2023));
        assert!((table.number(0, "cal").unwrap() - 130.0).abs() < 0.001);
        assert!((table.number(1, "cal").unwrap() - 559.0).abs() < 0.001);
    }

    #[test]
    fn test_unsupported_granularities() {
        for granularity in [
            Granularity::Ingredient,
            Granularity::Decade,
            Granularity::Century,
            Granularity::Eon,
        ] {
            assert_eq!(
                aggregate(&log(), &reference(), granularity, UnitPolicy::Strict),
                Err(NutritionError::Config(ConfigError::UnsupportedGranularity(granularity)))
            );
        }
    }

    #[test]
    fn test_unsupported_checked_before_data() {
        let bad = vec![Consumption::new("rice", "oops", "2024-01-01")];
        assert!(matches!(
            aggregate(&bad, &reference(), Granularity::Decade, UnitPolicy::Strict),
            Err(NutritionError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_date_is_data_error() {
        let bad = vec![Consumption::new("rice", "100g", "2024-02-30")];
        assert_eq!(
            aggregate(&bad, &reference(), Granularity::Day, UnitPolicy::Strict),
            Err(NutritionError::Data(DataError::InvalidDate {
                date: "2024-02-30".to_string()
            }))
        );
        // Item rows never need the calendar date
        assert!(aggregate(&bad, &reference(), Granularity::Item, UnitPolicy::Strict).is_ok());
    }

    #[test]
    fn test_unknown_unit_is_format_error() {
        let bad = vec![Consumption::new("rice", "100q", "2024-01-01")];
        assert!(matches!(
            aggregate(&bad, &reference(), Granularity::Item, UnitPolicy::Strict),
            Err(NutritionError::Format(FormatError::UnknownUnit { unit: 'q', .. }))
        ));
    }

    #[test]
    fn test_empty_log() {
        let table = aggregate(&[], &reference(), Granularity::Month, UnitPolicy::Strict).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["year", "month", "cal", "protein"]);
    }
}
