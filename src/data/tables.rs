//! CSV loaders for the two input tables

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LoadError, LoadResult};
use crate::models::{Entry, NutrientProfile, NutrientTable};

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|e| LoadError::Io(path.display().to_string(), e))
}

fn has_any(headers: &StringRecord, names: &[&str]) -> bool {
    headers.iter().any(|h| names.contains(&h))
}

/// Load the calorie-changes log from a file
pub fn load_entries<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Entry>> {
    let entries = read_entries(open(path.as_ref())?)?;
    tracing::info!("Loaded {} log entries from {}", entries.len(), path.as_ref().display());
    Ok(entries)
}

/// Read log entries from CSV with a `subject|name, amount, date_or_id|date` header
pub fn read_entries<R: Read>(reader: R) -> LoadResult<Vec<Entry>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if !has_any(&headers, &["subject", "name"]) {
        return Err(LoadError::MissingColumn("subject"));
    }
    if !has_any(&headers, &["amount"]) {
        return Err(LoadError::MissingColumn("amount"));
    }
    if !has_any(&headers, &["date_or_id", "date"]) {
        return Err(LoadError::MissingColumn("date_or_id"));
    }

    let entries = rdr
        .deserialize::<Entry>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries)
}

/// Load the food-nutrition table from a file
pub fn load_nutrient_table<P: AsRef<Path>>(path: P) -> LoadResult<NutrientTable> {
    let table = read_nutrient_table(open(path.as_ref())?)?;
    tracing::info!(
        "Loaded {} foods with {} nutrient columns from {}",
        table.len(),
        table.columns().len(),
        path.as_ref().display()
    );
    Ok(table)
}

/// Read a nutrient table from CSV with a `name` column and numeric columns
///
/// Empty cells are zero. Any other non-numeric cell is an error. A repeated
/// food name keeps the later row.
pub fn read_nutrient_table<R: Read>(reader: R) -> LoadResult<NutrientTable> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h == "name")
        .ok_or(LoadError::MissingColumn("name"))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx)
        .map(|(_, h)| h.to_string())
        .collect();
    let mut table = NutrientTable::new(columns);

    for (row_idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = row_idx + 1;

        let mut values = Vec::with_capacity(table.columns().len());
        for (i, cell) in record.iter().enumerate() {
            if i == name_idx {
                continue;
            }
            values.push(parse_cell(cell).ok_or_else(|| LoadError::InvalidNumber {
                row,
                column: headers.get(i).unwrap_or_default().to_string(),
                value: cell.to_string(),
            })?);
        }

        let name = record.get(name_idx).unwrap_or_default();
        if table.upsert(NutrientProfile::new(name, values)) {
            tracing::warn!("Food '{}' appears more than once, keeping row {}", name, row);
        }
    }

    Ok(table)
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
