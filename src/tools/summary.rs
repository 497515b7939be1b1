//! Summary tool
//!
//! Loads both tables named in the settings, runs the nutrition core and
//! renders the result for the terminal.

use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::config::Settings;
use crate::data::{load_entries, load_nutrient_table};
use crate::models::{Cell, ResultTable};
use crate::nutrition::{summarize, Granularity, ResolvedMeal};

/// Column names treated as energy when computing the daily-target share
const CALORIE_COLUMNS: [&str; 3] = ["cal", "kcal", "calories"];

/// Name of the column appended to `day` tables
pub const TARGET_COLUMN: &str = "target_pct";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub build: BuildInfo,
    pub granularity: Granularity,
    pub entries_read: usize,
    pub foods_known: usize,
    pub consumption_entries: usize,
    pub meals: Vec<ResolvedMeal>,
    pub table: ResultTable,
}

/// Load, resolve and aggregate according to `settings`
pub fn run(settings: &Settings) -> Result<SummaryResponse, String> {
    let entries = load_entries(&settings.calorie_changes_path)
        .map_err(|e| format!("Failed to read {}: {}", settings.calorie_changes_path.display(), e))?;
    let reference = load_nutrient_table(&settings.food_nutrition_path)
        .map_err(|e| format!("Failed to read {}: {}", settings.food_nutrition_path.display(), e))?;

    let summary = summarize(&entries, &reference, &settings.request())
        .map_err(|e| format!("Failed to summarize: {}", e))?;

    let mut table = summary.table;
    if settings.granularity == Granularity::Day {
        add_target_column(&mut table, settings.daily_calorie_target);
    }

    Ok(SummaryResponse {
        build: BuildInfo::current(),
        granularity: settings.granularity,
        entries_read: entries.len(),
        foods_known: reference.len(),
        consumption_entries: summary.consumption_count,
        meals: summary.meals,
        table,
    })
}

/// Append each day's calories as a percentage of `target`
///
/// Tables without a recognizable calorie column are left unchanged.
pub fn add_target_column(table: &mut ResultTable, target: f64) {
    let Some(col) = table
        .columns
        .iter()
        .position(|c| CALORIE_COLUMNS.contains(&c.to_lowercase().as_str()))
    else {
        return;
    };

    table.push_column(TARGET_COLUMN, |row| {
        let calories = row.get(col).and_then(Cell::as_number).unwrap_or(0.0);
        Cell::Number(calories / target * 100.0)
    });
}

/// Render a response in the requested format
pub fn render(response: &SummaryResponse, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Table => Ok(render_table(&response.table)),
        OutputFormat::Csv => render_csv(&response.table),
        OutputFormat::Json => {
            serde_json::to_string_pretty(response).map_err(|e| format!("Failed to encode JSON: {}", e))
        }
    }
}

/// Aligned plain-text table; numbers right-aligned with two decimals
pub fn render_table(table: &ResultTable) -> String {
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &rendered {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // A column is right-aligned when its first row holds a number
    let numeric: Vec<bool> = (0..table.columns.len())
        .map(|i| {
            table
                .rows
                .first()
                .and_then(|row| row.get(i))
                .map_or(false, Cell::is_numeric)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(table.columns.iter().map(String::as_str), &widths, &numeric));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    out.push('\n');
    for row in &rendered {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths, &numeric));
        out.push('\n');
    }
    out
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize], numeric: &[bool]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| {
            if numeric[i] {
                format!("{:>width$}", cell, width = widths[i])
            } else {
                format!("{:<width$}", cell, width = widths[i])
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// CSV with the same columns as the table
pub fn render_csv(table: &ResultTable) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .map_err(|e| format!("Failed to write CSV: {}", e))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| match cell {
                Cell::Number(n) => n.to_string(),
                other => other.to_string(),
            }))
            .map_err(|e| format!("Failed to write CSV: {}", e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to write CSV: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("Failed to write CSV: {}", e))
}

/// Selector labels with their support status, one per line
pub fn list_granularities() -> String {
    Granularity::ALL
        .iter()
        .map(|g| {
            let status = if g.is_supported() { "supported" } else { "not supported" };
            format!("{:<12}{}", g.as_str(), status)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
