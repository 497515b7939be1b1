//! Aggregation result table
//!
//! Column-labelled rows handed to the presentation layer.

use serde::Serialize;

/// One value in a result row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Integer(i) => Some(*i as f64),
            Cell::Text(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Number(n) => write!(f, "{:.2}", n),
        }
    }
}

/// Result of an aggregation: key columns first, then nutrient columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Numeric value at `row` in the named column
    pub fn number(&self, row: usize, column: &str) -> Option<f64> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_number()
    }

    /// Append a column computed from each existing row
    pub fn push_column<F>(&mut self, name: impl Into<String>, mut value: F)
    where
        F: FnMut(&[Cell]) -> Cell,
    {
        self.columns.push(name.into());
        for row in &mut self.rows {
            let cell = value(row);
            row.push(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_lookup() {
        let mut table = ResultTable::new(vec!["date".to_string(), "cal".to_string()]);
        table.rows.push(vec![Cell::Text("2024-01-01".to_string()), Cell::Number(260.0)]);

        assert_eq!(table.number(0, "cal"), Some(260.0));
        assert_eq!(table.number(0, "date"), None);
        assert_eq!(table.number(1, "cal"), None);
        assert_eq!(table.number(0, "fat"), None);
    }

    #[test]
    fn test_push_column() {
        let mut table = ResultTable::new(vec!["cal".to_string()]);
        table.rows.push(vec![Cell::Number(1000.0)]);
        table.push_column("half", |row| Cell::Number(row[0].as_number().unwrap_or(0.0) / 2.0));

        assert_eq!(table.columns, vec!["cal", "half"]);
        assert_eq!(table.number(0, "half"), Some(500.0));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(86.666).to_string(), "86.67");
        assert_eq!(Cell::Integer(2024).to_string(), "2024");
        assert_eq!(Cell::Text("rice".to_string()).to_string(), "rice");
    }
}
