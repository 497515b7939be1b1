//! Log entry model
//!
//! One row of the calorie-changes log, and the structural classification
//! that decides whether a row is eaten food, a meal ingredient, or a meal
//! total.

use serde::{Deserialize, Serialize};

/// Subject marker declaring a meal's total consumed amount
pub const TOTAL_MARKER: &str = "total";

/// A raw row of the calorie-changes log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Food name, meal name, or the `total` marker
    #[serde(alias = "name")]
    pub subject: String,
    /// Numeral with an optional one-character unit suffix, e.g. `200g`
    pub amount: String,
    /// ISO date for eaten food, any other token for meal lines
    #[serde(alias = "date")]
    pub date_or_id: String,
}

/// The three kinds of log rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    /// Food (or a resolved meal) eaten on a date
    Consumption,
    /// The declared total amount of a meal group
    MealTotal,
    /// One ingredient line of a meal group
    MealIngredient,
}

impl Entry {
    pub fn new(subject: impl Into<String>, amount: impl Into<String>, date_or_id: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            amount: amount.into(),
            date_or_id: date_or_id.into(),
        }
    }

    /// Classify by shape alone; no stored flag is consulted
    pub fn classify(&self) -> EntryClass {
        if looks_like_date(&self.date_or_id) {
            EntryClass::Consumption
        } else if self.subject == TOTAL_MARKER {
            EntryClass::MealTotal
        } else {
            EntryClass::MealIngredient
        }
    }

    /// Convert into a consumption record, renaming the key to `date`
    pub fn into_consumption(self) -> Consumption {
        Consumption {
            subject: self.subject,
            amount: self.amount,
            date: self.date_or_id,
        }
    }
}

/// A dated consumption record, ready for aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub subject: String,
    pub amount: String,
    pub date: String,
}

impl Consumption {
    pub fn new(subject: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }
}

/// Whether `s` has the `YYYY-MM-DD` shape
///
/// Only the shape is checked. `2024-13-40` is still a date-shaped key and is
/// rejected later, when a calendar date is actually needed.
pub fn looks_like_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("2024-01-01"));
        assert!(looks_like_date("2024-13-40"));
        assert!(!looks_like_date("lunch1"));
        assert!(!looks_like_date("2024-1-01"));
        assert!(!looks_like_date("2024/01/01"));
        assert!(!looks_like_date(" 2024-01-01"));
        assert!(!looks_like_date(""));
    }

    #[test]
    fn test_classify_consumption() {
        let entry = Entry::new("rice", "200g", "2024-01-01");
        assert_eq!(entry.classify(), EntryClass::Consumption);
    }

    #[test]
    fn test_classify_meal_lines() {
        assert_eq!(Entry::new("total", "300g", "lunch1").classify(), EntryClass::MealTotal);
        assert_eq!(Entry::new("rice", "200g", "lunch1").classify(), EntryClass::MealIngredient);
    }

    #[test]
    fn test_dated_total_is_consumption() {
        // The date shape wins: a dated "total" row is eaten food named "total"
        assert_eq!(Entry::new("total", "1", "2024-01-01").classify(), EntryClass::Consumption);
    }

    #[test]
    fn test_into_consumption_renames_key() {
        let consumption = Entry::new("rice", "200g", "2024-01-01").into_consumption();
        assert_eq!(consumption, Consumption::new("rice", "200g", "2024-01-01"));
    }
}
