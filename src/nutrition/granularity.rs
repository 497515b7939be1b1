//! Aggregation granularity
//!
//! The full set of selector labels. Only some of them are implemented by
//! the aggregator; the rest are kept so that a selector offering them gets a
//! typed "unsupported" error instead of an unknown-value error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Ingredient,
    #[default]
    Item,
    Day,
    Week,
    Month,
    Year,
    Decade,
    Century,
    Eon,
}

impl Granularity {
    /// Every label, in selector order
    pub const ALL: [Granularity; 9] = [
        Granularity::Ingredient,
        Granularity::Item,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
        Granularity::Decade,
        Granularity::Century,
        Granularity::Eon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Ingredient => "ingredient",
            Granularity::Item => "item",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
            Granularity::Decade => "decade",
            Granularity::Century => "century",
            Granularity::Eon => "eon",
        }
    }

    pub fn is_supported(&self) -> bool {
        match self {
            Granularity::Item
            | Granularity::Day
            | Granularity::Week
            | Granularity::Month
            | Granularity::Year => true,
            Granularity::Ingredient
            | Granularity::Decade
            | Granularity::Century
            | Granularity::Eon => false,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Granularity::ALL
            .into_iter()
            .find(|g| g.as_str() == lower)
            .ok_or_else(|| ConfigError::UnknownGranularity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_labels() {
        for g in Granularity::ALL {
            assert_eq!(g.as_str().parse::<Granularity>(), Ok(g));
        }
        assert_eq!(" Week ".parse::<Granularity>(), Ok(Granularity::Week));
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(
            "fortnight".parse::<Granularity>(),
            Err(ConfigError::UnknownGranularity("fortnight".to_string()))
        );
    }

    #[test]
    fn test_supported_set() {
        let supported: Vec<_> = Granularity::ALL.into_iter().filter(|g| g.is_supported()).collect();
        assert_eq!(
            supported,
            vec![
                Granularity::Item,
                Granularity::Day,
                Granularity::Week,
                Granularity::Month,
                Granularity::Year
            ]
        );
    }

    #[test]
    fn test_default_is_item() {
        assert_eq!(Granularity::default(), Granularity::Item);
    }
}
