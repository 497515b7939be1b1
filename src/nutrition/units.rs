//! Amount units and quantity parsing
//!
//! An amount is a decimal numeral followed by an optional one-character
//! unit suffix. The suffix selects the convention the reference table's
//! values are expressed in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FormatError};

/// Reference values are per 100 grams
pub const GRAMS_SCALE: f64 = 100.0;
/// Reference values are per 60 minutes
pub const MINUTES_SCALE: f64 = 60.0;
/// Reference values are per single unit
pub const PER_UNIT_SCALE: f64 = 1.0;

/// Unit of a logged amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// `g` suffix
    Grams,
    /// `m` suffix, for time-based entries such as exercise
    Minutes,
    /// No suffix, or an unknown suffix under the lenient policy
    PerUnit,
}

impl Unit {
    /// Divisor applied to `reference value * numeral`
    pub fn scale_factor(&self) -> f64 {
        match self {
            Unit::Grams => GRAMS_SCALE,
            Unit::Minutes => MINUTES_SCALE,
            Unit::PerUnit => PER_UNIT_SCALE,
        }
    }

    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'g' => Some(Unit::Grams),
            'm' => Some(Unit::Minutes),
            _ => None,
        }
    }
}

/// How to treat an amount suffix that is not `g` or `m`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPolicy {
    /// Reject with a format error
    #[default]
    Strict,
    /// Treat as per-unit, logging a warning
    Lenient,
}

impl UnitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPolicy::Strict => "strict",
            UnitPolicy::Lenient => "lenient",
        }
    }
}

impl FromStr for UnitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(UnitPolicy::Strict),
            "lenient" => Ok(UnitPolicy::Lenient),
            _ => Err(ConfigError::UnknownUnitPolicy(s.to_string())),
        }
    }
}

/// A parsed amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub numeral: f64,
    pub unit: Unit,
}

impl Quantity {
    /// Parse an amount such as `200g`, `30m` or `2`
    ///
    /// The numeral is checked before the suffix, so `abc` reports a bad
    /// numeral rather than an unknown unit `c`.
    pub fn parse(amount: &str, policy: UnitPolicy) -> Result<Self, FormatError> {
        let trimmed = amount.trim();
        let last = trimmed.chars().next_back().ok_or(FormatError::EmptyAmount)?;

        let (numeral_str, suffix) = if last.is_ascii_digit() || last == '.' {
            (trimmed, None)
        } else {
            (&trimmed[..trimmed.len() - last.len_utf8()], Some(last))
        };

        let numeral = numeral_str
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| FormatError::InvalidNumeral {
                amount: amount.to_string(),
            })?;

        let unit = match suffix {
            None => Unit::PerUnit,
            Some(c) => match Unit::from_suffix(c) {
                Some(unit) => unit,
                None if policy == UnitPolicy::Lenient => {
                    tracing::warn!(
                        "Unknown unit suffix '{}' in amount '{}'. Treating as per-unit.",
                        c,
                        amount
                    );
                    Unit::PerUnit
                }
                None => {
                    return Err(FormatError::UnknownUnit {
                        amount: amount.to_string(),
                        unit: c,
                    })
                }
            },
        };

        Ok(Self { numeral, unit })
    }

    /// Amount expressed in reference units (e.g. 300g -> 3 hundred-grams)
    pub fn scaled(&self) -> f64 {
        self.numeral / self.unit.scale_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(amount: &str) -> Result<Quantity, FormatError> {
        Quantity::parse(amount, UnitPolicy::Strict)
    }

    #[test]
    fn test_parse_grams() {
        let q = parse("200g").unwrap();
        assert_eq!(q.numeral, 200.0);
        assert_eq!(q.unit, Unit::Grams);
        assert!((q.scaled() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_minutes() {
        let q = parse("30m").unwrap();
        assert_eq!(q.unit, Unit::Minutes);
        assert!((q.scaled() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_parse_without_suffix() {
        let q = parse("2").unwrap();
        assert_eq!(q.unit, Unit::PerUnit);
        assert_eq!(q.numeral, 2.0);

        let q = parse("1.5").unwrap();
        assert_eq!(q.numeral, 1.5);
    }

    #[test]
    fn test_parse_decimal_with_space() {
        let q = parse(" 12.5 g ").unwrap();
        assert_eq!(q.numeral, 12.5);
        assert_eq!(q.unit, Unit::Grams);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Err(FormatError::EmptyAmount));
        assert_eq!(parse("   "), Err(FormatError::EmptyAmount));
    }

    #[test]
    fn test_parse_invalid_numeral() {
        assert!(matches!(parse("g"), Err(FormatError::InvalidNumeral { .. })));
        assert!(matches!(parse("abc"), Err(FormatError::InvalidNumeral { .. })));
        assert!(matches!(parse("infg"), Err(FormatError::InvalidNumeral { .. })));
    }

    #[test]
    fn test_unknown_unit_strict() {
        assert_eq!(
            parse("2x"),
            Err(FormatError::UnknownUnit {
                amount: "2x".to_string(),
                unit: 'x'
            })
        );
    }

    #[test]
    fn test_unknown_unit_lenient() {
        let q = Quantity::parse("2x", UnitPolicy::Lenient).unwrap();
        assert_eq!(q.unit, Unit::PerUnit);
        assert_eq!(q.numeral, 2.0);
    }

    #[test]
    fn test_unit_policy_from_str() {
        assert_eq!("Lenient".parse::<UnitPolicy>(), Ok(UnitPolicy::Lenient));
        assert_eq!("strict".parse::<UnitPolicy>(), Ok(UnitPolicy::Strict));
        assert!("loose".parse::<UnitPolicy>().is_err());
    }

    #[test]
    fn test_unit_policy_labels_parse_back() {
        for policy in [UnitPolicy::Strict, UnitPolicy::Lenient] {
            assert_eq!(policy.as_str().parse::<UnitPolicy>(), Ok(policy));
        }
    }
}
