//! Static registry of unit categories and conversion coefficients.
//!
//! # Design
//! The tables below are `const` data initialized at compile time and never
//! mutated; the engine reads them without synchronization. Lookups
//! canonicalize the identifier (trim + ASCII lowercase) first, so
//! `"  Kilometer "` and `"kilometer"` resolve identically. An identifier
//! absent from its category's table is a hard validation failure — there is
//! no default factor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A conversion domain. Units are only convertible within their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
}

impl UnitCategory {
    /// All supported categories, in the order they are reported by the API.
    pub const ALL: [UnitCategory; 3] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitCategory {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(UnitCategory::Length),
            "weight" => Ok(UnitCategory::Weight),
            "temperature" => Ok(UnitCategory::Temperature),
            other => Err(ConvertError::UnsupportedCategory(other.to_string())),
        }
    }
}

/// Multiplicative coefficients for one unit: `to_base` reaches the category's
/// base unit, `from_base` leaves it. Temperature units carry no entry here
/// because their conversions are affine, not purely multiplicative.
#[derive(Debug, Clone, Copy)]
struct UnitDef {
    name: &'static str,
    to_base: f64,
    from_base: f64,
}

// Base unit: meter. The from_base factors for imperial units are the
// published reciprocal approximations, kept as-is rather than recomputed.
const LENGTH_UNITS: &[UnitDef] = &[
    UnitDef { name: "meter", to_base: 1.0, from_base: 1.0 },
    UnitDef { name: "kilometer", to_base: 1000.0, from_base: 0.001 },
    UnitDef { name: "centimeter", to_base: 0.01, from_base: 100.0 },
    UnitDef { name: "millimeter", to_base: 0.001, from_base: 1000.0 },
    UnitDef { name: "mile", to_base: 1609.34, from_base: 0.000_621_371 },
    UnitDef { name: "foot", to_base: 0.3048, from_base: 3.280_84 },
    UnitDef { name: "inch", to_base: 0.0254, from_base: 39.3701 },
    UnitDef { name: "yard", to_base: 0.9144, from_base: 1.093_61 },
];

// Base unit: kilogram.
const WEIGHT_UNITS: &[UnitDef] = &[
    UnitDef { name: "kilogram", to_base: 1.0, from_base: 1.0 },
    UnitDef { name: "gram", to_base: 0.001, from_base: 1000.0 },
    UnitDef { name: "pound", to_base: 0.453_592, from_base: 2.204_62 },
    UnitDef { name: "ounce", to_base: 0.028_349_5, from_base: 35.274 },
    UnitDef { name: "ton", to_base: 1000.0, from_base: 0.001 },
];

const TEMPERATURE_UNITS: &[&str] = &["celsius", "fahrenheit", "kelvin"];

fn defs_for(category: UnitCategory) -> Option<&'static [UnitDef]> {
    match category {
        UnitCategory::Length => Some(LENGTH_UNITS),
        UnitCategory::Weight => Some(WEIGHT_UNITS),
        UnitCategory::Temperature => None,
    }
}

/// Canonical form used for every unit comparison: trimmed, ASCII-lowercased.
pub fn canonical(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Valid unit identifiers for a category, in declaration order. This is the
/// order the `/units` endpoint reports.
pub fn units_for(category: UnitCategory) -> Vec<&'static str> {
    match defs_for(category) {
        Some(defs) => defs.iter().map(|d| d.name).collect(),
        None => TEMPERATURE_UNITS.to_vec(),
    }
}

/// Valid unit identifiers sorted alphabetically, used in `InvalidUnit`
/// messages so callers can discover their options.
pub fn units_sorted(category: UnitCategory) -> Vec<&'static str> {
    let mut units = units_for(category);
    units.sort_unstable();
    units
}

/// `(to_base, from_base)` factors for a canonical unit identifier. `None`
/// for unknown units and for all temperature units.
pub fn coefficients(category: UnitCategory, unit: &str) -> Option<(f64, f64)> {
    defs_for(category)?
        .iter()
        .find(|d| d.name == unit)
        .map(|d| (d.to_base, d.from_base))
}

/// Canonicalize `raw` and require membership in `category`'s unit set.
///
/// The empty string (after trimming) is never a member, so it fails the same
/// way any unknown identifier does.
pub fn require(category: UnitCategory, raw: &str) -> Result<String, ConvertError> {
    let unit = canonical(raw);
    if units_for(category).contains(&unit.as_str()) {
        Ok(unit)
    } else {
        Err(ConvertError::unknown_unit(category, &unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_units_in_declaration_order() {
        assert_eq!(
            units_for(UnitCategory::Length),
            vec![
                "meter",
                "kilometer",
                "centimeter",
                "millimeter",
                "mile",
                "foot",
                "inch",
                "yard"
            ]
        );
    }

    #[test]
    fn weight_units_in_declaration_order() {
        assert_eq!(
            units_for(UnitCategory::Weight),
            vec!["kilogram", "gram", "pound", "ounce", "ton"]
        );
    }

    #[test]
    fn temperature_units_in_declaration_order() {
        assert_eq!(
            units_for(UnitCategory::Temperature),
            vec!["celsius", "fahrenheit", "kelvin"]
        );
    }

    #[test]
    fn sorted_units_are_alphabetical() {
        assert_eq!(
            units_sorted(UnitCategory::Length),
            vec![
                "centimeter",
                "foot",
                "inch",
                "kilometer",
                "meter",
                "mile",
                "millimeter",
                "yard"
            ]
        );
    }

    #[test]
    fn coefficients_for_known_units() {
        assert_eq!(
            coefficients(UnitCategory::Length, "kilometer"),
            Some((1000.0, 0.001))
        );
        assert_eq!(
            coefficients(UnitCategory::Weight, "pound"),
            Some((0.453_592, 2.204_62))
        );
    }

    #[test]
    fn coefficients_absent_for_unknown_and_temperature() {
        assert_eq!(coefficients(UnitCategory::Length, "lightyear"), None);
        assert_eq!(coefficients(UnitCategory::Temperature, "celsius"), None);
    }

    #[test]
    fn require_canonicalizes_case_and_whitespace() {
        assert_eq!(
            require(UnitCategory::Length, "  Kilometer ").unwrap(),
            "kilometer"
        );
    }

    #[test]
    fn require_rejects_unknown_unit() {
        let err = require(UnitCategory::Length, "lightyear").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidUnit { .. }));
    }

    #[test]
    fn require_rejects_empty_string() {
        let err = require(UnitCategory::Weight, "   ").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidUnit { .. }));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "Temperature".parse::<UnitCategory>().unwrap(),
            UnitCategory::Temperature
        );
        assert_eq!(" length ".parse::<UnitCategory>().unwrap(), UnitCategory::Length);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "volume".parse::<UnitCategory>().unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedCategory(c) if c == "volume"));
    }

    #[test]
    fn category_serde_uses_lowercase() {
        let json = serde_json::to_string(&UnitCategory::Length).unwrap();
        assert_eq!(json, r#""length""#);
        let back: UnitCategory = serde_json::from_str(r#""weight""#).unwrap();
        assert_eq!(back, UnitCategory::Weight);
    }
}
