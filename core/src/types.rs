//! Request and result types for the conversion engine.
//!
//! # Design
//! `ConversionRequest` carries an already-parsed [`UnitCategory`], so an
//! unsupported category is unrepresentable here; the HTTP layer parses the
//! raw tag at its boundary. Both types are transient per-request values.

use serde::{Deserialize, Serialize};

use crate::registry::UnitCategory;

/// A single conversion to perform. Unit strings are kept as the caller sent
/// them; the engine canonicalizes (trim + lowercase) for validation and
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub unit_type: UnitCategory,
}

/// A completed conversion: the request echoed back plus the result rounded
/// to 6 decimal digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub result: f64,
    pub unit_type: UnitCategory,
}
